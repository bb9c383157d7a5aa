mod in_memory_job_store;

pub use in_memory_job_store::InMemoryJobStore;
