pub mod observability;
pub mod persistence;
pub mod processing;
pub mod queue;
pub mod storage;
