mod mock_processor;
mod simulated_processor;

pub use mock_processor::MockJobProcessor;
pub use simulated_processor::SimulatedPdfProcessor;
