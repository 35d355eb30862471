pub mod coordinator;
pub mod state;

pub use coordinator::PipelineCoordinator;
pub use state::{BatchReport, FindingOutcome, FindingReport};
