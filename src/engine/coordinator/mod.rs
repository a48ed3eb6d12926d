pub mod coordinator;
pub mod report;

pub use coordinator::ConcurrencyCoordinator;
pub use report::{RunReport, TableOutcome};
