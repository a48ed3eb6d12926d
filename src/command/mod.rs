pub mod cli;
pub mod dispatcher;
pub mod types;

pub use dispatcher::dispatch_split;
pub use types::{SplitCommand, SplitRequest, TableSelection};
