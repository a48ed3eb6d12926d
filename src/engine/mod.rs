pub mod catalog;
pub mod coordinator;
pub mod errors;
pub mod planner;
pub mod sql;
pub mod status;
pub mod types;
pub mod writer;

pub use errors::*;
