pub mod sink;
pub mod statement;

pub use sink::{FileSink, OutputSink};
pub use statement::StatementWriter;

#[cfg(test)]
mod statement_test;
