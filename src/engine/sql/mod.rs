pub mod client;
pub mod literal;
pub mod mysql;
pub mod queries;
pub mod reader;

pub use client::{Row, SqlClient};
pub use literal::{format_literal, format_tuple};
pub use mysql::MySqlClient;
pub use reader::{HIDDEN_ROWID, SqlTableReader, TableReader, TableStats};
