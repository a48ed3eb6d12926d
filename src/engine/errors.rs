use std::io;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Errors raised while planning or emitting splits.
///
/// Selection, unknown-table, unknown-database and parameter errors abort
/// the whole run before any table is scheduled. Everything else is scoped to the table
/// whose pipeline raised it.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("Invalid table selection: {0}")]
    Selection(String),

    #[error("Unknown table(s) in include list: {0}")]
    UnknownTable(String),

    #[error("Database not found: {0}")]
    UnknownDatabase(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Query failed: {0}")]
    Query(#[from] SqlError),

    #[error("Status endpoint error: {0}")]
    Endpoint(#[from] StatusError),

    #[error("Column `{column}` ({reason}) cannot be interpolated")]
    UnorderableDomain { column: String, reason: String },

    #[error("Only {distinct} distinct values for {needed} requested regions")]
    InsufficientCardinality { distinct: u64, needed: u64 },

    #[error("No values to split on: {0}")]
    EmptyDomain(String),

    #[error("Pagination stalled on {table} after {pages} page(s): {detail}")]
    PaginationStall {
        table: String,
        pages: usize,
        detail: String,
    },

    #[error("Split points for {table} are not strictly increasing at position {position}")]
    UnorderedPlan { table: String, position: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl SplitError {
    /// Short stable tag used in run reports.
    pub fn kind(&self) -> &'static str {
        match self {
            SplitError::Selection(_) => "SelectionError",
            SplitError::UnknownTable(_) => "UnknownTableError",
            SplitError::UnknownDatabase(_) => "UnknownDatabaseError",
            SplitError::InvalidParams(_) => "InvalidParamsError",
            SplitError::Query(_) => "QueryError",
            SplitError::Endpoint(_) => "EndpointError",
            SplitError::UnorderableDomain { .. } => "UnorderableDomainError",
            SplitError::InsufficientCardinality { .. } => "InsufficientCardinalityError",
            SplitError::EmptyDomain(_) => "EmptyDomainError",
            SplitError::PaginationStall { .. } => "PaginationStallError",
            SplitError::UnorderedPlan { .. } => "UnorderedPlanError",
            SplitError::Io(_) => "IOError",
        }
    }

    /// Errors that stop the run before any table pipeline starts.
    pub fn is_run_fatal(&self) -> bool {
        matches!(
            self,
            SplitError::Selection(_)
                | SplitError::UnknownTable(_)
                | SplitError::UnknownDatabase(_)
                | SplitError::InvalidParams(_)
        )
    }

    /// Errors that select a fallback path rather than failing the table.
    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            SplitError::UnorderableDomain { .. } | SplitError::InsufficientCardinality { .. }
        )
    }

    pub fn log_error(&self, table: &str) {
        if self.is_fallback() {
            warn!(target: "presplit::errors", table, kind = self.kind(), "{}", self);
            return;
        }
        error!(target: "presplit::errors", table, kind = self.kind(), "{}", self);
        match self {
            SplitError::Query(e) => debug!("Query error details: {:?}", e),
            SplitError::Endpoint(e) => debug!("Endpoint error details: {:?}", e),
            SplitError::Io(e) => debug!("I/O error details: {:?}", e),
            _ => {}
        }
    }
}

/// Failures surfaced by the SQL client.
#[derive(Debug, Error)]
pub enum SqlError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Server rejected `{sql}`: {message}")]
    Server { sql: String, message: String },

    #[error("Unexpected result shape for `{sql}`: {detail}")]
    Shape { sql: String, detail: String },

    #[error("Value decode error: {0}")]
    Decode(String),
}

/// Failures talking to the cluster status endpoint.
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("Endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("HTTP {status} from {uri}")]
    Http { status: u16, uri: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid base64 key: {0}")]
    Base64(#[from] base64::DecodeError),
}
