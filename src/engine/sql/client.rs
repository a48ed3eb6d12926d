use async_trait::async_trait;

use crate::engine::errors::SqlError;
use crate::engine::types::SqlValue;

/// One result row, values in select-list order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    pub values: Vec<SqlValue>,
}

impl Row {
    pub fn new(values: Vec<SqlValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, idx: usize) -> Option<&SqlValue> {
        self.values.get(idx)
    }

    pub fn into_values(self) -> Vec<SqlValue> {
        self.values
    }
}

/// Minimal SQL surface the planners depend on.
///
/// Calls are awaited one at a time by each table pipeline; implementations
/// must be shareable across pipelines.
#[async_trait]
pub trait SqlClient: Send + Sync {
    async fn query_rows(&self, sql: &str) -> Result<Vec<Row>, SqlError>;

    /// First column of the first row, `None` for an empty result.
    async fn query_scalar(&self, sql: &str) -> Result<Option<SqlValue>, SqlError> {
        let rows = self.query_rows(sql).await?;
        Ok(rows.into_iter().next().and_then(|r| r.values.into_iter().next()))
    }
}
