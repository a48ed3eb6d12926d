use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::engine::errors::SqlError;
use crate::engine::types::{ColumnDomain, ColumnType, SqlValue, TableRef};

use super::client::{Row, SqlClient};
use super::queries;

/// Hidden integer handle of tables without a clustered primary key.
pub const HIDDEN_ROWID: &str = "_tidb_rowid";

/// Size statistics for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableStats {
    pub rows: u64,
    pub bytes: u64,
}

impl TableStats {
    pub fn size_mb(&self) -> f64 {
        self.bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Semantic reads over the live schema and table data.
#[async_trait]
pub trait TableReader: Send + Sync {
    async fn database_exists(&self, db: &str) -> Result<bool, SqlError>;

    async fn list_tables(&self, db: &str) -> Result<Vec<String>, SqlError>;

    async fn table_stats(&self, table: &TableRef) -> Result<TableStats, SqlError>;

    /// Clustered primary key columns in key order; empty when rows are
    /// keyed by the hidden row id.
    async fn primary_key(&self, table: &TableRef) -> Result<Vec<String>, SqlError>;

    /// Index columns in key order; empty when the index does not exist.
    async fn index_columns(&self, table: &TableRef, index: &str) -> Result<Vec<String>, SqlError>;

    async fn column_domain(&self, table: &TableRef, column: &str) -> Result<ColumnDomain, SqlError>;

    async fn distinct_count(&self, table: &TableRef, columns: &[String]) -> Result<u64, SqlError>;

    /// Every distinct non-null tuple, ascending.
    async fn distinct_values(
        &self,
        table: &TableRef,
        columns: &[String],
    ) -> Result<Vec<Vec<SqlValue>>, SqlError>;

    /// Up to `limit` distinct tuples strictly greater than `after`, ascending.
    async fn distinct_page(
        &self,
        table: &TableRef,
        columns: &[String],
        after: Option<&[SqlValue]>,
        limit: usize,
    ) -> Result<Vec<Vec<SqlValue>>, SqlError>;
}

/// `TableReader` backed by `information_schema` and plain SELECTs.
pub struct SqlTableReader {
    client: Arc<dyn SqlClient>,
}

impl SqlTableReader {
    pub fn new(client: Arc<dyn SqlClient>) -> Self {
        Self { client }
    }

    async fn rows(&self, sql: String) -> Result<Vec<Row>, SqlError> {
        debug!(target: "presplit::sql", %sql, "Executing query");
        self.client.query_rows(&sql).await
    }

    async fn count(&self, sql: String) -> Result<u64, SqlError> {
        debug!(target: "presplit::sql", %sql, "Executing scalar query");
        match self.client.query_scalar(&sql).await? {
            None | Some(SqlValue::Null) => Ok(0),
            Some(v) => v.as_u64().ok_or_else(|| SqlError::Shape {
                sql,
                detail: format!("expected a non-negative count, got {v}"),
            }),
        }
    }

    async fn names(&self, sql: String) -> Result<Vec<String>, SqlError> {
        let rows = self.rows(sql.clone()).await?;
        rows.into_iter()
            .map(|row| match row.get(0) {
                Some(SqlValue::Text(s)) => Ok(s.clone()),
                Some(SqlValue::Bytes(b)) => String::from_utf8(b.clone())
                    .map_err(|e| SqlError::Decode(e.to_string())),
                other => Err(SqlError::Shape {
                    sql: sql.clone(),
                    detail: format!("expected a name column, got {other:?}"),
                }),
            })
            .collect()
    }
}

#[async_trait]
impl TableReader for SqlTableReader {
    async fn database_exists(&self, db: &str) -> Result<bool, SqlError> {
        Ok(self.count(queries::schema_exists(db)).await? > 0)
    }

    async fn list_tables(&self, db: &str) -> Result<Vec<String>, SqlError> {
        self.names(queries::list_tables(db)).await
    }

    async fn table_stats(&self, table: &TableRef) -> Result<TableStats, SqlError> {
        let sql = queries::table_stats(table);
        let rows = self.rows(sql.clone()).await?;
        let row = rows.into_iter().next().ok_or_else(|| SqlError::Shape {
            sql: sql.clone(),
            detail: format!("no statistics row for {table}"),
        })?;
        let read = |idx: usize| row.get(idx).and_then(SqlValue::as_u64).unwrap_or(0);
        Ok(TableStats {
            rows: read(0),
            bytes: read(1),
        })
    }

    async fn primary_key(&self, table: &TableRef) -> Result<Vec<String>, SqlError> {
        self.names(queries::primary_key_columns(table)).await
    }

    async fn index_columns(&self, table: &TableRef, index: &str) -> Result<Vec<String>, SqlError> {
        self.names(queries::index_columns(table, index)).await
    }

    async fn column_domain(&self, table: &TableRef, column: &str) -> Result<ColumnDomain, SqlError> {
        let column_type = if column == HIDDEN_ROWID {
            ColumnType::Integer { unsigned: false }
        } else {
            let sql = queries::column_type(table, column);
            let rows = self.rows(sql.clone()).await?;
            let row = rows.into_iter().next().ok_or_else(|| SqlError::Shape {
                sql,
                detail: format!("column {column} not found on {table}"),
            })?;
            let text = |idx: usize| match row.get(idx) {
                Some(SqlValue::Text(s)) => s.clone(),
                Some(SqlValue::Bytes(b)) => String::from_utf8_lossy(b).into_owned(),
                _ => String::new(),
            };
            let scale = row.get(2).and_then(SqlValue::as_u64).map(|s| s as u32);
            ColumnType::from_information_schema(&text(0), &text(1), scale)
        };

        let sql = queries::min_max(table, column);
        let mut rows = self.rows(sql.clone()).await?;
        if rows.is_empty() {
            return Err(SqlError::Shape {
                sql,
                detail: "aggregate returned no row".to_string(),
            });
        }
        let mut values = std::mem::take(&mut rows[0].values).into_iter();
        let min = values.next().unwrap_or(SqlValue::Null);
        let max = values.next().unwrap_or(SqlValue::Null);
        Ok(ColumnDomain::new(column, column_type, min, max))
    }

    async fn distinct_count(&self, table: &TableRef, columns: &[String]) -> Result<u64, SqlError> {
        self.count(queries::distinct_count(table, columns)).await
    }

    async fn distinct_values(
        &self,
        table: &TableRef,
        columns: &[String],
    ) -> Result<Vec<Vec<SqlValue>>, SqlError> {
        let rows = self.rows(queries::distinct_values(table, columns)).await?;
        Ok(rows.into_iter().map(Row::into_values).collect())
    }

    async fn distinct_page(
        &self,
        table: &TableRef,
        columns: &[String],
        after: Option<&[SqlValue]>,
        limit: usize,
    ) -> Result<Vec<Vec<SqlValue>>, SqlError> {
        let rows = self
            .rows(queries::distinct_page(table, columns, after, limit))
            .await?;
        Ok(rows.into_iter().map(Row::into_values).collect())
    }
}
