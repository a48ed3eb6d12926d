use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use async_trait::async_trait;

use crate::engine::errors::SqlError;
use crate::engine::sql::{TableReader, TableStats};
use crate::engine::types::value::compare_tuples;
use crate::engine::types::{ColumnDomain, ColumnType, SqlValue, TableRef};

/// One column's values, row `i` of the table at index `i`.
#[derive(Debug, Clone)]
struct MemoryColumn {
    column_type: ColumnType,
    values: Vec<SqlValue>,
}

/// In-memory table definition for [`MemoryTableReader`].
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    stats: TableStats,
    primary_key: Vec<String>,
    indexes: HashMap<String, Vec<String>>,
    columns: HashMap<String, MemoryColumn>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(mut self, rows: u64, bytes: u64) -> Self {
        self.stats = TableStats { rows, bytes };
        self
    }

    /// Clustered primary key columns.
    pub fn primary_key(mut self, columns: &[&str]) -> Self {
        self.primary_key = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn index(mut self, name: &str, columns: &[&str]) -> Self {
        self.indexes.insert(
            name.to_string(),
            columns.iter().map(|c| c.to_string()).collect(),
        );
        self
    }

    pub fn column(mut self, name: &str, column_type: ColumnType, values: Vec<SqlValue>) -> Self {
        self.columns.insert(
            name.to_string(),
            MemoryColumn {
                column_type,
                values,
            },
        );
        self
    }

    /// Signed integer column holding `values` in row order.
    pub fn int_column(self, name: &str, values: impl IntoIterator<Item = i64>) -> Self {
        let values = values.into_iter().map(SqlValue::Int).collect();
        self.column(name, ColumnType::Integer { unsigned: false }, values)
    }

    fn column_data(&self, table: &TableRef, name: &str) -> Result<&MemoryColumn, SqlError> {
        self.columns.get(name).ok_or_else(|| SqlError::Server {
            sql: format!("SELECT {name} FROM {table}"),
            message: format!("Unknown column '{name}'"),
        })
    }

    /// Distinct tuples with no NULL member, ascending.
    fn tuples(&self, table: &TableRef, columns: &[String]) -> Result<Vec<Vec<SqlValue>>, SqlError> {
        let data = columns
            .iter()
            .map(|c| self.column_data(table, c))
            .collect::<Result<Vec<_>, _>>()?;
        let rows = data.iter().map(|c| c.values.len()).min().unwrap_or(0);

        let mut out: Vec<Vec<SqlValue>> = (0..rows)
            .map(|i| data.iter().map(|c| c.values[i].clone()).collect::<Vec<_>>())
            .filter(|tuple| tuple.iter().all(|v| !v.is_null()))
            .collect();
        out.sort_by(|a, b| compare_tuples(a, b).unwrap_or(Ordering::Equal));
        out.dedup();
        Ok(out)
    }
}

/// `TableReader` over in-memory tables.
pub struct MemoryTableReader {
    databases: HashSet<String>,
    tables: BTreeMap<TableRef, MemoryTable>,
    failing: HashSet<TableRef>,
    stuck_pages: bool,
    page_reads: AtomicUsize,
    value_reads: AtomicUsize,
}

impl MemoryTableReader {
    pub fn new() -> Self {
        Self {
            databases: HashSet::new(),
            tables: BTreeMap::new(),
            failing: HashSet::new(),
            stuck_pages: false,
            page_reads: AtomicUsize::new(0),
            value_reads: AtomicUsize::new(0),
        }
    }

    pub fn database(mut self, db: &str) -> Self {
        self.databases.insert(db.to_string());
        self
    }

    pub fn table(mut self, table: TableRef, definition: MemoryTable) -> Self {
        self.databases.insert(table.schema.clone());
        self.tables.insert(table, definition);
        self
    }

    /// Every data read of `table` fails with a server error.
    pub fn failing(mut self, table: TableRef) -> Self {
        self.databases.insert(table.schema.clone());
        self.tables.entry(table.clone()).or_default();
        self.failing.insert(table);
        self
    }

    /// Pages ignore their cursor and restart from the beginning.
    pub fn stuck_pages(mut self) -> Self {
        self.stuck_pages = true;
        self
    }

    pub fn page_reads(&self) -> usize {
        self.page_reads.load(AtomicOrdering::SeqCst)
    }

    pub fn value_reads(&self) -> usize {
        self.value_reads.load(AtomicOrdering::SeqCst)
    }

    fn lookup(&self, table: &TableRef) -> Result<&MemoryTable, SqlError> {
        if self.failing.contains(table) {
            return Err(SqlError::Server {
                sql: format!("SELECT ... FROM {}", table.quoted()),
                message: "Lost connection to server during query".to_string(),
            });
        }
        self.tables.get(table).ok_or_else(|| SqlError::Server {
            sql: format!("SELECT ... FROM {}", table.quoted()),
            message: format!("Table '{table}' doesn't exist"),
        })
    }
}

#[async_trait]
impl TableReader for MemoryTableReader {
    async fn database_exists(&self, db: &str) -> Result<bool, SqlError> {
        Ok(self.databases.contains(db))
    }

    async fn list_tables(&self, db: &str) -> Result<Vec<String>, SqlError> {
        Ok(self
            .tables
            .keys()
            .filter(|t| t.schema == db)
            .map(|t| t.name.clone())
            .collect())
    }

    async fn table_stats(&self, table: &TableRef) -> Result<TableStats, SqlError> {
        Ok(self.lookup(table)?.stats)
    }

    async fn primary_key(&self, table: &TableRef) -> Result<Vec<String>, SqlError> {
        Ok(self.lookup(table)?.primary_key.clone())
    }

    async fn index_columns(&self, table: &TableRef, index: &str) -> Result<Vec<String>, SqlError> {
        Ok(self
            .lookup(table)?
            .indexes
            .get(index)
            .cloned()
            .unwrap_or_default())
    }

    async fn column_domain(&self, table: &TableRef, column: &str) -> Result<ColumnDomain, SqlError> {
        let data = self.lookup(table)?.column_data(table, column)?;
        let mut min = SqlValue::Null;
        let mut max = SqlValue::Null;
        for v in data.values.iter().filter(|v| !v.is_null()) {
            if min.is_null() || v.compare(&min) == Some(Ordering::Less) {
                min = v.clone();
            }
            if max.is_null() || v.compare(&max) == Some(Ordering::Greater) {
                max = v.clone();
            }
        }
        Ok(ColumnDomain::new(column, data.column_type, min, max))
    }

    async fn distinct_count(&self, table: &TableRef, columns: &[String]) -> Result<u64, SqlError> {
        Ok(self.lookup(table)?.tuples(table, columns)?.len() as u64)
    }

    async fn distinct_values(
        &self,
        table: &TableRef,
        columns: &[String],
    ) -> Result<Vec<Vec<SqlValue>>, SqlError> {
        self.value_reads.fetch_add(1, AtomicOrdering::SeqCst);
        self.lookup(table)?.tuples(table, columns)
    }

    async fn distinct_page(
        &self,
        table: &TableRef,
        columns: &[String],
        after: Option<&[SqlValue]>,
        limit: usize,
    ) -> Result<Vec<Vec<SqlValue>>, SqlError> {
        self.page_reads.fetch_add(1, AtomicOrdering::SeqCst);
        let tuples = self.lookup(table)?.tuples(table, columns)?;
        let after = if self.stuck_pages { None } else { after };
        Ok(tuples
            .into_iter()
            .filter(|t| match after {
                Some(cursor) => compare_tuples(t, cursor) == Some(Ordering::Greater),
                None => true,
            })
            .take(limit)
            .collect())
    }
}
