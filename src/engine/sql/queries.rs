//! SQL text for every catalog and data read the planners issue.
//!
//! Value reads skip rows with a NULL in any selected column so that
//! `COUNT(DISTINCT ...)` and the value listings agree on positions.

use crate::engine::types::{SqlValue, TableRef, quote_ident};

use super::literal::{format_tuple, quote_string};

pub fn schema_exists(db: &str) -> String {
    format!(
        "SELECT COUNT(*) FROM information_schema.SCHEMATA WHERE SCHEMA_NAME = {}",
        quote_string(db)
    )
}

pub fn list_tables(db: &str) -> String {
    format!(
        "SELECT TABLE_NAME FROM information_schema.TABLES \
         WHERE TABLE_SCHEMA = {} AND TABLE_TYPE = 'BASE TABLE' ORDER BY TABLE_NAME",
        quote_string(db)
    )
}

pub fn table_stats(table: &TableRef) -> String {
    format!(
        "SELECT TABLE_ROWS, DATA_LENGTH + INDEX_LENGTH FROM information_schema.TABLES \
         WHERE {}",
        table_filter(table)
    )
}

/// Columns of a clustered primary key. Non-clustered tables are keyed by
/// the hidden row id and yield no rows here.
pub fn primary_key_columns(table: &TableRef) -> String {
    let filter = table_filter(table);
    format!(
        "SELECT COLUMN_NAME FROM information_schema.KEY_COLUMN_USAGE \
         WHERE {filter} AND CONSTRAINT_NAME = 'PRIMARY' \
         AND EXISTS (SELECT 1 FROM information_schema.TABLES \
         WHERE {filter} AND TIDB_PK_TYPE = 'CLUSTERED') \
         ORDER BY ORDINAL_POSITION"
    )
}

pub fn index_columns(table: &TableRef, index: &str) -> String {
    format!(
        "SELECT COLUMN_NAME FROM information_schema.STATISTICS \
         WHERE {} AND INDEX_NAME = {} ORDER BY SEQ_IN_INDEX",
        table_filter(table),
        quote_string(index)
    )
}

pub fn column_type(table: &TableRef, column: &str) -> String {
    format!(
        "SELECT DATA_TYPE, COLUMN_TYPE, NUMERIC_SCALE FROM information_schema.COLUMNS \
         WHERE {} AND COLUMN_NAME = {}",
        table_filter(table),
        quote_string(column)
    )
}

pub fn min_max(table: &TableRef, column: &str) -> String {
    let col = quote_ident(column);
    format!("SELECT MIN({col}), MAX({col}) FROM {}", table.quoted())
}

pub fn distinct_count(table: &TableRef, columns: &[String]) -> String {
    format!(
        "SELECT COUNT(DISTINCT {}) FROM {}",
        column_list(columns),
        table.quoted()
    )
}

pub fn distinct_values(table: &TableRef, columns: &[String]) -> String {
    let cols = column_list(columns);
    format!(
        "SELECT DISTINCT {cols} FROM {} WHERE {} ORDER BY {cols}",
        table.quoted(),
        not_null(columns)
    )
}

/// Keyset page: values strictly after `after`, never an OFFSET.
pub fn distinct_page(
    table: &TableRef,
    columns: &[String],
    after: Option<&[SqlValue]>,
    limit: usize,
) -> String {
    let cols = column_list(columns);
    let mut predicate = not_null(columns);
    if let Some(cursor) = after {
        predicate.push_str(&format!(" AND ({cols}) > {}", format_tuple(cursor)));
    }
    format!(
        "SELECT DISTINCT {cols} FROM {} WHERE {predicate} ORDER BY {cols} LIMIT {limit}",
        table.quoted()
    )
}

fn table_filter(table: &TableRef) -> String {
    format!(
        "TABLE_SCHEMA = {} AND TABLE_NAME = {}",
        quote_string(&table.schema),
        quote_string(&table.name)
    )
}

fn column_list(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ")
}

fn not_null(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| format!("{} IS NOT NULL", quote_ident(c)))
        .collect::<Vec<_>>()
        .join(" AND ")
}
