use std::fmt;

use super::value::SqlValue;

/// Declared type family of a column, as reported by `information_schema.COLUMNS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer { unsigned: bool },
    Decimal { scale: u32 },
    Float,
    Text,
    Binary,
    Date,
    DateTime,
    Other,
}

impl ColumnType {
    /// Maps `DATA_TYPE`/`COLUMN_TYPE`/`NUMERIC_SCALE` onto a type family.
    pub fn from_information_schema(data_type: &str, column_type: &str, scale: Option<u32>) -> Self {
        let unsigned = column_type.to_ascii_lowercase().contains("unsigned");
        match data_type.to_ascii_lowercase().as_str() {
            "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "bigint" | "year" => {
                ColumnType::Integer { unsigned }
            }
            "decimal" | "numeric" => ColumnType::Decimal {
                scale: scale.unwrap_or(0),
            },
            "float" | "double" | "real" => ColumnType::Float,
            "char" | "varchar" | "tinytext" | "text" | "mediumtext" | "longtext" | "enum"
            | "set" => ColumnType::Text,
            "binary" | "varbinary" | "tinyblob" | "blob" | "mediumblob" | "longblob" | "bit" => {
                ColumnType::Binary
            }
            "date" => ColumnType::Date,
            "datetime" | "timestamp" => ColumnType::DateTime,
            _ => ColumnType::Other,
        }
    }

    /// Whether `min + i * (max - min) / n` is meaningful for this type.
    pub fn is_interpolable(&self) -> bool {
        matches!(
            self,
            ColumnType::Integer { .. }
                | ColumnType::Decimal { .. }
                | ColumnType::Float
                | ColumnType::Date
                | ColumnType::DateTime
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Integer { unsigned: true } => f.write_str("integer unsigned"),
            ColumnType::Integer { unsigned: false } => f.write_str("integer"),
            ColumnType::Decimal { scale } => write!(f, "decimal(scale={scale})"),
            ColumnType::Float => f.write_str("float"),
            ColumnType::Text => f.write_str("text"),
            ColumnType::Binary => f.write_str("binary"),
            ColumnType::Date => f.write_str("date"),
            ColumnType::DateTime => f.write_str("datetime"),
            ColumnType::Other => f.write_str("other"),
        }
    }
}

/// The value range a split strategy interpolates over.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDomain {
    pub name: String,
    pub column_type: ColumnType,
    pub min: SqlValue,
    pub max: SqlValue,
}

impl ColumnDomain {
    pub fn new(name: impl Into<String>, column_type: ColumnType, min: SqlValue, max: SqlValue) -> Self {
        Self {
            name: name.into(),
            column_type,
            min,
            max,
        }
    }

    /// True when the table had no non-null values in the column.
    pub fn is_empty(&self) -> bool {
        self.min.is_null() || self.max.is_null()
    }
}
