use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// A typed scalar read back from the SQL client.
///
/// Values carry enough type information to be rendered as SQL literals
/// without consulting the column declaration again.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    UInt(u64),
    Double(f64),
    /// Exact decimal kept in its textual form (`-12.50`).
    Decimal(String),
    Text(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    pub fn as_i128(&self) -> Option<i128> {
        match self {
            SqlValue::Int(i) => Some(*i as i128),
            SqlValue::UInt(u) => Some(*u as i128),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            SqlValue::UInt(u) => Some(*u),
            SqlValue::Int(i) if *i >= 0 => Some(*i as u64),
            SqlValue::Decimal(s) | SqlValue::Text(s) => s.trim().parse().ok(),
            SqlValue::Double(f) if *f >= 0.0 => Some(*f as u64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SqlValue::Int(i) => Some(*i as f64),
            SqlValue::UInt(u) => Some(*u as f64),
            SqlValue::Double(f) => Some(*f),
            SqlValue::Decimal(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) | SqlValue::Decimal(s) => Some(s),
            _ => None,
        }
    }

    /// Orders two values of the same family. Text is compared bytewise,
    /// which matches binary collations only; callers that need the
    /// server's collation must rely on the server's `ORDER BY`.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (SqlValue::Null, SqlValue::Null) => Some(Ordering::Equal),
            (SqlValue::Null, _) => Some(Ordering::Less),
            (_, SqlValue::Null) => Some(Ordering::Greater),
            (SqlValue::Text(a), SqlValue::Text(b)) => Some(a.cmp(b)),
            (SqlValue::Bytes(a), SqlValue::Bytes(b)) => Some(a.cmp(b)),
            (SqlValue::Date(a), SqlValue::Date(b)) => Some(a.cmp(b)),
            (SqlValue::DateTime(a), SqlValue::DateTime(b)) => Some(a.cmp(b)),
            (a, b) => {
                if let (Some(x), Some(y)) = (a.as_i128(), b.as_i128()) {
                    return Some(x.cmp(&y));
                }
                match (a.as_f64(), b.as_f64()) {
                    (Some(x), Some(y)) => x.partial_cmp(&y),
                    _ => None,
                }
            }
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => f.write_str("NULL"),
            SqlValue::Int(i) => write!(f, "{i}"),
            SqlValue::UInt(u) => write!(f, "{u}"),
            SqlValue::Double(v) => write!(f, "{v}"),
            SqlValue::Decimal(s) | SqlValue::Text(s) => f.write_str(s),
            SqlValue::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            SqlValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            SqlValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// Lexicographic comparison of two value tuples.
pub fn compare_tuples(a: &[SqlValue], b: &[SqlValue]) -> Option<Ordering> {
    for (x, y) in a.iter().zip(b.iter()) {
        match x.compare(y)? {
            Ordering::Equal => continue,
            other => return Some(other),
        }
    }
    Some(a.len().cmp(&b.len()))
}
