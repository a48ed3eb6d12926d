use chrono::{DateTime, Datelike, NaiveDate};

use crate::engine::errors::SplitError;
use crate::engine::types::{ColumnDomain, ColumnType, SqlValue};

/// Interior boundaries `min + i * (max - min) / n` for `i = 1 .. n - 1`,
/// rounded down to the column's storage granularity. Values that collapse
/// onto a neighbour or onto `min`/`max` are dropped, so the result is
/// strictly increasing and strictly inside the domain.
pub fn interpolate(domain: &ColumnDomain, n: u64) -> Result<Vec<SqlValue>, SplitError> {
    if !domain.column_type.is_interpolable() {
        return Err(unorderable(domain, format!("type {}", domain.column_type)));
    }
    if domain.is_empty() {
        return Err(SplitError::EmptyDomain(format!(
            "column {} has no values",
            domain.name
        )));
    }
    if n <= 1 {
        return Ok(Vec::new());
    }

    match domain.column_type {
        ColumnType::Integer { .. } => integers(domain, n),
        ColumnType::Decimal { scale } => decimals(domain, n, scale),
        ColumnType::Float => floats(domain, n),
        ColumnType::Date => dates(domain, n),
        ColumnType::DateTime => datetimes(domain, n),
        _ => Err(unorderable(domain, format!("type {}", domain.column_type))),
    }
}

fn unorderable(domain: &ColumnDomain, reason: String) -> SplitError {
    SplitError::UnorderableDomain {
        column: domain.name.clone(),
        reason,
    }
}

/// Evenly spaced interior steps over `[lo, hi]` in integer units.
fn steps(lo: i128, hi: i128, n: u64) -> Vec<i128> {
    let span = hi - lo;
    let mut out: Vec<i128> = Vec::new();
    for i in 1..n as i128 {
        let v = lo + (i * span).div_euclid(n as i128);
        if v > lo && v < hi && out.last().is_none_or(|last| *last < v) {
            out.push(v);
        }
    }
    out
}

fn integers(domain: &ColumnDomain, n: u64) -> Result<Vec<SqlValue>, SplitError> {
    let (lo, hi) = match (domain.min.as_i128(), domain.max.as_i128()) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => return Err(unorderable(domain, "non-integer bounds".to_string())),
    };
    let unsigned = matches!(domain.column_type, ColumnType::Integer { unsigned: true })
        || matches!(domain.min, SqlValue::UInt(_));
    Ok(steps(lo, hi, n)
        .into_iter()
        .map(|v| {
            if unsigned {
                SqlValue::UInt(v as u64)
            } else {
                SqlValue::Int(v as i64)
            }
        })
        .collect())
}

fn decimals(domain: &ColumnDomain, n: u64, scale: u32) -> Result<Vec<SqlValue>, SplitError> {
    let bound = |v: &SqlValue| match v {
        SqlValue::Decimal(s) | SqlValue::Text(s) => parse_scaled(s, scale),
        other => other.as_i128().map(|i| i * 10i128.pow(scale)),
    };
    let (lo, hi) = match (bound(&domain.min), bound(&domain.max)) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => return Err(unorderable(domain, "unparseable decimal bounds".to_string())),
    };
    Ok(steps(lo, hi, n)
        .into_iter()
        .map(|v| SqlValue::Decimal(format_scaled(v, scale)))
        .collect())
}

fn floats(domain: &ColumnDomain, n: u64) -> Result<Vec<SqlValue>, SplitError> {
    let (lo, hi) = match (domain.min.as_f64(), domain.max.as_f64()) {
        (Some(lo), Some(hi)) if lo.is_finite() && hi.is_finite() => (lo, hi),
        _ => return Err(unorderable(domain, "non-finite float bounds".to_string())),
    };
    let mut out: Vec<SqlValue> = Vec::new();
    let mut last = lo;
    for i in 1..n {
        let v = lo + (i as f64) * (hi - lo) / (n as f64);
        if v > last && v < hi {
            out.push(SqlValue::Double(v));
            last = v;
        }
    }
    Ok(out)
}

fn dates(domain: &ColumnDomain, n: u64) -> Result<Vec<SqlValue>, SplitError> {
    let (lo, hi) = match (&domain.min, &domain.max) {
        (SqlValue::Date(a), SqlValue::Date(b)) => {
            (a.num_days_from_ce() as i128, b.num_days_from_ce() as i128)
        }
        _ => return Err(unorderable(domain, "non-date bounds".to_string())),
    };
    Ok(steps(lo, hi, n)
        .into_iter()
        .filter_map(|d| NaiveDate::from_num_days_from_ce_opt(d as i32).map(SqlValue::Date))
        .collect())
}

fn datetimes(domain: &ColumnDomain, n: u64) -> Result<Vec<SqlValue>, SplitError> {
    let (lo, hi) = match (&domain.min, &domain.max) {
        (SqlValue::DateTime(a), SqlValue::DateTime(b)) => (
            a.and_utc().timestamp() as i128,
            b.and_utc().timestamp() as i128,
        ),
        _ => return Err(unorderable(domain, "non-datetime bounds".to_string())),
    };
    Ok(steps(lo, hi, n)
        .into_iter()
        .filter_map(|secs| DateTime::from_timestamp(secs as i64, 0))
        .map(|dt| SqlValue::DateTime(dt.naive_utc()))
        .collect())
}

/// `"12.5"` at scale 2 becomes `1250`. Extra fraction digits are truncated.
pub fn parse_scaled(s: &str, scale: u32) -> Option<i128> {
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    let mut frac: String = frac_part.chars().take(scale as usize).collect();
    while frac.len() < scale as usize {
        frac.push('0');
    }
    let int_val: i128 = if int_part.is_empty() { 0 } else { int_part.parse().ok()? };
    let frac_val: i128 = if frac.is_empty() { 0 } else { frac.parse().ok()? };
    let value = int_val.checked_mul(10i128.pow(scale))?.checked_add(frac_val)?;
    Some(if negative { -value } else { value })
}

/// Inverse of [`parse_scaled`].
pub fn format_scaled(v: i128, scale: u32) -> String {
    if scale == 0 {
        return v.to_string();
    }
    let factor = 10i128.pow(scale);
    let sign = if v < 0 { "-" } else { "" };
    let abs = v.abs();
    format!(
        "{sign}{}.{:0width$}",
        abs / factor,
        abs % factor,
        width = scale as usize
    )
}
