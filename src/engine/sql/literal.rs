use crate::engine::types::SqlValue;

/// Renders a value as a SQL literal for the engine's MySQL dialect.
///
/// Numbers are unquoted, text and temporal values are single-quoted and
/// escaped, raw bytes become hex literals.
pub fn format_literal(value: &SqlValue) -> String {
    match value {
        SqlValue::Null => "NULL".to_string(),
        SqlValue::Int(i) => i.to_string(),
        SqlValue::UInt(u) => u.to_string(),
        SqlValue::Double(f) => f.to_string(),
        SqlValue::Decimal(s) if is_plain_number(s) => s.clone(),
        SqlValue::Decimal(s) | SqlValue::Text(s) => quote_string(s),
        SqlValue::Bytes(b) => format!("x'{}'", hex::encode(b)),
        SqlValue::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
        SqlValue::DateTime(dt) => format!("'{}'", dt.format("%Y-%m-%d %H:%M:%S%.f")),
    }
}

/// `(v1, v2, ...)` for a value tuple.
pub fn format_tuple(values: &[SqlValue]) -> String {
    let parts: Vec<String> = values.iter().map(format_literal).collect();
    format!("({})", parts.join(", "))
}

pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\'' => out.push_str("''"),
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x1a' => out.push_str("\\Z"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn is_plain_number(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.chars().filter(|c| *c == '.').count() <= 1
        && digits.chars().any(|c| c.is_ascii_digit())
}
