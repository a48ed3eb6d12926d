use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use mysql_async::consts::{ColumnFlags, ColumnType as WireType};
use mysql_async::prelude::Queryable;
use mysql_async::{Column, OptsBuilder, Pool, Value};
use tracing::info;

use crate::engine::errors::SqlError;
use crate::engine::types::SqlValue;
use crate::shared::config::MysqlConfig;

use super::client::{Row, SqlClient};

const BINARY_CHARSET: u16 = 63;

/// `SqlClient` over the MySQL wire protocol, pooled.
pub struct MySqlClient {
    pool: Pool,
}

impl MySqlClient {
    pub fn new(cfg: &MysqlConfig, db: &str) -> Self {
        info!(
            target: "presplit::sql",
            host = %cfg.host,
            port = cfg.port,
            db,
            "Opening connection pool"
        );
        let opts = OptsBuilder::default()
            .ip_or_hostname(cfg.host.clone())
            .tcp_port(cfg.port)
            .user(Some(cfg.user.clone()))
            .pass(Some(cfg.password.clone()))
            .db_name(Some(db.to_string()));
        Self {
            pool: Pool::new(opts),
        }
    }

    pub async fn disconnect(self) -> Result<(), SqlError> {
        self.pool
            .disconnect()
            .await
            .map_err(|e| SqlError::Connection(e.to_string()))
    }
}

#[async_trait]
impl SqlClient for MySqlClient {
    async fn query_rows(&self, sql: &str) -> Result<Vec<Row>, SqlError> {
        let mut conn = self
            .pool
            .get_conn()
            .await
            .map_err(|e| SqlError::Connection(e.to_string()))?;
        let rows: Vec<mysql_async::Row> =
            conn.query(sql).await.map_err(|e| SqlError::Server {
                sql: sql.to_string(),
                message: e.to_string(),
            })?;
        rows.into_iter().map(convert_row).collect()
    }
}

fn convert_row(row: mysql_async::Row) -> Result<Row, SqlError> {
    let columns = row.columns();
    let values = row.unwrap();
    let converted = values
        .into_iter()
        .zip(columns.iter())
        .map(|(value, column)| convert_value(value, column))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Row::new(converted))
}

fn convert_value(value: Value, column: &Column) -> Result<SqlValue, SqlError> {
    let temporal_date = matches!(column.column_type(), WireType::MYSQL_TYPE_DATE);
    Ok(match value {
        Value::NULL => SqlValue::Null,
        Value::Int(i) => SqlValue::Int(i),
        Value::UInt(u) => SqlValue::UInt(u),
        Value::Float(f) => SqlValue::Double(f as f64),
        Value::Double(d) => SqlValue::Double(d),
        Value::Date(y, mo, d, h, mi, s, us) => {
            let date = NaiveDate::from_ymd_opt(y as i32, mo as u32, d as u32)
                .ok_or_else(|| SqlError::Decode(format!("invalid date {y}-{mo}-{d}")))?;
            if temporal_date {
                SqlValue::Date(date)
            } else {
                let dt = date
                    .and_hms_micro_opt(h as u32, mi as u32, s as u32, us)
                    .ok_or_else(|| SqlError::Decode(format!("invalid time {h}:{mi}:{s}")))?;
                SqlValue::DateTime(dt)
            }
        }
        Value::Time(neg, days, h, mi, s, _) => {
            let sign = if neg { "-" } else { "" };
            SqlValue::Text(format!("{sign}{}:{mi:02}:{s:02}", days * 24 + h as u32))
        }
        Value::Bytes(bytes) => decode_text(bytes, column)?,
    })
}

/// The text protocol ships every value as bytes; recover the type from the
/// column metadata.
fn decode_text(bytes: Vec<u8>, column: &Column) -> Result<SqlValue, SqlError> {
    let unsigned = column.flags().contains(ColumnFlags::UNSIGNED_FLAG);
    let kind = column.column_type();
    if column.character_set() == BINARY_CHARSET && !is_numeric_or_temporal(kind) {
        return Ok(SqlValue::Bytes(bytes));
    }
    let text = String::from_utf8(bytes).map_err(|e| SqlError::Decode(e.to_string()))?;

    Ok(match kind {
        WireType::MYSQL_TYPE_TINY
        | WireType::MYSQL_TYPE_SHORT
        | WireType::MYSQL_TYPE_INT24
        | WireType::MYSQL_TYPE_LONG
        | WireType::MYSQL_TYPE_LONGLONG
        | WireType::MYSQL_TYPE_YEAR => {
            if unsigned {
                SqlValue::UInt(text.parse().map_err(|_| parse_err(&text, "unsigned integer"))?)
            } else {
                SqlValue::Int(text.parse().map_err(|_| parse_err(&text, "integer"))?)
            }
        }
        WireType::MYSQL_TYPE_DECIMAL | WireType::MYSQL_TYPE_NEWDECIMAL => SqlValue::Decimal(text),
        WireType::MYSQL_TYPE_FLOAT | WireType::MYSQL_TYPE_DOUBLE => {
            SqlValue::Double(text.parse().map_err(|_| parse_err(&text, "double"))?)
        }
        WireType::MYSQL_TYPE_DATE => match NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
            Ok(d) => SqlValue::Date(d),
            Err(_) => SqlValue::Text(text),
        },
        WireType::MYSQL_TYPE_DATETIME | WireType::MYSQL_TYPE_TIMESTAMP => {
            match NaiveDateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S%.f") {
                Ok(dt) => SqlValue::DateTime(dt),
                Err(_) => SqlValue::Text(text),
            }
        }
        _ => SqlValue::Text(text),
    })
}

fn parse_err(text: &str, what: &str) -> SqlError {
    SqlError::Decode(format!("cannot parse {text:?} as {what}"))
}

fn is_numeric_or_temporal(kind: WireType) -> bool {
    matches!(
        kind,
        WireType::MYSQL_TYPE_TINY
            | WireType::MYSQL_TYPE_SHORT
            | WireType::MYSQL_TYPE_INT24
            | WireType::MYSQL_TYPE_LONG
            | WireType::MYSQL_TYPE_LONGLONG
            | WireType::MYSQL_TYPE_YEAR
            | WireType::MYSQL_TYPE_DECIMAL
            | WireType::MYSQL_TYPE_NEWDECIMAL
            | WireType::MYSQL_TYPE_FLOAT
            | WireType::MYSQL_TYPE_DOUBLE
            | WireType::MYSQL_TYPE_DATE
            | WireType::MYSQL_TYPE_DATETIME
            | WireType::MYSQL_TYPE_TIMESTAMP
    )
}
