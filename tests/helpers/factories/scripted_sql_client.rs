use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::engine::errors::SqlError;
use crate::engine::sql::{Row, SqlClient};
use crate::engine::types::SqlValue;

/// `SqlClient` answering by substring match on the SQL text. The first
/// registered pattern contained in the query wins; unmatched queries
/// return no rows.
pub struct ScriptedSqlClient {
    responses: Vec<(String, Result<Vec<Vec<SqlValue>>, String>)>,
    recorder: Arc<Mutex<Vec<String>>>,
}

impl ScriptedSqlClient {
    pub fn new() -> Self {
        Self {
            responses: Vec::new(),
            recorder: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn respond(mut self, pattern: &str, rows: Vec<Vec<SqlValue>>) -> Self {
        self.responses.push((pattern.to_string(), Ok(rows)));
        self
    }

    pub fn fail(mut self, pattern: &str, message: &str) -> Self {
        self.responses
            .push((pattern.to_string(), Err(message.to_string())));
        self
    }

    /// Every SQL text received, in order.
    pub fn recorder(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.recorder)
    }
}

#[async_trait]
impl SqlClient for ScriptedSqlClient {
    async fn query_rows(&self, sql: &str) -> Result<Vec<Row>, SqlError> {
        self.recorder.lock().push(sql.to_string());
        let matched = self
            .responses
            .iter()
            .find(|(pattern, _)| sql.contains(pattern.as_str()));
        match matched {
            Some((_, Ok(rows))) => Ok(rows.iter().cloned().map(Row::new).collect()),
            Some((_, Err(message))) => Err(SqlError::Server {
                sql: sql.to_string(),
                message: message.clone(),
            }),
            None => Ok(Vec::new()),
        }
    }
}
