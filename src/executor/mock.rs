use super::SqlExecutor;
use crate::error::{DealerDbError, Result};
use crate::table::ResultTable;
use async_trait::async_trait;
use std::sync::Mutex;

/// Which trait method a statement went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Execute,
    Query,
}

/// In-memory stand-in for [`PostgresExecutor`](super::PostgresExecutor),
/// scripted per test: canned result tables and failures keyed by SQL
/// substring, plus a log of every statement it saw.
#[derive(Debug, Default)]
pub struct MockExecutor {
    canned: Vec<(String, ResultTable)>,
    failures: Vec<String>,
    rows_affected: u64,
    log: Mutex<Vec<(StatementKind, String)>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self {
            rows_affected: 1,
            ..Default::default()
        }
    }

    /// Statements containing `sql_needle` return `table` from `query`.
    pub fn with_canned_table(mut self, sql_needle: &str, table: ResultTable) -> Self {
        self.canned.push((sql_needle.to_string(), table));
        self
    }

    /// Statements containing `sql_needle` fail, from either method.
    pub fn with_failure(mut self, sql_needle: &str) -> Self {
        self.failures.push(sql_needle.to_string());
        self
    }

    pub fn with_rows_affected(mut self, rows: u64) -> Self {
        self.rows_affected = rows;
        self
    }

    /// Every statement executed so far, in order.
    pub fn statements(&self) -> Vec<(StatementKind, String)> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, kind: StatementKind, sql: &str) {
        self.log.lock().unwrap().push((kind, sql.to_string()));
    }

    fn fail_if_scripted(&self, sql: &str) -> Result<()> {
        match self.failures.iter().find(|needle| sql.contains(needle.as_str())) {
            Some(needle) => Err(DealerDbError::Execution(format!(
                "scripted failure for '{needle}'"
            ))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SqlExecutor for MockExecutor {
    async fn execute(&self, sql: &str) -> Result<u64> {
        self.record(StatementKind::Execute, sql);
        self.fail_if_scripted(sql)?;
        Ok(self.rows_affected)
    }

    async fn query(&self, sql: &str) -> Result<ResultTable> {
        self.record(StatementKind::Query, sql);
        self.fail_if_scripted(sql)?;
        let table = self
            .canned
            .iter()
            .find(|(needle, _)| sql.contains(needle.as_str()))
            .map(|(_, table)| table.clone())
            .unwrap_or_else(ResultTable::empty);
        Ok(table)
    }
}
