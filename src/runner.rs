use crate::demo::{StatementMode, StatementRequest};
use crate::error::DealerDbError;
use crate::executor::SqlExecutor;
use crate::session::DatabaseSession;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Outcome of one statement: `rows` is the affected count for writes and
/// the returned count for reads; `error` is the driver message when the
/// operation failed.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub description: String,
    pub mode: StatementMode,
    pub elapsed: Duration,
    pub rows: u64,
    pub error: Option<String>,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub outcomes: Vec<RunOutcome>,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Sequential driver for a statement batch. Statements run strictly in
/// program order; each one's connection is closed before the next starts,
/// and a failed statement is recorded without stopping the batch.
pub struct BatchRunner<E> {
    session: DatabaseSession<E>,
}

impl<E: SqlExecutor> BatchRunner<E> {
    pub fn new(executor: E) -> Self {
        Self {
            session: DatabaseSession::new(executor),
        }
    }

    pub fn session(&self) -> &DatabaseSession<E> {
        &self.session
    }

    pub async fn run(&self, statements: &[StatementRequest]) -> RunReport {
        let started_at = Utc::now();
        let mut outcomes = Vec::with_capacity(statements.len());

        for request in statements {
            let start = Instant::now();
            let result = match request.mode {
                StatementMode::Write => {
                    self.session
                        .execute_command(&request.sql, &request.description)
                        .await
                }
                StatementMode::ReadOnly => self
                    .session
                    .run_query(&request.sql, &request.description)
                    .await
                    .map(|table| table.rows().len() as u64),
            };
            let elapsed = start.elapsed();

            let outcome = match result {
                Ok(rows) => {
                    info!(
                        description = %request.description,
                        rows,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "operation succeeded"
                    );
                    RunOutcome {
                        description: request.description.clone(),
                        mode: request.mode,
                        elapsed,
                        rows,
                        error: None,
                    }
                }
                Err(err) => {
                    let message = match &err {
                        DealerDbError::Operation { message, .. } => message.clone(),
                        other => other.to_string(),
                    };
                    warn!(
                        description = %request.description,
                        error = %message,
                        "operation failed, continuing"
                    );
                    RunOutcome {
                        description: request.description.clone(),
                        mode: request.mode,
                        elapsed,
                        rows: 0,
                        error: Some(message),
                    }
                }
            };
            outcomes.push(outcome);
        }

        RunReport {
            started_at,
            outcomes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::dealership_demo;
    use crate::executor::{MockExecutor, StatementKind};
    use crate::table::ResultTable;

    fn one_row_table() -> ResultTable {
        ResultTable::new(
            vec!["full_name".to_string()],
            vec![vec!["Елена Волкова".to_string()]],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_statements_run_in_catalog_order() {
        let runner = BatchRunner::new(MockExecutor::new());
        let demo = dealership_demo();
        runner.run(&demo).await;

        let executed = runner.session().executor().statements();
        assert_eq!(executed.len(), demo.len());
        for (request, (_, sql)) in demo.iter().zip(&executed) {
            assert_eq!(&request.sql, sql);
        }
    }

    #[tokio::test]
    async fn test_writes_dispatch_to_execute_and_reads_to_query() {
        let runner = BatchRunner::new(MockExecutor::new());
        let demo = dealership_demo();
        runner.run(&demo).await;

        let executed = runner.session().executor().statements();
        for (request, (kind, _)) in demo.iter().zip(&executed) {
            let expected = match request.mode {
                StatementMode::Write => StatementKind::Execute,
                StatementMode::ReadOnly => StatementKind::Query,
            };
            assert_eq!(*kind, expected, "wrong dispatch for {}", request.description);
        }
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_batch() {
        let runner = BatchRunner::new(MockExecutor::new().with_failure("UPDATE cars"));
        let demo = dealership_demo();
        let report = runner.run(&demo).await;

        assert_eq!(report.outcomes.len(), 10);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.succeeded(), 9);
        assert!(!report.outcomes[1].is_success());
        // Everything after the failure still ran.
        assert_eq!(runner.session().executor().statements().len(), 10);
    }

    #[tokio::test]
    async fn test_report_counts_read_rows() {
        let executor = MockExecutor::new().with_canned_table("WHERE s.id IS NULL", one_row_table());
        let runner = BatchRunner::new(executor);
        let report = runner.run(&dealership_demo()).await;

        let clients_without_purchases = &report.outcomes[4];
        assert_eq!(clients_without_purchases.rows, 1);
        assert!(clients_without_purchases.is_success());
    }

    #[tokio::test]
    async fn test_all_failures_are_recorded() {
        let executor = MockExecutor::new()
            .with_failure("INSERT INTO clients")
            .with_failure("DELETE FROM clients");
        let runner = BatchRunner::new(executor);
        let report = runner.run(&dealership_demo()).await;

        assert_eq!(report.failed(), 2);
        for outcome in report.outcomes.iter().filter(|o| !o.is_success()) {
            assert!(outcome.error.as_deref().unwrap().contains("scripted failure"));
        }
    }
}
