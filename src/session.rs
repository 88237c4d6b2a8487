use crate::error::{DealerDbError, Result};
use crate::executor::SqlExecutor;
use crate::table::ResultTable;
use colored::Colorize;
use tracing::debug;

/// Console-reporting wrapper over an executor. Each call is an
/// independent unit of work; the session holds no state beyond the
/// executor itself.
pub struct DatabaseSession<E> {
    executor: E,
}

impl<E: SqlExecutor> DatabaseSession<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Runs a write statement transactionally. Prints a `[SUCCESS]` line
    /// on commit; on failure prints an `[ERROR]` line to stderr and
    /// returns the operation error so the caller can count it. Failure is
    /// never fatal.
    pub async fn execute_command(&self, sql: &str, description: &str) -> Result<u64> {
        match self.executor.execute(sql).await {
            Ok(rows) => {
                println!("{} {}", "[SUCCESS]".green(), description);
                debug!(rows, description, "write committed");
                Ok(rows)
            }
            Err(err) => {
                let err = DealerDbError::operation(description, &err);
                eprintln!("{} {}", "[ERROR]".red(), err);
                Err(err)
            }
        }
    }

    /// Runs a read-only query and prints the titled result table, or
    /// `No data.` for an empty result set (never a header-only table).
    /// On failure prints an `[ERROR]` line to stderr and produces no
    /// table output.
    pub async fn run_query(&self, sql: &str, title: &str) -> Result<ResultTable> {
        match self.executor.query(sql).await {
            Ok(table) => {
                println!("\n--- {title} ---");
                if table.is_empty() {
                    println!("No data.");
                } else {
                    print!("{}", table.render());
                }
                Ok(table)
            }
            Err(err) => {
                let err = DealerDbError::operation(title, &err);
                eprintln!("{} {}", "[ERROR]".red(), err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::MockExecutor;

    #[tokio::test]
    async fn test_execute_command_reports_affected_rows() {
        let session = DatabaseSession::new(MockExecutor::new().with_rows_affected(3));
        let rows = session
            .execute_command("UPDATE cars SET price = 1", "bulk reprice")
            .await
            .unwrap();
        assert_eq!(rows, 3);
    }

    #[tokio::test]
    async fn test_execute_command_failure_carries_description() {
        let session = DatabaseSession::new(MockExecutor::new().with_failure("INSERT"));
        let err = session
            .execute_command("INSERT INTO clients VALUES (1)", "add client")
            .await
            .unwrap_err();
        match err {
            DealerDbError::Operation {
                description,
                message,
            } => {
                assert_eq!(description, "add client");
                assert!(message.contains("scripted failure"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_run_query_returns_empty_table_for_no_rows() {
        let session = DatabaseSession::new(MockExecutor::new());
        let table = session
            .run_query("SELECT * FROM sales", "sales")
            .await
            .unwrap();
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn test_run_query_failure_is_an_operation_error() {
        let session = DatabaseSession::new(MockExecutor::new().with_failure("SELECT"));
        let err = session
            .run_query("SELECT * FROM sales", "sales")
            .await
            .unwrap_err();
        assert!(matches!(err, DealerDbError::Operation { .. }));
    }
}
