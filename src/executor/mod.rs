mod mock;
mod postgres;

pub use mock::{MockExecutor, StatementKind};
pub use postgres::PostgresExecutor;

use crate::error::Result;
use crate::table::ResultTable;
use async_trait::async_trait;

/// The seam between statement dispatch and the database driver.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Executes a write statement inside a committed transaction and
    /// returns the affected-row count.
    async fn execute(&self, sql: &str) -> Result<u64>;

    /// Runs a read-only query outside any transaction and returns the
    /// result set as text.
    async fn query(&self, sql: &str) -> Result<ResultTable>;
}
