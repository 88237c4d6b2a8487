use super::SqlExecutor;
use crate::config::ConnectionConfig;
use crate::error::Result;
use crate::table::ResultTable;
use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, SimpleQueryMessage};
use tracing::debug;

/// PostgreSQL-backed executor. Opens a fresh connection per call and
/// drops it on every exit path; nothing is pooled or reused.
pub struct PostgresExecutor {
    config: ConnectionConfig,
}

impl PostgresExecutor {
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    async fn connect(&self) -> Result<Client> {
        let (client, connection) =
            tokio_postgres::connect(&self.config.conn_string(), NoTls).await?;
        // The connection task runs until the client is dropped.
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                debug!(error = %err, "postgres connection closed with error");
            }
        });
        debug!(host = %self.config.host, dbname = %self.config.dbname, "connection opened");
        Ok(client)
    }
}

#[async_trait]
impl SqlExecutor for PostgresExecutor {
    async fn execute(&self, sql: &str) -> Result<u64> {
        let mut client = self.connect().await?;
        let transaction = client.transaction().await?;
        // An early return drops the transaction uncommitted, rolling it back.
        let rows = transaction.execute(sql, &[]).await?;
        transaction.commit().await?;
        debug!(rows, "write committed");
        Ok(rows)
    }

    async fn query(&self, sql: &str) -> Result<ResultTable> {
        let client = self.connect().await?;
        // The simple-query protocol runs in autocommit, outside any
        // transaction, and returns every cell as text.
        let messages = client.simple_query(sql).await?;

        let mut columns: Vec<String> = Vec::new();
        let mut rows: Vec<Vec<String>> = Vec::new();
        for message in messages {
            match message {
                SimpleQueryMessage::RowDescription(description) => {
                    columns = description.iter().map(|c| c.name().to_string()).collect();
                }
                SimpleQueryMessage::Row(row) => {
                    if columns.is_empty() {
                        columns = row.columns().iter().map(|c| c.name().to_string()).collect();
                    }
                    let mut cells = Vec::with_capacity(row.len());
                    for idx in 0..row.len() {
                        // NULL renders as an empty cell.
                        cells.push(row.try_get(idx)?.unwrap_or_default().to_string());
                    }
                    rows.push(cells);
                }
                SimpleQueryMessage::CommandComplete(_) => {}
                _ => {}
            }
        }
        ResultTable::new(columns, rows)
    }
}
