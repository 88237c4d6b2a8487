use thiserror::Error;

#[derive(Error, Debug)]
pub enum DealerDbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("execution error: {0}")]
    Execution(String),

    #[error("malformed result table: {0}")]
    Table(String),

    /// An operation-level failure: the statement's human-readable
    /// description or report title plus the underlying driver message.
    #[error("{description}: {message}")]
    Operation {
        description: String,
        message: String,
    },
}

impl DealerDbError {
    pub fn operation(description: impl Into<String>, source: &DealerDbError) -> Self {
        DealerDbError::Operation {
            description: description.into(),
            message: source.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DealerDbError>;
