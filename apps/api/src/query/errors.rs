use thiserror::Error;

/// Errors raised while executing a built query
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Expected at most one result but found {0}")]
    NonUniqueResult(usize),

    #[error("Expression is not part of the selection: {0}")]
    MissingColumn(String),
}

pub type QueryResult<T> = Result<T, QueryError>;
