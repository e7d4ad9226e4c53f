use thiserror::Error;

/// Errors raised while loading or resolving table descriptors
#[derive(Error, Debug)]
pub enum IntrospectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid table descriptor JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Table '{table}' has no column named '{column}'")]
    UnknownColumn { table: String, column: String },

    #[error("Table '{table}' is invalid: {message}")]
    InvalidTable { table: String, message: String },

    #[error("Table '{0}' is declared more than once")]
    DuplicateTable(String),
}

pub type IntrospectResult<T> = Result<T, IntrospectError>;
