use thiserror::Error;

use crate::marshal::MarshalError;

/// Errors that can occur when building an update request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpdateError {
    #[error("Update requires at least one attribute")]
    NoAttributes,
    #[error("Key attribute '{0}' cannot be updated")]
    KeyAttribute(String),
}

/// Errors that can occur during store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Table not found: {0}")]
    TableNotFound(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request throttled: {0}")]
    Throttled(String),
    #[error("{operation} failed: {message}")]
    RequestFailed {
        operation: &'static str,
        message: String,
    },
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Marshalling error: {0}")]
    Marshal(#[from] MarshalError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
