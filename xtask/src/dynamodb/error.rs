//! Error types for DynamoDB operations.

use thiserror::Error;

/// Result type alias for dynamodb module.
pub type Result<T> = std::result::Result<T, DynamodbError>;

/// Errors that can occur during DynamoDB operations.
#[derive(Error, Debug)]
pub enum DynamodbError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("Table '{table_name}' not found")]
    TableNotFound { table_name: String },

    #[error("Table '{table_name}' has key schema [{found}], expected [{expected}]")]
    KeySchemaMismatch {
        table_name: String,
        expected: String,
        found: String,
    },

    #[error("Sample store could not be marshalled: {0}")]
    Marshal(#[from] storekeep_core::marshal::MarshalError),

    #[error("{0} items were left unprocessed by BatchWriteItem")]
    UnprocessedItems(usize),

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Timeout waiting for table to become active")]
    TableActivationTimeout,

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}
