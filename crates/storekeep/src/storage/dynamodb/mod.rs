//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of [`ItemStore`]
//! using `aws-sdk-dynamodb`.
//!
//! [`ItemStore`]: storekeep_core::storage::ItemStore

mod client;
mod error;
mod repository;

pub use repository::DynamoDbStore;
