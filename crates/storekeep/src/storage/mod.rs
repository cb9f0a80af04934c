//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `ItemStore` trait
//! defined in `storekeep_core::storage`. The backend is selected at compile
//! time via feature flags.
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): AWS DynamoDB backend using `aws-sdk-dynamodb`
//! - `inmemory`: process-local backend, for running the handlers without AWS
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time. The in-memory backend is always compiled for tests.
//!
//! # Examples
//!
//! Build with DynamoDB (default):
//! ```bash
//! cargo build -p storekeep
//! ```
//!
//! Build with the in-memory backend:
//! ```bash
//! cargo build -p storekeep --no-default-features --features inmemory
//! ```

#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!(
    "Features 'inmemory' and 'dynamodb' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No storage backend selected. Enable 'dynamodb' or 'inmemory' feature. \
    Example: cargo build -p storekeep --features dynamodb"
);

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(any(test, feature = "inmemory"))]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbStore;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryStore;
