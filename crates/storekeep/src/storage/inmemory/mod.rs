//! In-memory storage backend.
//!
//! Keeps every item in a `BTreeMap` wrapped in `Arc<RwLock<_>>` and mirrors
//! the DynamoDB backend's observable behavior: puts replace whole items,
//! updates upsert, deletes of missing keys succeed, and scans return every
//! item. Used by the handler tests and by the `inmemory` feature for running
//! the handlers without AWS.
//!
//! # Example
//!
//! ```rust,ignore
//! use storekeep::storage::inmemory::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! // Use store for testing...
//! ```

mod repository;

pub use repository::InMemoryStore;
