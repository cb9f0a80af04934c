use async_trait::async_trait;

use crate::item::WireItem;

use super::{ItemUpdate, Result, ScanOutput, WriteAck};

/// Single-table item store keyed by `storeId`.
///
/// Implementations hold only connection configuration and must be safe to
/// share across concurrent invocations.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Gets an item by its store id.
    async fn get_item(&self, store_id: &str) -> Result<Option<WireItem>>;

    /// Writes an item, replacing any item with the same key.
    async fn put_item(&self, item: WireItem) -> Result<WriteAck>;

    /// Applies a set of attribute assignments to one item.
    async fn update_item(&self, store_id: &str, update: &ItemUpdate) -> Result<WriteAck>;

    /// Deletes an item. Deleting a missing key is not an error.
    async fn delete_item(&self, store_id: &str) -> Result<WriteAck>;

    /// Reads every item in the table, in store order, without pagination.
    async fn scan(&self) -> Result<ScanOutput>;
}
