//! In-memory item store implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use storekeep_core::item::{store_id_of, store_key, WireItem, STORE_ID_ATTRIBUTE};
use storekeep_core::storage::{ItemStore, ItemUpdate, Result, ScanOutput, StoreError, WriteAck};

/// In-memory storage backend.
///
/// Data is not persisted and will be lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    items: Arc<RwLock<BTreeMap<String, WireItem>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `items`.
    ///
    /// Items without a string `storeId` are skipped.
    #[cfg(test)]
    pub fn with_items(items: impl IntoIterator<Item = WireItem>) -> Self {
        let items = items
            .into_iter()
            .filter_map(|item| Some((store_id_of(&item)?.to_string(), item)))
            .collect();
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    /// Number of stored items.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }
}

/// Rejects key values DynamoDB would refuse.
fn check_key(store_id: &str) -> Result<()> {
    if store_id.is_empty() {
        return Err(StoreError::InvalidData(format!(
            "One or more parameter values are not valid. The AttributeValue for a key attribute cannot contain an empty string value. Key: {STORE_ID_ATTRIBUTE}"
        )));
    }
    Ok(())
}

#[async_trait]
impl ItemStore for InMemoryStore {
    async fn get_item(&self, store_id: &str) -> Result<Option<WireItem>> {
        check_key(store_id)?;
        let items = self.items.read().await;
        Ok(items.get(store_id).cloned())
    }

    async fn put_item(&self, item: WireItem) -> Result<WriteAck> {
        let store_id = store_id_of(&item)
            .ok_or_else(|| {
                StoreError::InvalidData(format!(
                    "One or more parameter values were invalid: Missing the key {STORE_ID_ATTRIBUTE} in the item"
                ))
            })?
            .to_string();
        check_key(&store_id)?;

        let mut items = self.items.write().await;
        items.insert(store_id, item);
        Ok(WriteAck::default())
    }

    async fn update_item(&self, store_id: &str, update: &ItemUpdate) -> Result<WriteAck> {
        check_key(store_id)?;
        let mut items = self.items.write().await;
        let item = items
            .entry(store_id.to_string())
            .or_insert_with(|| store_key(store_id));

        for assignment in update.assignments() {
            item.insert(assignment.attribute.clone(), assignment.value.clone());
        }
        Ok(WriteAck::default())
    }

    async fn delete_item(&self, store_id: &str) -> Result<WriteAck> {
        check_key(store_id)?;
        let mut items = self.items.write().await;
        items.remove(store_id);
        Ok(WriteAck::default())
    }

    async fn scan(&self) -> Result<ScanOutput> {
        let items = self.items.read().await;
        Ok(ScanOutput {
            items: items.values().cloned().collect(),
            scanned_count: items.len(),
            truncated: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use storekeep_core::item::WireValue;
    use storekeep_core::marshal::marshall_document;

    fn item(value: serde_json::Value) -> WireItem {
        marshall_document(&value).unwrap()
    }

    fn update(value: serde_json::Value) -> ItemUpdate {
        ItemUpdate::from_attributes(value.as_object().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let store = InMemoryStore::new();
        let acme = item(json!({"storeId": "s1", "name": "Acme"}));

        let ack = store.put_item(acme.clone()).await.unwrap();
        assert_eq!(ack, WriteAck::default());

        assert_eq!(store.get_item("s1").await.unwrap(), Some(acme));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let store = InMemoryStore::new();
        assert!(store.get_item("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_whole_item() {
        let store = InMemoryStore::new();
        store
            .put_item(item(json!({"storeId": "s1", "name": "Acme", "city": "Lima"})))
            .await
            .unwrap();
        store
            .put_item(item(json!({"storeId": "s1", "name": "Acme2"})))
            .await
            .unwrap();

        let stored = store.get_item("s1").await.unwrap().unwrap();
        assert_eq!(stored, item(json!({"storeId": "s1", "name": "Acme2"})));
    }

    #[tokio::test]
    async fn test_put_without_key_is_rejected() {
        let store = InMemoryStore::new();
        let error = store
            .put_item(item(json!({"name": "Acme"})))
            .await
            .unwrap_err();

        assert!(matches!(error, StoreError::InvalidData(_)));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_empty_key_is_rejected() {
        let store = InMemoryStore::new();

        assert!(matches!(
            store.get_item("").await,
            Err(StoreError::InvalidData(_))
        ));
        assert!(matches!(
            store.put_item(item(json!({"storeId": ""}))).await,
            Err(StoreError::InvalidData(_))
        ));
        assert!(matches!(
            store.update_item("", &update(json!({"name": "x"}))).await,
            Err(StoreError::InvalidData(_))
        ));
        assert!(matches!(
            store.delete_item("").await,
            Err(StoreError::InvalidData(_))
        ));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_update_overwrites_only_named_attributes() {
        let store = InMemoryStore::with_items([item(
            json!({"storeId": "s1", "name": "Acme", "city": "Lima"}),
        )]);

        store
            .update_item("s1", &update(json!({"name": "Acme2"})))
            .await
            .unwrap();

        let stored = store.get_item("s1").await.unwrap().unwrap();
        assert_eq!(stored.get("name"), Some(&WireValue::S("Acme2".to_string())));
        assert_eq!(stored.get("city"), Some(&WireValue::S("Lima".to_string())));
    }

    #[tokio::test]
    async fn test_update_missing_key_upserts() {
        let store = InMemoryStore::new();
        store
            .update_item("s9", &update(json!({"name": "New"})))
            .await
            .unwrap();

        let stored = store.get_item("s9").await.unwrap().unwrap();
        assert_eq!(stored, item(json!({"storeId": "s9", "name": "New"})));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = InMemoryStore::with_items([item(json!({"storeId": "s1"}))]);

        store.delete_item("s1").await.unwrap();
        store.delete_item("s1").await.unwrap();

        assert!(store.get_item("s1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_scan_returns_every_item() {
        let store = InMemoryStore::with_items([
            item(json!({"storeId": "s2"})),
            item(json!({"storeId": "s1"})),
        ]);

        let output = store.scan().await.unwrap();
        assert_eq!(output.scanned_count, 2);
        assert!(!output.truncated);
        assert_eq!(
            output
                .items
                .iter()
                .filter_map(store_id_of)
                .collect::<Vec<_>>(),
            vec!["s1", "s2"]
        );
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryStore::new();
        let clone = store.clone();

        clone.put_item(item(json!({"storeId": "s1"}))).await.unwrap();
        assert!(store.get_item("s1").await.unwrap().is_some());
    }
}
