//! DynamoDB item store implementation.
//!
//! Implements `ItemStore` from `storekeep_core::storage` against a single
//! table whose partition key is `storeId`.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use storekeep_core::attribute::{item_to_wire_item, wire_item_to_item, wire_to_attribute};
use storekeep_core::item::{WireItem, STORE_ID_ATTRIBUTE};
use storekeep_core::storage::{ItemStore, ItemUpdate, Result, ScanOutput, WriteAck};

use super::client::create_client;
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_scan_error,
    map_update_item_error,
};
use crate::config::Config;

/// DynamoDB-based item store.
///
/// Holds only the client and the table name; one instance serves every
/// invocation of a warm Lambda container.
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new store from application configuration.
    pub async fn from_config(config: &Config) -> Self {
        let client = create_client(config).await;
        Self::new(client, config.table_name.clone())
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

fn key(store_id: &str) -> AttributeValue {
    AttributeValue::S(store_id.to_string())
}

fn write_ack(attributes: Option<&HashMap<String, AttributeValue>>) -> Result<WriteAck> {
    Ok(WriteAck {
        attributes: attributes.map(item_to_wire_item).transpose()?,
    })
}

#[async_trait]
impl ItemStore for DynamoDbStore {
    async fn get_item(&self, store_id: &str) -> Result<Option<WireItem>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(STORE_ID_ATTRIBUTE, key(store_id))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, &self.table_name))?;

        result.item().map(item_to_wire_item).transpose()
    }

    async fn put_item(&self, item: WireItem) -> Result<WriteAck> {
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(wire_item_to_item(&item)))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, &self.table_name))?;

        write_ack(result.attributes())
    }

    async fn update_item(&self, store_id: &str, update: &ItemUpdate) -> Result<WriteAck> {
        let values: HashMap<String, AttributeValue> = update
            .expression_attribute_values()
            .iter()
            .map(|(placeholder, value)| (placeholder.clone(), wire_to_attribute(value)))
            .collect();

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(STORE_ID_ATTRIBUTE, key(store_id))
            .update_expression(update.update_expression())
            .set_expression_attribute_names(Some(
                update.expression_attribute_names().into_iter().collect(),
            ))
            .set_expression_attribute_values(Some(values))
            .send()
            .await
            .map_err(|e| map_update_item_error(e, &self.table_name))?;

        write_ack(result.attributes())
    }

    async fn delete_item(&self, store_id: &str) -> Result<WriteAck> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(STORE_ID_ATTRIBUTE, key(store_id))
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, &self.table_name))?;

        write_ack(result.attributes())
    }

    async fn scan(&self) -> Result<ScanOutput> {
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| map_scan_error(e, &self.table_name))?;

        let items = result
            .items()
            .iter()
            .map(item_to_wire_item)
            .collect::<Result<Vec<_>>>()?;

        Ok(ScanOutput {
            scanned_count: result.scanned_count().max(0) as usize,
            truncated: result.last_evaluated_key().is_some(),
            items,
        })
    }
}
