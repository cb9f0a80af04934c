//! Seed command implementation.

use super::error::{DynamodbError, Result};
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use serde_json::{json, Value};
use std::collections::HashMap;
use storekeep_core::attribute::wire_item_to_item;
use storekeep_core::marshal::marshall_document;

/// BatchWriteItem accepts at most 25 put requests per call.
const BATCH_SIZE: usize = 25;

const NAMES: [&str; 8] = [
    "Corner Bakery",
    "Hardware Depot",
    "Green Grocer",
    "Book Nook",
    "Bike Works",
    "Tea House",
    "Record Shop",
    "Flower Stall",
];

const CITIES: [&str; 5] = ["Montevideo", "Lima", "Santiago", "Bogota", "Quito"];

const TAGS: [&[&str]; 4] = [
    &["food", "bakery"],
    &["tools"],
    &["food", "organic", "local"],
    &["books", "coffee"],
];

/// Generate `count` sample stores as plain JSON documents.
///
/// Ids are `store-001`, `store-002`, ... so re-seeding overwrites the same
/// items instead of piling up new ones.
pub fn generate_sample_stores(count: u32) -> Vec<Value> {
    (0..count as usize)
        .map(|i| {
            json!({
                "storeId": format!("store-{:03}", i + 1),
                "name": NAMES[i % NAMES.len()],
                "address": {
                    "city": CITIES[i % CITIES.len()],
                    "street": format!("Calle {}", 10 + i * 7),
                },
                "rating": ((30 + (i * 7) % 21) as f64) / 10.0,
                "open": i % 4 != 3,
                "tags": TAGS[i % TAGS.len()],
                "employees": 2 + (i % 9),
            })
        })
        .collect()
}

/// Marshall a JSON document into a DynamoDB item.
pub fn store_to_item(store: &Value) -> Result<HashMap<String, AttributeValue>> {
    Ok(wire_item_to_item(&marshall_document(store)?))
}

/// Insert stores into DynamoDB.
pub async fn seed_stores(client: &Client, table_name: &str, stores: &[Value]) -> Result<u32> {
    let mut inserted = 0;

    for chunk in stores.chunks(BATCH_SIZE) {
        let write_requests = chunk
            .iter()
            .map(|store| {
                let put = PutRequest::builder()
                    .set_item(Some(store_to_item(store)?))
                    .build()
                    .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;
                Ok(WriteRequest::builder().put_request(put).build())
            })
            .collect::<Result<Vec<_>>>()?;

        let output = client
            .batch_write_item()
            .request_items(table_name, write_requests)
            .send()
            .await
            .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

        let unprocessed: usize = output
            .unprocessed_items()
            .map(|items| items.values().map(Vec::len).sum())
            .unwrap_or(0);
        if unprocessed > 0 {
            return Err(DynamodbError::UnprocessedItems(unprocessed));
        }

        inserted += chunk.len() as u32;
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use storekeep_core::attribute::item_to_wire_item;

    #[test]
    fn test_generates_requested_count_with_unique_ids() {
        let stores = generate_sample_stores(30);
        assert_eq!(stores.len(), 30);

        let ids: HashSet<&str> = stores
            .iter()
            .filter_map(|s| s["storeId"].as_str())
            .collect();
        assert_eq!(ids.len(), 30);
        assert!(ids.contains("store-001"));
        assert!(ids.contains("store-030"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(generate_sample_stores(5), generate_sample_stores(5));
    }

    #[test]
    fn test_store_to_item_uses_attribute_types() {
        let item = store_to_item(&generate_sample_stores(1)[0]).unwrap();

        assert_eq!(
            item.get("storeId"),
            Some(&AttributeValue::S("store-001".to_string()))
        );
        assert_eq!(item.get("open"), Some(&AttributeValue::Bool(true)));
        assert_eq!(
            item.get("employees"),
            Some(&AttributeValue::N("2".to_string()))
        );
        assert!(item.get("address").unwrap().is_m());
        assert!(item.get("tags").unwrap().is_l());
    }

    #[test]
    fn test_seeded_items_read_back_like_stored_ones() {
        for store in generate_sample_stores(4) {
            let item = store_to_item(&store).unwrap();
            assert_eq!(
                item_to_wire_item(&item).unwrap(),
                marshall_document(&store).unwrap()
            );
        }
    }

    #[test]
    fn test_store_to_item_rejects_non_objects() {
        assert!(matches!(
            store_to_item(&json!(["not", "a", "store"])),
            Err(DynamodbError::Marshal(_))
        ));
    }
}
