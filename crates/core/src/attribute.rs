//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between SDK `AttributeValue` maps and
//! [`WireItem`]s. Shared by the Lambda backend and the seeding tool so both
//! write items the same way.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob as SdkBlob;
use aws_sdk_dynamodb::types::AttributeValue;
use crate::item::{Blob, WireItem, WireValue};
use crate::storage::StoreError;

/// Convert a wire value to an SDK attribute value.
pub fn wire_to_attribute(value: &WireValue) -> AttributeValue {
    match value {
        WireValue::S(s) => AttributeValue::S(s.clone()),
        WireValue::N(n) => AttributeValue::N(n.clone()),
        WireValue::B(blob) => AttributeValue::B(SdkBlob::new(blob.as_bytes())),
        WireValue::Bool(b) => AttributeValue::Bool(*b),
        WireValue::Null(b) => AttributeValue::Null(*b),
        WireValue::M(map) => AttributeValue::M(wire_item_to_item(map)),
        WireValue::L(values) => AttributeValue::L(values.iter().map(wire_to_attribute).collect()),
        WireValue::Ss(values) => AttributeValue::Ss(values.clone()),
        WireValue::Ns(values) => AttributeValue::Ns(values.clone()),
        WireValue::Bs(values) => AttributeValue::Bs(
            values
                .iter()
                .map(|blob| SdkBlob::new(blob.as_bytes()))
                .collect(),
        ),
    }
}

/// Convert a wire item to a DynamoDB item.
pub fn wire_item_to_item(item: &WireItem) -> HashMap<String, AttributeValue> {
    item.iter()
        .map(|(name, value)| (name.clone(), wire_to_attribute(value)))
        .collect()
}

/// Convert an SDK attribute value to a wire value.
pub fn attribute_to_wire(value: &AttributeValue) -> Result<WireValue, StoreError> {
    Ok(match value {
        AttributeValue::S(s) => WireValue::S(s.clone()),
        AttributeValue::N(n) => WireValue::N(n.clone()),
        AttributeValue::B(blob) => WireValue::B(Blob(blob.as_ref().to_vec())),
        AttributeValue::Bool(b) => WireValue::Bool(*b),
        AttributeValue::Null(b) => WireValue::Null(*b),
        AttributeValue::M(map) => WireValue::M(item_to_wire_item(map)?),
        AttributeValue::L(values) => WireValue::L(
            values
                .iter()
                .map(attribute_to_wire)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::Ss(values) => WireValue::Ss(values.clone()),
        AttributeValue::Ns(values) => WireValue::Ns(values.clone()),
        AttributeValue::Bs(values) => WireValue::Bs(
            values
                .iter()
                .map(|blob| Blob(blob.as_ref().to_vec()))
                .collect(),
        ),
        other => {
            return Err(StoreError::InvalidData(format!(
                "Unsupported attribute value: {:?}",
                other
            )))
        }
    })
}

/// Convert a DynamoDB item to a wire item.
pub fn item_to_wire_item(
    item: &HashMap<String, AttributeValue>,
) -> Result<WireItem, StoreError> {
    item.iter()
        .map(|(name, value)| Ok((name.clone(), attribute_to_wire(value)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::store_key;

    fn sample_wire_item() -> WireItem {
        let mut address = WireItem::new();
        address.insert("city".to_string(), WireValue::S("Montevideo".to_string()));

        let mut item = store_key("s1");
        item.insert("name".to_string(), WireValue::S("Acme".to_string()));
        item.insert("rating".to_string(), WireValue::N("4.5".to_string()));
        item.insert("open".to_string(), WireValue::Bool(true));
        item.insert("closedOn".to_string(), WireValue::Null(true));
        item.insert("address".to_string(), WireValue::M(address));
        item.insert(
            "hours".to_string(),
            WireValue::L(vec![WireValue::N("9".to_string())]),
        );
        item.insert(
            "tags".to_string(),
            WireValue::Ss(vec!["food".to_string(), "bakery".to_string()]),
        );
        item.insert("logo".to_string(), WireValue::B(Blob(vec![0x89, 0x50])));
        item
    }

    #[test]
    fn test_wire_item_to_item() {
        let item = wire_item_to_item(&sample_wire_item());

        assert_eq!(item.get("storeId"), Some(&AttributeValue::S("s1".to_string())));
        assert_eq!(item.get("rating"), Some(&AttributeValue::N("4.5".to_string())));
        assert_eq!(item.get("open"), Some(&AttributeValue::Bool(true)));
        assert_eq!(item.get("closedOn"), Some(&AttributeValue::Null(true)));
        assert_eq!(
            item.get("logo"),
            Some(&AttributeValue::B(SdkBlob::new(vec![0x89, 0x50])))
        );

        let address = item.get("address").unwrap().as_m().unwrap();
        assert_eq!(
            address.get("city"),
            Some(&AttributeValue::S("Montevideo".to_string()))
        );
    }

    #[test]
    fn test_item_to_wire_item_restores_every_type() {
        let original = sample_wire_item();
        let restored = item_to_wire_item(&wire_item_to_item(&original)).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_number_sets_keep_their_text() {
        let value = attribute_to_wire(&AttributeValue::Ns(vec!["1".to_string(), "1e3".to_string()]))
            .unwrap();
        assert_eq!(
            value,
            WireValue::Ns(vec!["1".to_string(), "1e3".to_string()])
        );
    }
}
