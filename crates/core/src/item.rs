//! Item model.
//!
//! An [`Item`] is the caller-facing JSON shape of a record. A [`WireItem`] is the
//! attribute-typed form the store speaks, serialized the way DynamoDB renders
//! it (`{"storeId": {"S": "s1"}}`). Both are ordered maps so that responses are
//! deterministic.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Name of the attribute that identifies an item.
pub const STORE_ID_ATTRIBUTE: &str = "storeId";

/// A schemaless item as plain JSON.
pub type Item = serde_json::Map<String, serde_json::Value>;

/// A schemaless item in wire form.
pub type WireItem = BTreeMap<String, WireValue>;

/// Binary attribute payload. Serialized as standard base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob(pub Vec<u8>);

impl Blob {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }
}

impl Serialize for Blob {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for Blob {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map(Blob)
            .map_err(serde::de::Error::custom)
    }
}

/// An attribute value tagged with its store type.
///
/// Numbers travel as strings, exactly as the store transmits them, so no
/// precision is lost between marshalling and the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WireValue {
    #[serde(rename = "S")]
    S(String),
    #[serde(rename = "N")]
    N(String),
    #[serde(rename = "B")]
    B(Blob),
    #[serde(rename = "BOOL")]
    Bool(bool),
    #[serde(rename = "NULL")]
    Null(bool),
    #[serde(rename = "M")]
    M(WireItem),
    #[serde(rename = "L")]
    L(Vec<WireValue>),
    #[serde(rename = "SS")]
    Ss(Vec<String>),
    #[serde(rename = "NS")]
    Ns(Vec<String>),
    #[serde(rename = "BS")]
    Bs(Vec<Blob>),
}

impl WireValue {
    /// Short type descriptor, as used in store error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            WireValue::S(_) => "S",
            WireValue::N(_) => "N",
            WireValue::B(_) => "B",
            WireValue::Bool(_) => "BOOL",
            WireValue::Null(_) => "NULL",
            WireValue::M(_) => "M",
            WireValue::L(_) => "L",
            WireValue::Ss(_) => "SS",
            WireValue::Ns(_) => "NS",
            WireValue::Bs(_) => "BS",
        }
    }
}

/// Builds the primary key map for a store id.
pub fn store_key(store_id: &str) -> WireItem {
    let mut key = WireItem::new();
    key.insert(
        STORE_ID_ATTRIBUTE.to_string(),
        WireValue::S(store_id.to_string()),
    );
    key
}

/// Returns the store id of a wire item, if it carries a string key.
pub fn store_id_of(item: &WireItem) -> Option<&str> {
    match item.get(STORE_ID_ATTRIBUTE) {
        Some(WireValue::S(id)) => Some(id.as_str()),
        _ => None,
    }
}
