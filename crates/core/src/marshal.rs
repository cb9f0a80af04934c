//! Marshalling between plain JSON and the attribute-typed wire form.
//!
//! Pure functions, testable in isolation. Marshalling JSON values never
//! fails; only the shape of the top-level document (it must be an object) and
//! numbers coming back from the store (they must be representable as JSON)
//! can be rejected.

use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::item::{Item, WireItem, WireValue};

/// Errors that can occur while marshalling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarshalError {
    /// The document to marshall as an item is not a JSON object.
    #[error("Expected a JSON object, got {0}")]
    NotAnObject(&'static str),
    /// A stored number cannot be represented as a JSON number.
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

/// Result type for marshalling operations.
pub type Result<T> = std::result::Result<T, MarshalError>;

/// Converts a JSON value to its wire form.
pub fn marshall_value(value: &Value) -> WireValue {
    match value {
        Value::Null => WireValue::Null(true),
        Value::Bool(b) => WireValue::Bool(*b),
        Value::Number(n) => WireValue::N(n.to_string()),
        Value::String(s) => WireValue::S(s.clone()),
        Value::Array(values) => WireValue::L(values.iter().map(marshall_value).collect()),
        Value::Object(map) => WireValue::M(marshall_item(map)),
    }
}

/// Converts a JSON object to a wire item.
pub fn marshall_item(item: &Item) -> WireItem {
    item.iter()
        .map(|(name, value)| (name.clone(), marshall_value(value)))
        .collect()
}

/// Converts an arbitrary JSON document to a wire item.
///
/// `null` is accepted and produces an empty item; anything other than an
/// object or `null` is rejected.
pub fn marshall_document(document: &Value) -> Result<WireItem> {
    match document {
        Value::Object(map) => Ok(marshall_item(map)),
        Value::Null => Ok(WireItem::new()),
        other => Err(MarshalError::NotAnObject(json_type_name(other))),
    }
}

/// Converts a wire value back to JSON.
///
/// String, number and binary sets become arrays. Binary payloads become
/// base64 strings.
pub fn unmarshall_value(value: &WireValue) -> Result<Value> {
    Ok(match value {
        WireValue::S(s) => Value::String(s.clone()),
        WireValue::N(n) => Value::Number(parse_number(n)?),
        WireValue::B(blob) => Value::String(blob.to_base64()),
        WireValue::Bool(b) => Value::Bool(*b),
        WireValue::Null(_) => Value::Null,
        WireValue::M(map) => Value::Object(unmarshall_item(map)?),
        WireValue::L(values) => Value::Array(
            values
                .iter()
                .map(unmarshall_value)
                .collect::<Result<Vec<_>>>()?,
        ),
        WireValue::Ss(values) => {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        }
        WireValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<Vec<_>>>()?,
        ),
        WireValue::Bs(values) => Value::Array(
            values
                .iter()
                .map(|blob| Value::String(blob.to_base64()))
                .collect(),
        ),
    })
}

/// Converts a wire item back to a JSON object.
pub fn unmarshall_item(item: &WireItem) -> Result<Item> {
    let mut map = Map::new();
    for (name, value) in item {
        map.insert(name.clone(), unmarshall_value(value)?);
    }
    Ok(map)
}

fn parse_number(text: &str) -> Result<Number> {
    let trimmed = text.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Ok(Number::from(i));
    }
    if let Ok(u) = trimmed.parse::<u64>() {
        return Ok(Number::from(u));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| MarshalError::InvalidNumber(text.to_string()))
}

/// The JSON type of `value`, as named in error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
