use std::collections::BTreeMap;

use serde::Serialize;

use crate::item::{Item, WireItem, WireValue, STORE_ID_ATTRIBUTE};
use crate::marshal::marshall_value;

use super::UpdateError;

/// A single `SET` assignment of an update request.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Placeholder bound to the attribute name (`#key0`).
    pub name_placeholder: String,
    /// Placeholder bound to the new value (`:value0`).
    pub value_placeholder: String,
    pub attribute: String,
    pub value: WireValue,
}

/// A conditionless, attribute-by-attribute overwrite of one item.
///
/// Built from a JSON attribute map: each attribute becomes one
/// `#keyN = :valueN` assignment, numbered in map order. Names and values are
/// always bound through placeholders, so reserved words and special
/// characters in attribute names are safe.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemUpdate {
    assignments: Vec<Assignment>,
}

impl ItemUpdate {
    /// Builds an update from an attribute map.
    ///
    /// Rejects an empty map (it would produce an empty `SET` clause) and any
    /// assignment to the key attribute.
    pub fn from_attributes(attributes: &Item) -> Result<Self, UpdateError> {
        if attributes.is_empty() {
            return Err(UpdateError::NoAttributes);
        }
        if attributes.contains_key(STORE_ID_ATTRIBUTE) {
            return Err(UpdateError::KeyAttribute(STORE_ID_ATTRIBUTE.to_string()));
        }

        let assignments = attributes
            .iter()
            .enumerate()
            .map(|(index, (attribute, value))| Assignment {
                name_placeholder: format!("#key{index}"),
                value_placeholder: format!(":value{index}"),
                attribute: attribute.clone(),
                value: marshall_value(value),
            })
            .collect();

        Ok(Self { assignments })
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// The `SET` expression, e.g. `SET #key0 = :value0, #key1 = :value1`.
    pub fn update_expression(&self) -> String {
        let clauses: Vec<String> = self
            .assignments
            .iter()
            .map(|a| format!("{} = {}", a.name_placeholder, a.value_placeholder))
            .collect();
        format!("SET {}", clauses.join(", "))
    }

    /// Placeholder → attribute name bindings.
    pub fn expression_attribute_names(&self) -> BTreeMap<String, String> {
        self.assignments
            .iter()
            .map(|a| (a.name_placeholder.clone(), a.attribute.clone()))
            .collect()
    }

    /// Placeholder → value bindings.
    pub fn expression_attribute_values(&self) -> WireItem {
        self.assignments
            .iter()
            .map(|a| (a.value_placeholder.clone(), a.value.clone()))
            .collect()
    }
}

/// The store's answer to a put, update or delete.
///
/// Serialized in the store's own casing. `attributes` is only present when the
/// store returned item attributes, which it does not by default.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WriteAck {
    #[serde(rename = "Attributes", skip_serializing_if = "Option::is_none")]
    pub attributes: Option<WireItem>,
}

/// Result of a full table scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutput {
    pub items: Vec<WireItem>,
    pub scanned_count: usize,
    /// The store stopped early and reported a continuation key.
    pub truncated: bool,
}
