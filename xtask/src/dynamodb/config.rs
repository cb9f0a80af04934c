//! Table configuration types (Functional Core - pure data).

use storekeep_core::item::STORE_ID_ATTRIBUTE;

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub billing_mode: BillingMode,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// DynamoDB attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    PayPerRequest,
}

impl TableConfig {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }
}

/// Returns the canonical table configuration for storekeep: a single hash key
/// `storeId` of type string, no sort key, no secondary indexes.
pub fn storekeep_table_config() -> TableConfig {
    TableConfig {
        table_name: "storekeep".to_string(),
        partition_key: KeyAttribute {
            name: STORE_ID_ATTRIBUTE.to_string(),
            attribute_type: AttributeType::String,
        },
        billing_mode: BillingMode::PayPerRequest,
    }
}
