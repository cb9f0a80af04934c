//! Pure functions for calculating deployment plans (Functional Core).

use super::config::TableConfig;

/// Represents the current state of a table.
#[derive(Debug, Clone)]
pub struct TableState {
    pub status: TableStatus,
    pub key_schema: Vec<KeyElement>,
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

/// One element of an existing table's primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyElement {
    pub name: String,
    pub role: KeyRole,
}

/// Whether a key element is the partition (hash) or sort (range) key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Hash,
    Range,
}

/// Planned changes for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    /// Table doesn't exist, needs to be created.
    CreateTable { config: TableConfig },
    /// Table exists but is keyed differently. Key schemas cannot be altered
    /// in place, so nothing is applied.
    KeySchemaMismatch {
        table_name: String,
        expected: String,
        found: String,
    },
    /// Table is up to date, no changes needed.
    NoChanges { table_name: String },
}

/// Plan for destroying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    /// Table exists and will be deleted.
    DeleteTable { table_name: String },
    /// Table doesn't exist, nothing to do.
    AlreadyGone { table_name: String },
}

/// Pure function: Calculate what changes are needed to reach desired state.
pub fn calculate_deploy_plan(current: Option<&TableState>, desired: &TableConfig) -> DeployPlan {
    let Some(state) = current else {
        return DeployPlan::CreateTable {
            config: desired.clone(),
        };
    };

    let expected = vec![KeyElement {
        name: desired.partition_key.name.clone(),
        role: KeyRole::Hash,
    }];

    if state.key_schema == expected {
        DeployPlan::NoChanges {
            table_name: desired.table_name.clone(),
        }
    } else {
        DeployPlan::KeySchemaMismatch {
            table_name: desired.table_name.clone(),
            expected: describe_key_schema(&expected),
            found: describe_key_schema(&state.key_schema),
        }
    }
}

/// Pure function: Calculate destroy plan.
pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    match current {
        Some(_) => DestroyPlan::DeleteTable {
            table_name: table_name.to_string(),
        },
        None => DestroyPlan::AlreadyGone {
            table_name: table_name.to_string(),
        },
    }
}

/// Renders a key schema as `storeId (HASH), createdAt (RANGE)`.
pub fn describe_key_schema(key_schema: &[KeyElement]) -> String {
    key_schema
        .iter()
        .map(|k| {
            let role = match k.role {
                KeyRole::Hash => "HASH",
                KeyRole::Range => "RANGE",
            };
            format!("{} ({})", k.name, role)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Pure function: Format a deploy plan for display.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { config } => vec![
            format!("+ Create table: {}", config.table_name),
            format!("  Partition key: {} (S)", config.partition_key.name),
            "  Billing: PAY_PER_REQUEST".to_string(),
        ],
        DeployPlan::KeySchemaMismatch {
            table_name,
            expected,
            found,
        } => vec![
            format!("! Table '{}' exists with an incompatible key schema", table_name),
            format!("  Expected: {}", expected),
            format!("  Found:    {}", found),
        ],
        DeployPlan::NoChanges { table_name } => {
            vec![format!("= Table '{}' is up to date", table_name)]
        }
    }
}

/// Pure function: Format a destroy plan for display.
pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!(
                "- Delete table: {} (ALL DATA WILL BE LOST)",
                table_name
            )]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{}' does not exist", table_name)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::config::storekeep_table_config;
    use super::*;

    fn state(key_schema: Vec<KeyElement>) -> TableState {
        TableState {
            status: TableStatus::Active,
            key_schema,
        }
    }

    fn hash(name: &str) -> KeyElement {
        KeyElement {
            name: name.to_string(),
            role: KeyRole::Hash,
        }
    }

    #[test]
    fn test_missing_table_is_created() {
        let config = storekeep_table_config();
        let plan = calculate_deploy_plan(None, &config);

        assert_eq!(plan, DeployPlan::CreateTable { config });
        assert_eq!(
            format_deploy_plan(&plan),
            vec![
                "+ Create table: storekeep",
                "  Partition key: storeId (S)",
                "  Billing: PAY_PER_REQUEST",
            ]
        );
    }

    #[test]
    fn test_matching_table_needs_no_changes() {
        let config = storekeep_table_config().with_table_name("stores-dev");
        let plan = calculate_deploy_plan(Some(&state(vec![hash("storeId")])), &config);

        assert_eq!(
            plan,
            DeployPlan::NoChanges {
                table_name: "stores-dev".to_string()
            }
        );
    }

    #[test]
    fn test_differently_keyed_table_is_a_mismatch() {
        let current = state(vec![
            hash("PK"),
            KeyElement {
                name: "SK".to_string(),
                role: KeyRole::Range,
            },
        ]);
        let plan = calculate_deploy_plan(Some(&current), &storekeep_table_config());

        assert_eq!(
            plan,
            DeployPlan::KeySchemaMismatch {
                table_name: "storekeep".to_string(),
                expected: "storeId (HASH)".to_string(),
                found: "PK (HASH), SK (RANGE)".to_string(),
            }
        );
        assert!(format_deploy_plan(&plan)[0].starts_with('!'));
    }

    #[test]
    fn test_destroy_plan() {
        assert_eq!(
            calculate_destroy_plan(Some(&state(vec![hash("storeId")])), "storekeep"),
            DestroyPlan::DeleteTable {
                table_name: "storekeep".to_string()
            }
        );
        assert_eq!(
            format_destroy_plan(&calculate_destroy_plan(None, "storekeep")),
            vec!["= Table 'storekeep' does not exist"]
        );
    }
}
