//! DynamoDB infrastructure management commands.

mod client;
mod config;
mod deploy;
mod error;
mod planning;
mod seed;

pub use error::{DynamodbError, Result};

use crate::prelude::*;
use dialoguer::Confirm;

/// DynamoDB infrastructure management commands.
#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

/// Available DynamoDB actions.
#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Deploy or destroy DynamoDB table infrastructure.
    Deploy(DeployCommand),

    /// Seed the table with sample stores.
    Seed(SeedCommand),
}

/// Deploy or update DynamoDB infrastructure.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Deploy or destroy DynamoDB table infrastructure.

By default, this command creates the storekeep DynamoDB table: a single
string partition key `storeId`, billed per request. An existing table with
the same key is left alone; one keyed differently is reported as an error.

The command shows a plan of changes before applying and asks for confirmation.

Environment variables:
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to us-east-1)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Destroy the table instead of creating/updating.
    #[arg(long)]
    pub destroy: bool,

    /// Table name to use.
    #[arg(long, default_value = "storekeep")]
    pub table_name: String,
}

/// Seed the table with sample stores.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Generate and insert sample stores into DynamoDB.

Stores are plain JSON documents marshalled into attribute-typed items, the
same way the createStore handler writes them. Ids are stable
(store-001, store-002, ...), so seeding twice overwrites the same items.")]
pub struct SeedCommand {
    /// Number of stores to generate.
    #[arg(long, default_value = "10")]
    pub count: u32,

    /// Table name to use.
    #[arg(long, default_value = "storekeep")]
    pub table_name: String,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

/// Main entry point for dynamodb command.
pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(deploy_cmd) => run_deploy(deploy_cmd, &global).await,
        DynamodbAction::Seed(seed_cmd) => run_seed(seed_cmd, &global).await,
    }
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await;
    let current_state = client::get_table_state(&dynamo_client, &cmd.table_name).await?;

    if cmd.destroy {
        // Destroy flow
        let plan = planning::calculate_destroy_plan(current_state.as_ref(), &cmd.table_name);

        if !global.is_silent() {
            aprintln!("{}", p_y("Destroy Plan:"));
            for line in planning::format_destroy_plan(&plan) {
                aprintln!("  {}", p_r(&line));
            }
            aprintln!();
        }

        if matches!(plan, planning::DestroyPlan::AlreadyGone { .. }) {
            if !global.is_silent() {
                aprintln!("{}", p_g("Nothing to destroy."));
            }
            return Ok(());
        }

        if !cmd.force {
            let confirmed = Confirm::new()
                .with_prompt("Are you sure you want to delete this table? ALL DATA WILL BE LOST")
                .default(false)
                .interact()?;

            if !confirmed {
                return Err(DynamodbError::UserCancelled);
            }
        }

        if !global.is_silent() {
            aprintln!("{}", p_b("Deleting table..."));
        }

        deploy::execute_destroy_plan(&dynamo_client, &plan).await?;

        if !global.is_silent() {
            aprintln!("{}", p_g("Table destroyed successfully."));
        }
    } else {
        // Deploy flow
        let table_config = config::storekeep_table_config().with_table_name(&cmd.table_name);

        let plan = planning::calculate_deploy_plan(current_state.as_ref(), &table_config);

        if !global.is_silent() {
            aprintln!("{}", p_c("Deploy Plan:"));
            for line in planning::format_deploy_plan(&plan) {
                if line.starts_with('+') {
                    aprintln!("  {}", p_g(&line));
                } else if line.starts_with('-') {
                    aprintln!("  {}", p_r(&line));
                } else if line.starts_with('!') {
                    aprintln!("  {}", p_y(&line));
                } else {
                    aprintln!("  {}", line);
                }
            }
            aprintln!();
        }

        if matches!(plan, planning::DeployPlan::NoChanges { .. }) {
            if !global.is_silent() {
                aprintln!("{}", p_g("Infrastructure is up to date."));
            }
            return Ok(());
        }

        if let planning::DeployPlan::KeySchemaMismatch {
            table_name,
            expected,
            found,
        } = &plan
        {
            return Err(DynamodbError::KeySchemaMismatch {
                table_name: table_name.clone(),
                expected: expected.clone(),
                found: found.clone(),
            });
        }

        if !cmd.force {
            let confirmed = Confirm::new()
                .with_prompt("Apply these changes?")
                .default(true)
                .interact()?;

            if !confirmed {
                return Err(DynamodbError::UserCancelled);
            }
        }

        if !global.is_silent() {
            aprintln!("{}", p_b("Applying changes..."));
        }

        deploy::execute_deploy_plan(&dynamo_client, &plan).await?;

        if !global.is_silent() {
            aprintln!("{}", p_g("Infrastructure deployed successfully."));
        }
    }

    Ok(())
}

async fn run_seed(cmd: SeedCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!("{} {}", p_b("Table:"), cmd.table_name);
        aprintln!("{} {}", p_b("Store count:"), cmd.count);
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await;

    // Verify table exists
    let table_state = client::get_table_state(&dynamo_client, &cmd.table_name).await?;
    if table_state.is_none() {
        return Err(DynamodbError::TableNotFound {
            table_name: cmd.table_name,
        });
    }

    let stores = seed::generate_sample_stores(cmd.count);

    if !global.is_silent() {
        aprintln!("{}", p_c("Stores to write:"));
        for store in stores.iter().take(5) {
            aprintln!(
                "  {} - {}",
                store["storeId"].as_str().unwrap_or_default(),
                store["name"].as_str().unwrap_or_default()
            );
        }
        if stores.len() > 5 {
            aprintln!("  ... and {} more", stores.len() - 5);
        }
        aprintln!();
    }

    if !cmd.force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Write {} stores?", stores.len()))
            .default(true)
            .interact()?;

        if !confirmed {
            return Err(DynamodbError::UserCancelled);
        }
    }

    let inserted = seed::seed_stores(&dynamo_client, &cmd.table_name, &stores).await?;

    if !global.is_silent() {
        aprintln!("{} {} stores written.", p_g("Success:"), inserted);
    }

    Ok(())
}
