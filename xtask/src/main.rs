//! See <https://github.com/matklad/cargo-xtask/>
//!
//! This binary defines various auxiliary build commands, which are not
//! expressible with just `cargo`.
//!
//! The binary is integrated into the `cargo` command line by using an
//! alias in `.cargo/config`.

use clap::Parser;

mod dynamodb;
mod prelude;

/// Development tasks for the storekeep repository
#[derive(Debug, Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for storekeep", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: Global,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Silence the command output
    #[clap(long, global = true)]
    pub silent: bool,
}

impl Global {
    pub fn is_silent(&self) -> bool {
        self.silent
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Manage DynamoDB infrastructure
    Dynamodb(dynamodb::DynamodbCommand),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dynamodb(dynamodb_cmd) => {
            dynamodb::run(dynamodb_cmd, cli.global).await?;
        }
    }

    Ok(())
}
