mod config;
mod event;
mod handlers;
mod routing;
mod state;
mod storage;

use std::sync::Arc;

use anyhow::Result;
use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use clap::Parser;
use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;
use storekeep_core::storage::ItemStore;
use tracing::Instrument;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, LogFormat};
use crate::routing::Route;
use crate::state::AppState;

/// Storekeep - Lambda handlers for a single-table store catalogue
#[derive(Parser, Debug)]
#[command(name = "storekeep")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Serve only this handler. Without it, each event is routed by method
    /// and path.
    #[arg(long, value_enum, env = "STOREKEEP_HANDLER")]
    handler: Option<Route>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    init_tracing(config.log_format);

    let store = create_store(&config).await;
    let state = AppState::new(store, config.error_detail).with_route(cli.handler);

    tracing::info!(
        target_env = %config.target_display(),
        handler = cli.handler.map(Route::name).unwrap_or("<by event>"),
        "Starting storekeep"
    );

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let state = state.clone();
        async move {
            Ok::<ApiGatewayProxyResponse, lambda_runtime::Error>(invoke(&state, event).await)
        }
    }))
    .await
    .map_err(|e| anyhow::anyhow!(e))
}

/// Handles one invocation inside a span carrying its request id.
///
/// The payload is taken as raw JSON; `handlers::handle` converts it, so a
/// malformed event still gets an envelope.
async fn invoke(state: &AppState, event: LambdaEvent<Value>) -> ApiGatewayProxyResponse {
    let (event, context) = event.into_parts();
    let span = tracing::info_span!(
        "invocation",
        request_id = %context.request_id,
        route = tracing::field::Empty,
    );

    async {
        let response = handlers::handle(state, event).await;
        tracing::debug!(status_code = response.status_code, "Invocation finished");
        response
    }
    .instrument(span)
    .await
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` overrides the default `storekeep=info` filter.
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storekeep=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().without_time())
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[cfg(feature = "dynamodb")]
async fn create_store(config: &Config) -> Arc<dyn ItemStore> {
    let store = storage::DynamoDbStore::from_config(config).await;
    tracing::debug!(table = store.table_name(), "DynamoDB client ready");
    Arc::new(store)
}

#[cfg(feature = "inmemory")]
async fn create_store(_config: &Config) -> Arc<dyn ItemStore> {
    tracing::warn!("Using the in-memory store; data is lost when the process exits");
    Arc::new(storage::InMemoryStore::new())
}
