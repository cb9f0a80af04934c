//! AWS SDK client setup.

use aws_sdk_dynamodb::Client;

use crate::config::Config;

/// Creates a DynamoDB client from the application configuration.
///
/// Credentials always come from the SDK default chain. Region and endpoint
/// are only overridden when configured.
pub async fn create_client(config: &Config) -> Client {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

    if let Some(region) = &config.region {
        sdk_config_loader = sdk_config_loader.region(aws_config::Region::new(region.clone()));
    }

    if let Some(endpoint) = &config.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    let sdk_config = sdk_config_loader.load().await;
    Client::new(&sdk_config)
}
