use std::env;

use storekeep_core::envelope::ErrorDetail;
use thiserror::Error;

/// Errors raised while reading configuration at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table holding the stores.
    pub table_name: String,
    /// AWS region override (default: SDK region chain).
    pub region: Option<String>,
    /// Custom endpoint URL, for local DynamoDB.
    pub endpoint_url: Option<String>,
    /// Whether failed responses carry the error source chain.
    pub error_detail: ErrorDetail,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNAMODB_TABLE_NAME` - Table name (required)
    /// - `AWS_REGION` - AWS region (optional)
    /// - `AWS_ENDPOINT_URL` - Custom endpoint, e.g. `http://localhost:8000` (optional)
    /// - `EXPOSE_ERROR_STACK` - Include `errorStack` detail in failures (default: true)
    /// - `LOG_FORMAT` - `json` or `pretty` (default: `json` inside Lambda, `pretty` elsewhere)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let table_name =
            non_empty("DYNAMODB_TABLE_NAME").ok_or(ConfigError::Missing("DYNAMODB_TABLE_NAME"))?;

        let error_detail = match non_empty("EXPOSE_ERROR_STACK") {
            None => ErrorDetail::Full,
            Some(value) => match parse_bool(&value) {
                Some(true) => ErrorDetail::Full,
                Some(false) => ErrorDetail::Redacted,
                None => {
                    return Err(ConfigError::Invalid {
                        name: "EXPOSE_ERROR_STACK",
                        value,
                    })
                }
            },
        };

        let log_format = match non_empty("LOG_FORMAT") {
            None if non_empty("AWS_LAMBDA_FUNCTION_NAME").is_some() => LogFormat::Json,
            None => LogFormat::Pretty,
            Some(value) => match value.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" | "text" => LogFormat::Pretty,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "LOG_FORMAT",
                        value,
                    })
                }
            },
        };

        Ok(Self {
            table_name,
            region: non_empty("AWS_REGION"),
            endpoint_url: non_empty("AWS_ENDPOINT_URL"),
            error_detail,
            log_format,
        })
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match (&self.endpoint_url, &self.region) {
            (Some(url), _) => format!("Local DynamoDB ({}), table {}", url, self.table_name),
            (None, Some(region)) => {
                format!("AWS DynamoDB (region: {}), table {}", region, self.table_name)
            }
            (None, None) => format!("AWS DynamoDB, table {}", self.table_name),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
