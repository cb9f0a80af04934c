//! Inbound event model.
//!
//! Invocations arrive as raw JSON and are converted into an
//! [`ApiGatewayProxyRequest`] here, so a payload that does not fit the proxy
//! shape becomes a handler error instead of a runtime failure.

use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;

use storekeep_core::item::STORE_ID_ATTRIBUTE;

use crate::handlers::HandlerError;

/// Converts the raw invocation payload into a proxy request.
pub fn parse_event(payload: Value) -> Result<ApiGatewayProxyRequest, HandlerError> {
    serde_json::from_value(payload)
        .map_err(|e| HandlerError::InvalidInput(format!("Malformed event: {e}")))
}

/// HTTP method and path template read straight from the raw payload.
///
/// Routing only needs these two strings, so it does not depend on the rest
/// of the event being well formed. `resource` wins over the concrete `path`.
pub fn method_and_path(payload: &Value) -> Option<(String, String)> {
    let method = payload.get("httpMethod")?.as_str()?;
    let path = ["resource", "path"]
        .iter()
        .find_map(|field| payload.get(*field).and_then(Value::as_str))?;
    Some((method.to_uppercase(), path.to_string()))
}

/// Accessors the store handlers need on a proxy request.
pub trait StoreRequest {
    /// The `storeId` path parameter.
    fn store_id(&self) -> Result<&str, HandlerError>;

    /// The request body parsed as JSON, base64-decoded first when flagged.
    fn json_body(&self) -> Result<Value, HandlerError>;
}

impl StoreRequest for ApiGatewayProxyRequest {
    fn store_id(&self) -> Result<&str, HandlerError> {
        self.path_parameters
            .get(STORE_ID_ATTRIBUTE)
            .map(String::as_str)
            .ok_or_else(|| {
                HandlerError::InvalidInput(format!(
                    "Missing path parameter: {STORE_ID_ATTRIBUTE}"
                ))
            })
    }

    fn json_body(&self) -> Result<Value, HandlerError> {
        let body = self
            .body
            .as_deref()
            .ok_or_else(|| HandlerError::InvalidInput("Request body is missing".to_string()))?;

        let bytes = if self.is_base64_encoded {
            STANDARD.decode(body.as_bytes()).map_err(|e| {
                HandlerError::InvalidInput(format!("Malformed base64 body: {e}"))
            })?
        } else {
            body.as_bytes().to_vec()
        };

        serde_json::from_slice(&bytes)
            .map_err(|e| HandlerError::InvalidInput(format!("Malformed JSON body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_rest_proxy_event() {
        let event = parse_event(json!({
            "httpMethod": "PUT",
            "resource": "/store/{storeId}",
            "path": "/store/s1",
            "pathParameters": {"storeId": "s1"},
            "headers": {"Content-Type": "application/json"},
            "body": "{\"name\":\"Acme2\"}",
            "isBase64Encoded": false,
        }))
        .unwrap();

        assert_eq!(event.store_id().unwrap(), "s1");
        assert_eq!(event.json_body().unwrap(), json!({"name": "Acme2"}));
    }

    #[test]
    fn test_null_fields_are_accepted() {
        let event = parse_event(json!({
            "httpMethod": "GET",
            "path": "/stores",
            "pathParameters": null,
            "body": null,
            "isBase64Encoded": null,
        }))
        .unwrap();

        assert!(event.path_parameters.is_empty());
        assert!(event.body.is_none());
    }

    #[test]
    fn test_object_body_is_malformed_event() {
        let error = parse_event(json!({
            "httpMethod": "POST",
            "resource": "/store",
            "body": {"storeId": "s1"},
        }))
        .unwrap_err();

        assert!(matches!(error, HandlerError::InvalidInput(_)));
        assert!(error.to_string().starts_with("Malformed event"));
    }

    #[test]
    fn test_non_string_path_parameter_is_malformed_event() {
        let error = parse_event(json!({
            "httpMethod": "GET",
            "resource": "/store/{storeId}",
            "pathParameters": {"storeId": 7},
        }))
        .unwrap_err();

        assert!(error.to_string().starts_with("Malformed event"));
    }

    #[test]
    fn test_method_and_path_prefers_resource() {
        let payload = json!({
            "httpMethod": "put",
            "resource": "/store/{storeId}",
            "path": "/store/s1",
            "body": {"ignored": true},
        });

        assert_eq!(
            method_and_path(&payload),
            Some(("PUT".to_string(), "/store/{storeId}".to_string()))
        );
    }

    #[test]
    fn test_method_and_path_falls_back_to_path() {
        let payload = json!({"httpMethod": "GET", "resource": null, "path": "/stores"});

        assert_eq!(
            method_and_path(&payload),
            Some(("GET".to_string(), "/stores".to_string()))
        );
        assert_eq!(method_and_path(&json!({"path": "/stores"})), None);
    }

    #[test]
    fn test_missing_store_id_is_client_input_error() {
        let error = ApiGatewayProxyRequest::default().store_id().unwrap_err();

        assert!(matches!(error, HandlerError::InvalidInput(_)));
        assert_eq!(error.to_string(), "Missing path parameter: storeId");
    }

    #[test]
    fn test_missing_body_is_client_input_error() {
        let error = ApiGatewayProxyRequest::default().json_body().unwrap_err();
        assert!(matches!(error, HandlerError::InvalidInput(_)));
    }

    #[test]
    fn test_malformed_body_is_client_input_error() {
        let mut event = ApiGatewayProxyRequest::default();
        event.body = Some("{not json".to_string());

        let error = event.json_body().unwrap_err();
        assert!(error.to_string().starts_with("Malformed JSON body"));
    }

    #[test]
    fn test_base64_body_is_decoded() {
        let mut event = ApiGatewayProxyRequest::default();
        event.body = Some(STANDARD.encode(br#"{"storeId":"s1"}"#));
        event.is_base64_encoded = true;

        assert_eq!(event.json_body().unwrap(), json!({"storeId": "s1"}));
    }
}
