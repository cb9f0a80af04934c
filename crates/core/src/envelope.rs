//! Response envelope.
//!
//! Every handler answers with an [`ApiGatewayProxyResponse`] carrying a
//! status code, a JSON content type, and a JSON text body. Successful bodies
//! carry `{message, data?, rawResult?}`; failed bodies carry
//! `{message, errorMsg, errorStack}`.

use std::error::Error;

use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::encodings::Body;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::{json, Value};

/// The two ways a request can fail inside a handler, plus a request that
/// reached no handler at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The event carried malformed input (missing path parameter, bad body).
    ClientInput,
    /// The store rejected the request or could not be reached.
    StoreOperation,
    /// No handler matches the event.
    UnknownRoute,
}

/// Maps an [`ErrorKind`] to an HTTP status code.
///
/// - `ClientInput` -> 500 (Internal Server Error)
/// - `StoreOperation` -> 500 (Internal Server Error)
/// - `UnknownRoute` -> 404 (Not Found)
///
/// Client input errors deliberately share the store's 500 so callers observe
/// a single failure status for every handler failure.
pub fn error_kind_to_status_code(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::ClientInput => 500,
        ErrorKind::StoreOperation => 500,
        ErrorKind::UnknownRoute => 404,
    }
}

/// How much internal detail a failed response exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorDetail {
    /// `errorStack` carries the error and its full source chain.
    #[default]
    Full,
    /// `errorStack` is empty.
    Redacted,
}

fn json_response(status_code: u16, body: String) -> ApiGatewayProxyResponse {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let mut response = ApiGatewayProxyResponse::default();
    response.status_code = status_code.into();
    response.headers = headers;
    response.body = Some(Body::Text(body));
    response.is_base64_encoded = false;
    response
}

/// Parses the body of a response back into JSON. An absent body reads as
/// `null`.
pub fn body_json(response: &ApiGatewayProxyResponse) -> serde_json::Result<Value> {
    match &response.body {
        Some(Body::Text(text)) => serde_json::from_str(text),
        Some(Body::Binary(bytes)) => serde_json::from_slice(bytes),
        _ => Ok(Value::Null),
    }
}

#[derive(Debug, Serialize)]
struct SuccessBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(rename = "rawResult", skip_serializing_if = "Option::is_none")]
    raw_result: Option<Value>,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    #[serde(rename = "errorMsg")]
    error_msg: String,
    #[serde(rename = "errorStack")]
    error_stack: String,
}

/// Builds a 200 response.
pub fn success(
    message: &str,
    data: Option<Value>,
    raw_result: Option<Value>,
) -> ApiGatewayProxyResponse {
    let body = SuccessBody {
        message,
        data,
        raw_result,
    };
    json_response(200, to_body(&body))
}

/// Builds a failed response for `error`.
pub fn failure(
    kind: ErrorKind,
    message: &str,
    error: &(dyn Error + 'static),
    detail: ErrorDetail,
) -> ApiGatewayProxyResponse {
    let body = ErrorBody {
        message,
        error_msg: error.to_string(),
        error_stack: match detail {
            ErrorDetail::Full => error_stack(error),
            ErrorDetail::Redacted => String::new(),
        },
    };
    json_response(error_kind_to_status_code(kind), to_body(&body))
}

/// Renders an error followed by its `source()` chain, one cause per line.
pub fn error_stack(error: &(dyn Error + 'static)) -> String {
    let mut stack = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        stack.push_str("\n    caused by: ");
        stack.push_str(&cause.to_string());
        source = cause.source();
    }
    stack
}

fn to_body<T: Serialize>(payload: &T) -> String {
    serde_json::to_string(payload).unwrap_or_else(|e| {
        json!({
            "message": "Failed to serialize response",
            "errorMsg": e.to_string(),
            "errorStack": "",
        })
        .to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("connection reset")]
    struct Transport;

    #[derive(Debug, Error)]
    #[error("GetItem failed")]
    struct Outer(#[source] Transport);

    #[test]
    fn test_client_input_maps_to_500() {
        assert_eq!(error_kind_to_status_code(ErrorKind::ClientInput), 500);
    }

    #[test]
    fn test_store_operation_maps_to_500() {
        assert_eq!(error_kind_to_status_code(ErrorKind::StoreOperation), 500);
    }

    #[test]
    fn test_unknown_route_maps_to_404() {
        assert_eq!(error_kind_to_status_code(ErrorKind::UnknownRoute), 404);
    }

    #[test]
    fn test_success_body_shape() {
        let response = success(
            "Successfully retrieved store",
            Some(json!({"storeId": "s1"})),
            Some(json!({"storeId": {"S": "s1"}})),
        );

        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert!(!response.is_base64_encoded);
        assert_eq!(
            body_json(&response).unwrap(),
            json!({
                "message": "Successfully retrieved store",
                "data": {"storeId": "s1"},
                "rawResult": {"storeId": {"S": "s1"}},
            })
        );
    }

    #[test]
    fn test_success_omits_absent_fields() {
        let response = success("Successfully deleted store", None, None);
        assert_eq!(
            body_json(&response).unwrap(),
            json!({"message": "Successfully deleted store"})
        );
    }

    #[test]
    fn test_failure_exposes_source_chain() {
        let error = Outer(Transport);
        let response = failure(
            ErrorKind::StoreOperation,
            "Failed to get store",
            &error,
            ErrorDetail::Full,
        );

        assert_eq!(response.status_code, 500);
        let body = body_json(&response).unwrap();
        assert_eq!(body["message"], "Failed to get store");
        assert_eq!(body["errorMsg"], "GetItem failed");
        assert_eq!(
            body["errorStack"],
            "GetItem failed\n    caused by: connection reset"
        );
    }

    #[test]
    fn test_failure_redacts_stack() {
        let response = failure(
            ErrorKind::ClientInput,
            "Failed to create store",
            &Transport,
            ErrorDetail::Redacted,
        );

        let body = body_json(&response).unwrap();
        assert_eq!(body["errorMsg"], "connection reset");
        assert_eq!(body["errorStack"], "");
    }

    #[test]
    fn test_response_serializes_status_code_in_camel_case() {
        let response = success("ok", None, None);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["statusCode"], 200);
        assert!(value["body"].is_string());
        assert_eq!(value["headers"]["content-type"], "application/json");
    }

    #[test]
    fn test_body_json_of_empty_response_is_null() {
        assert_eq!(
            body_json(&ApiGatewayProxyResponse::default()).unwrap(),
            Value::Null
        );
    }
}
