//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `storekeep_core::storage`.

use std::error::Error;
use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use storekeep_core::storage::StoreError;

/// Map a GetItem SDK error to StoreError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
    table_name: &str,
) -> StoreError {
    const OPERATION: &str = "GetItem";
    if let Some(error) = transport_error(&err, OPERATION) {
        return error;
    }
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => table_not_found(table_name),
        GetItemError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        GetItemError::RequestLimitExceeded(_) => request_limit_exceeded(),
        err => request_failed(OPERATION, &err),
    }
}

/// Map a PutItem SDK error to StoreError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    table_name: &str,
) -> StoreError {
    const OPERATION: &str = "PutItem";
    if let Some(error) = transport_error(&err, OPERATION) {
        return error;
    }
    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => table_not_found(table_name),
        PutItemError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        PutItemError::RequestLimitExceeded(_) => request_limit_exceeded(),
        err => request_failed(OPERATION, &err),
    }
}

/// Map an UpdateItem SDK error to StoreError.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
    table_name: &str,
) -> StoreError {
    const OPERATION: &str = "UpdateItem";
    if let Some(error) = transport_error(&err, OPERATION) {
        return error;
    }
    match err.into_service_error() {
        UpdateItemError::ResourceNotFoundException(_) => table_not_found(table_name),
        UpdateItemError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        UpdateItemError::RequestLimitExceeded(_) => request_limit_exceeded(),
        err => request_failed(OPERATION, &err),
    }
}

/// Map a DeleteItem SDK error to StoreError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    table_name: &str,
) -> StoreError {
    const OPERATION: &str = "DeleteItem";
    if let Some(error) = transport_error(&err, OPERATION) {
        return error;
    }
    match err.into_service_error() {
        DeleteItemError::ResourceNotFoundException(_) => table_not_found(table_name),
        DeleteItemError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        DeleteItemError::RequestLimitExceeded(_) => request_limit_exceeded(),
        err => request_failed(OPERATION, &err),
    }
}

/// Map a Scan SDK error to StoreError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
    table_name: &str,
) -> StoreError {
    const OPERATION: &str = "Scan";
    if let Some(error) = transport_error(&err, OPERATION) {
        return error;
    }
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => table_not_found(table_name),
        ScanError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        ScanError::RequestLimitExceeded(_) => request_limit_exceeded(),
        err => request_failed(OPERATION, &err),
    }
}

/// Errors raised before DynamoDB produced a response.
fn transport_error<E, R>(err: &SdkError<E, R>, operation: &'static str) -> Option<StoreError>
where
    E: Error + 'static,
    R: Debug,
{
    match err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
            Some(StoreError::ConnectionFailed(format!(
                "{operation}: {}",
                DisplayErrorContext(err)
            )))
        }
        SdkError::ConstructionFailure(_) => Some(StoreError::RequestFailed {
            operation,
            message: DisplayErrorContext(err).to_string(),
        }),
        _ => None,
    }
}

fn table_not_found(table_name: &str) -> StoreError {
    StoreError::TableNotFound(table_name.to_string())
}

fn throughput_exceeded() -> StoreError {
    StoreError::Throttled("Throughput exceeded, please retry".to_string())
}

fn request_limit_exceeded() -> StoreError {
    StoreError::Throttled("Request limit exceeded, please retry".to_string())
}

fn request_failed<E: Error>(operation: &'static str, err: &E) -> StoreError {
    StoreError::RequestFailed {
        operation,
        message: DisplayErrorContext(err).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::types::error::{
        InternalServerError, ProvisionedThroughputExceededException, ResourceNotFoundException,
    };

    #[test]
    fn test_missing_table_maps_to_table_not_found() {
        let err = SdkError::service_error(
            GetItemError::ResourceNotFoundException(
                ResourceNotFoundException::builder()
                    .message("Requested resource not found")
                    .build(),
            ),
            (),
        );

        assert_eq!(
            map_get_item_error(err, "stores"),
            StoreError::TableNotFound("stores".to_string())
        );
    }

    #[test]
    fn test_throughput_maps_to_throttled() {
        let err = SdkError::service_error(
            ScanError::ProvisionedThroughputExceededException(
                ProvisionedThroughputExceededException::builder().build(),
            ),
            (),
        );

        assert!(matches!(
            map_scan_error(err, "stores"),
            StoreError::Throttled(_)
        ));
    }

    #[test]
    fn test_other_service_errors_keep_their_message() {
        let err = SdkError::service_error(
            PutItemError::InternalServerError(
                InternalServerError::builder()
                    .message("Internal server error")
                    .build(),
            ),
            (),
        );

        match map_put_item_error(err, "stores") {
            StoreError::RequestFailed { operation, message } => {
                assert_eq!(operation, "PutItem");
                assert!(message.contains("Internal server error"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_timeout_maps_to_connection_failed() {
        let err: SdkError<DeleteItemError, ()> = SdkError::timeout_error("operation timed out");

        match map_delete_item_error(err, "stores") {
            StoreError::ConnectionFailed(message) => assert!(message.starts_with("DeleteItem")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
