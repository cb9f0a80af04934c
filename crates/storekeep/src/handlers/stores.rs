//! Store CRUD handlers.
//!
//! Each handler reads its parameters from the event, issues exactly one
//! request against the item store, and returns the JSON payload of the
//! success envelope. `dispatch` wraps the outcome in the envelope.

use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use serde::Serialize;
use serde_json::Value;

use storekeep_core::envelope::{failure, success, ErrorKind};
use storekeep_core::item::WireItem;
use storekeep_core::marshal::{json_type_name, marshall_document, unmarshall_item};
use storekeep_core::storage::{ItemStore, ItemUpdate, StoreError};

use crate::event::{method_and_path, parse_event, StoreRequest};
use crate::handlers::HandlerError;
use crate::routing::{Route, UnknownRoute, UNKNOWN_ROUTE_MESSAGE};
use crate::state::AppState;

/// The `data` and `rawResult` fields of a success envelope.
#[derive(Debug, Default, PartialEq)]
pub struct Payload {
    pub data: Option<Value>,
    pub raw_result: Option<Value>,
}

fn raw<T: Serialize>(value: &T) -> Result<Value, HandlerError> {
    serde_json::to_value(value).map_err(|e| StoreError::Serialization(e.to_string()).into())
}

fn item_data(item: &WireItem) -> Result<Value, HandlerError> {
    let item = unmarshall_item(item).map_err(StoreError::from)?;
    Ok(Value::Object(item))
}

// ============================================================================
// Get Store
// ============================================================================

/// Get a store by id (GET /store/{storeId}).
///
/// A missing item is not an error: the payload carries `data: {}` and no
/// `rawResult`.
pub async fn get_store(
    store: &dyn ItemStore,
    event: &ApiGatewayProxyRequest,
) -> Result<Payload, HandlerError> {
    let store_id = event.store_id()?;

    match store.get_item(store_id).await? {
        Some(item) => {
            tracing::info!(store_id = %store_id, "Retrieved store");
            Ok(Payload {
                data: Some(item_data(&item)?),
                raw_result: Some(raw(&item)?),
            })
        }
        None => {
            tracing::info!(store_id = %store_id, "Store not found");
            Ok(Payload {
                data: Some(Value::Object(Default::default())),
                raw_result: None,
            })
        }
    }
}

// ============================================================================
// Create Store
// ============================================================================

/// Create or replace a store (POST /store).
///
/// The body is written verbatim as the item. A `null` body becomes an empty
/// item, which the store rejects for lacking its key.
pub async fn create_store(
    store: &dyn ItemStore,
    event: &ApiGatewayProxyRequest,
) -> Result<Payload, HandlerError> {
    let body = event.json_body()?;
    let item = marshall_document(&body)?;

    let ack = store.put_item(item).await?;
    tracing::info!("Created store");

    Ok(Payload {
        data: None,
        raw_result: Some(raw(&ack)?),
    })
}

// ============================================================================
// Update Store
// ============================================================================

/// Overwrite the named attributes of a store (PUT /store/{storeId}).
pub async fn update_store(
    store: &dyn ItemStore,
    event: &ApiGatewayProxyRequest,
) -> Result<Payload, HandlerError> {
    let store_id = event.store_id()?;
    let attributes = match event.json_body()? {
        Value::Object(attributes) => attributes,
        other => {
            return Err(HandlerError::InvalidInput(format!(
                "Expected a JSON object, got {}",
                json_type_name(&other)
            )))
        }
    };
    let update = ItemUpdate::from_attributes(&attributes)?;

    let ack = store.update_item(store_id, &update).await?;
    tracing::info!(
        store_id = %store_id,
        attributes = update.assignments().len(),
        "Updated store"
    );

    Ok(Payload {
        data: None,
        raw_result: Some(raw(&ack)?),
    })
}

// ============================================================================
// Delete Store
// ============================================================================

/// Delete a store (DELETE /store/{storeId}). Deleting a missing store succeeds.
pub async fn delete_store(
    store: &dyn ItemStore,
    event: &ApiGatewayProxyRequest,
) -> Result<Payload, HandlerError> {
    let store_id = event.store_id()?;

    let ack = store.delete_item(store_id).await?;
    tracing::info!(store_id = %store_id, "Deleted store");

    Ok(Payload {
        data: None,
        raw_result: Some(raw(&ack)?),
    })
}

// ============================================================================
// Get All Stores
// ============================================================================

/// List every store with one scan (GET /stores).
pub async fn get_all_stores(
    store: &dyn ItemStore,
    _event: &ApiGatewayProxyRequest,
) -> Result<Payload, HandlerError> {
    let output = store.scan().await?;

    if output.truncated {
        tracing::warn!(
            returned = output.items.len(),
            scanned = output.scanned_count,
            "Scan stopped at the response size limit; remaining stores are not returned"
        );
    }

    let data = output
        .items
        .iter()
        .map(item_data)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(count = data.len(), "Retrieved all stores");

    Ok(Payload {
        data: Some(Value::Array(data)),
        raw_result: Some(raw(&output.items)?),
    })
}

// ============================================================================
// Dispatch
// ============================================================================

/// Runs the handler for `route` and wraps its outcome in the response envelope.
pub async fn dispatch(
    state: &AppState,
    route: Route,
    event: &ApiGatewayProxyRequest,
) -> ApiGatewayProxyResponse {
    let store = state.store.as_ref();
    let result = match route {
        Route::GetStore => get_store(store, event).await,
        Route::CreateStore => create_store(store, event).await,
        Route::UpdateStore => update_store(store, event).await,
        Route::DeleteStore => delete_store(store, event).await,
        Route::GetAllStores => get_all_stores(store, event).await,
    };

    match result {
        Ok(payload) => success(route.success_message(), payload.data, payload.raw_result),
        Err(err) => failed(state, route, err),
    }
}

fn failed(state: &AppState, route: Route, err: HandlerError) -> ApiGatewayProxyResponse {
    tracing::error!(handler = route.name(), error = %err, "Handler failed");
    failure(err.kind(), route.failure_message(), &err, state.error_detail)
}

/// Resolves the route for a raw invocation payload and dispatches it.
///
/// The route fixed at startup wins; otherwise the payload's method and path
/// decide. A payload no handler serves gets a 404 envelope. A routed payload
/// that is not a well-formed proxy request fails like any other client input.
pub async fn handle(state: &AppState, payload: Value) -> ApiGatewayProxyResponse {
    let target = method_and_path(&payload);
    let route = state.route.or_else(|| {
        target
            .as_ref()
            .and_then(|(method, path)| Route::resolve(method, path))
    });

    let Some(route) = route else {
        let err = UnknownRoute::new(target);
        tracing::warn!(error = %err, "Unroutable event");
        return failure(
            ErrorKind::UnknownRoute,
            UNKNOWN_ROUTE_MESSAGE,
            &err,
            state.error_detail,
        );
    };

    tracing::Span::current().record("route", route.name());
    match parse_event(payload) {
        Ok(event) => dispatch(state, route, &event).await,
        Err(err) => failed(state, route, err),
    }
}
