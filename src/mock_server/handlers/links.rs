//! Link collection handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;

use super::{authorize, error_response, record_id, resource};
use crate::mock_server::state::MockState;

/// POST /{version}/{resource}/{id}/{collection}
pub async fn add_link(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path((_version, segment, id, collection)): Path<(String, String, String, String)>,
    Json(link): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let (resource, id) = match resource(&segment).and_then(|r| Ok((r, record_id(&id)?))) {
        Ok(parsed) => parsed,
        Err(response) => return response,
    };

    match state.add_link(resource, id, &collection, link) {
        Some(link) => (StatusCode::CREATED, Json(link)).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("{} {} has no {}", resource.id_field(), id, collection),
        ),
    }
}

/// PUT /{version}/{resource}/{id}/{collection}
pub async fn update_link(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path((_version, segment, id, collection)): Path<(String, String, String, String)>,
    Json(link): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let (resource, id) = match resource(&segment).and_then(|r| Ok((r, record_id(&id)?))) {
        Ok(parsed) => parsed,
        Err(response) => return response,
    };

    match state.update_link(resource, id, &collection, link) {
        Some(link) => (StatusCode::OK, Json(link)).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("Link not found on {} {}", resource.id_field(), id),
        ),
    }
}
