//! Record endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{authorize, error_response, record_id, resource};
use crate::mock_server::state::MockState;

/// Query parameters for listing records.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub skip: Option<usize>,
    pub top: Option<usize>,
}

/// GET /{version}/{resource}
pub async fn list_records(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path((_version, segment)): Path<(String, String)>,
    Query(query): Query<ListQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let resource = match resource(&segment) {
        Ok(resource) => resource,
        Err(response) => return response,
    };

    let records = state.list(resource, query.skip.unwrap_or(0), query.top);
    (StatusCode::OK, Json(records)).into_response()
}

/// GET /{version}/{resource}/{id}, including `{resource}/Search`.
pub async fn get_record(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path((_version, segment, id)): Path<(String, String, String)>,
    Query(filter): Query<Vec<(String, String)>>,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let resource = match resource(&segment) {
        Ok(resource) => resource,
        Err(response) => return response,
    };

    if id == "Search" {
        let found = state.search(resource, &filter);
        return (StatusCode::OK, Json(found)).into_response();
    }

    let id = match record_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.get(resource, id) {
        Some(record) => (StatusCode::OK, Json(record.clone())).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("{} {} not found", resource.id_field(), id),
        ),
    }
}

/// POST /{version}/{resource}
pub async fn create_record(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path((_version, segment)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let resource = match resource(&segment) {
        Ok(resource) => resource,
        Err(response) => return response,
    };

    if !body.is_object() {
        return error_response(StatusCode::BAD_REQUEST, "Expected a JSON object.");
    }

    let mut body = body;
    if let Some(map) = body.as_object_mut() {
        map.remove(resource.id_field());
    }

    let created = state.insert(resource, body);
    (StatusCode::CREATED, Json(created)).into_response()
}

/// PUT /{version}/{resource}/{id}
pub async fn update_record(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path((_version, segment, id)): Path<(String, String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let resource = match resource(&segment) {
        Ok(resource) => resource,
        Err(response) => return response,
    };
    let id = match record_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.update(resource, id, body) {
        Some(record) => (StatusCode::OK, Json(record)).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("{} {} not found", resource.id_field(), id),
        ),
    }
}

/// DELETE /{version}/{resource}/{id}
///
/// Responds `202 Accepted` with an empty body.
pub async fn delete_record(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path((_version, segment, id)): Path<(String, String, String)>,
) -> Response {
    let mut state = state.write().await;
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let resource = match resource(&segment) {
        Ok(resource) => resource,
        Err(response) => return response,
    };
    let id = match record_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    if state.remove(resource, id) {
        StatusCode::ACCEPTED.into_response()
    } else {
        error_response(
            StatusCode::NOT_FOUND,
            format!("{} {} not found", resource.id_field(), id),
        )
    }
}
