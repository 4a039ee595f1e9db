//! HTTP request handlers for the mock server.

pub mod links;
pub mod records;

pub use links::*;
pub use records::*;

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use base64::Engine as _;

use crate::endpoints::Resource;
use crate::mock_server::state::MockState;

/// An error response in the shape Insightly uses.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({ "Message": message.into() })),
    )
        .into_response()
}

/// Check Basic auth against the required API key, if any.
pub(crate) fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(expected) = state.required_api_key.as_deref() else {
        return Ok(());
    };

    let api_key = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Basic "))
        .and_then(|encoded| base64::engine::general_purpose::STANDARD.decode(encoded).ok())
        .and_then(|decoded| String::from_utf8(decoded).ok())
        .and_then(|credentials| credentials.split(':').next().map(str::to_string));

    match api_key {
        Some(key) if key == expected => Ok(()),
        _ => Err(error_response(
            StatusCode::UNAUTHORIZED,
            "Authorization has been denied for this request.",
        )),
    }
}

/// Resolve a resource from its URL segment.
pub(crate) fn resource(segment: &str) -> Result<Resource, Response> {
    Resource::from_name(segment).ok_or_else(|| {
        error_response(
            StatusCode::NOT_FOUND,
            format!("No HTTP resource was found that matches '{segment}'."),
        )
    })
}

/// Parse a numeric record ID from its URL segment.
pub(crate) fn record_id(segment: &str) -> Result<i64, Response> {
    segment.parse().map_err(|_| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("The value '{segment}' is not valid for an ID."),
        )
    })
}
