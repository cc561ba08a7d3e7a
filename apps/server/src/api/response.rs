//! Success response envelope.
//!
//! All endpoints answer `{"status", "message", "data"}`; list endpoints add
//! `"metadata"`. Errors produce the same envelope through
//! `Error::into_response`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use super::pagination::PageInfo;

pub fn success<T: Serialize>(status: StatusCode, data: T, message: &str) -> Response {
    (
        status,
        Json(json!({
            "status": "success",
            "message": message,
            "data": data,
        })),
    )
        .into_response()
}

pub fn success_page<T: Serialize>(data: T, metadata: PageInfo) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "metadata": metadata,
            "data": data,
        })),
    )
        .into_response()
}
