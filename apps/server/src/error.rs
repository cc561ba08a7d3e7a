//! Error types for the clinic API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The caller supplied a dangling schedule/patient id.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// The patient already holds an overlapping appointment on the same date.
    #[error("Patient has another schedule that overlaps at the same time")]
    ScheduleOverlap,

    /// The patient already has an active entry for this schedule.
    #[error("Patient is already enrolled in this schedule")]
    DuplicateEnrollment,

    /// Uniqueness conflict outside the queue (username, ICD code, slot, ...).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Queue status may only advance (waiting -> in_diagnosis -> done).
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Convenience for the ubiquitous "data not found" case.
    pub fn not_found(what: impl Into<String>) -> Self {
        Error::NotFound(what.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::InvalidReference(_) | Error::Validation(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            Error::ScheduleOverlap
            | Error::DuplicateEnrollment
            | Error::Conflict(_)
            | Error::InvalidTransition { .. } => (StatusCode::CONFLICT, self.to_string()),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            Error::Unauthorized(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            Error::Forbidden(_) => (StatusCode::FORBIDDEN, self.to_string()),
            Error::Database(_) | Error::Internal(_) | Error::Other(_) => {
                // Detail goes to the log; the caller gets a generic message.
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "status": "error",
            "message": message,
            "data": null,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_conflicts_map_to_409() {
        for err in [
            Error::ScheduleOverlap,
            Error::DuplicateEnrollment,
            Error::Conflict("username already exists".into()),
            Error::InvalidTransition {
                from: "done".into(),
                to: "waiting".into(),
            },
        ] {
            assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
        }
    }

    #[test]
    fn reference_and_validation_map_to_400() {
        assert_eq!(
            Error::InvalidReference("invalid jadwal_id or pasien_id".into())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::Validation("tanggal must be YYYY-MM-DD".into())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn storage_failures_hide_detail() {
        let response = Error::Internal("pool exhausted".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
