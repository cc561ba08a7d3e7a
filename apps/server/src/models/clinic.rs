//! Polyclinic (poli) domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Clinic {
    pub id: i32,
    #[serde(rename = "nama")]
    pub name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClinicRequest {
    #[serde(rename = "nama")]
    #[validate(length(min = 1, message = "nama is required"))]
    pub name: String,
    #[validate(custom(function = super::validate_status))]
    pub status: String,
}
