//! ICD diagnosis code catalog models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct IcdCode {
    pub id: i32,
    #[serde(rename = "kode_icd")]
    pub code: String,
    #[serde(rename = "nama_penyakit")]
    pub disease_name: String,
    #[serde(rename = "deskripsi")]
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IcdRequest {
    #[serde(rename = "kode_icd")]
    #[validate(length(min = 1, message = "kode_icd is required"))]
    pub code: String,
    #[serde(rename = "nama_penyakit")]
    #[validate(length(min = 3, message = "nama_penyakit must be at least 3 characters"))]
    pub disease_name: String,
    #[serde(rename = "deskripsi")]
    pub description: Option<String>,
    #[validate(custom(function = super::validate_status))]
    pub status: String,
}
