//! Lab test catalog and lab result models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LabTestType {
    pub id: i32,
    #[serde(rename = "nama_pemeriksaan")]
    pub name: String,
    #[serde(rename = "satuan")]
    pub unit: Option<String>,
    #[serde(rename = "nilai_rujukan")]
    pub reference_range: Option<String>,
    #[serde(rename = "kriteria")]
    pub criteria: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LabTestTypeRequest {
    #[serde(rename = "nama_pemeriksaan")]
    #[validate(length(min = 3, message = "nama_pemeriksaan must be at least 3 characters"))]
    pub name: String,
    #[serde(rename = "satuan")]
    pub unit: Option<String>,
    #[serde(rename = "nilai_rujukan")]
    pub reference_range: Option<String>,
    #[serde(rename = "kriteria")]
    pub criteria: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LabResult {
    pub id: i32,
    #[serde(rename = "pemeriksaan_id")]
    pub examination_id: i32,
    #[serde(rename = "jenis_pemeriksaan_id")]
    pub lab_test_type_id: i32,
    #[serde(rename = "hasil")]
    pub result: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLabResultRequest {
    #[serde(rename = "jenis_pemeriksaan_id")]
    #[validate(range(min = 1, message = "jenis_pemeriksaan_id must be a positive id"))]
    pub lab_test_type_id: i32,
    #[serde(rename = "hasil")]
    #[validate(length(min = 1, message = "hasil is required"))]
    pub result: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateLabResultRequest {
    #[serde(rename = "hasil")]
    #[validate(length(min = 1, message = "hasil is required"))]
    pub result: String,
}

/// Lab result with its test type name resolved.
#[derive(Debug, Clone, Serialize)]
pub struct LabResultDetail {
    pub id: i32,
    #[serde(rename = "hasil")]
    pub result: String,
    #[serde(rename = "jenis_pemeriksaan")]
    pub test_type: super::schedule::IdName,
}
