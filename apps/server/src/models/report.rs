//! Reporting aggregates.

use serde::{Deserialize, Serialize};

/// Visit volume per clinic over a date range.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClinicVisitReport {
    #[serde(rename = "nama_poli")]
    pub clinic_name: String,
    #[serde(rename = "jumlah_kunjungan")]
    pub visit_count: i64,
}

/// Most frequent diagnoses over a date range.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TopDiseaseReport {
    #[serde(rename = "kode_icd")]
    pub code: String,
    #[serde(rename = "nama_penyakit")]
    pub disease_name: String,
    #[serde(rename = "jumlah_kasus")]
    pub case_count: i64,
}
