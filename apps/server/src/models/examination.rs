//! Examination (pemeriksaan) domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Examination {
    pub id: i32,
    #[serde(rename = "antrian_id")]
    pub queue_entry_id: i32,
    pub icd_id: Option<i32>,
    #[serde(rename = "nadi")]
    pub pulse: Option<String>,
    #[serde(rename = "tekanan_darah")]
    pub blood_pressure: Option<String>,
    #[serde(rename = "suhu")]
    pub temperature: Option<String>,
    #[serde(rename = "berat_badan")]
    pub weight: Option<String>,
    #[serde(rename = "keadaan_umum")]
    pub general_condition: Option<String>,
    #[serde(rename = "keluhan")]
    pub complaint: Option<String>,
    #[serde(rename = "riwayat_penyakit")]
    pub medical_history: Option<String>,
    #[serde(rename = "keterangan")]
    pub note: Option<String>,
    #[serde(rename = "tindakan")]
    pub treatment: Option<String>,
    #[serde(rename = "tanggal_pemeriksaan")]
    pub examined_on: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExaminationRequest {
    #[serde(rename = "antrian_id")]
    #[validate(range(min = 1, message = "antrian_id must be a positive id"))]
    pub queue_entry_id: i32,
    pub icd_id: Option<i32>,
    #[serde(rename = "nadi")]
    pub pulse: Option<String>,
    #[serde(rename = "tekanan_darah")]
    pub blood_pressure: Option<String>,
    #[serde(rename = "suhu")]
    pub temperature: Option<String>,
    #[serde(rename = "berat_badan")]
    pub weight: Option<String>,
    #[serde(rename = "keadaan_umum")]
    pub general_condition: Option<String>,
    #[serde(rename = "keluhan")]
    pub complaint: Option<String>,
    #[serde(rename = "riwayat_penyakit")]
    pub medical_history: Option<String>,
    #[serde(rename = "keterangan")]
    pub note: Option<String>,
    #[serde(rename = "tindakan")]
    pub treatment: Option<String>,
    #[serde(rename = "tanggal_pemeriksaan")]
    pub examined_on: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateExaminationRequest {
    pub icd_id: Option<i32>,
    #[serde(rename = "nadi")]
    pub pulse: Option<String>,
    #[serde(rename = "tekanan_darah")]
    pub blood_pressure: Option<String>,
    #[serde(rename = "suhu")]
    pub temperature: Option<String>,
    #[serde(rename = "berat_badan")]
    pub weight: Option<String>,
    #[serde(rename = "keadaan_umum")]
    pub general_condition: Option<String>,
    #[serde(rename = "keluhan")]
    pub complaint: Option<String>,
    #[serde(rename = "riwayat_penyakit")]
    pub medical_history: Option<String>,
    #[serde(rename = "keterangan")]
    pub note: Option<String>,
    #[serde(rename = "tindakan")]
    pub treatment: Option<String>,
    #[serde(rename = "tanggal_pemeriksaan")]
    pub examined_on: NaiveDate,
}

/// Patient-history projection joining patient, doctor, clinic and diagnosis.
#[derive(Debug, Clone, Serialize)]
pub struct ExaminationDetail {
    pub id: i32,
    #[serde(rename = "tanggal_pemeriksaan")]
    pub examined_on: NaiveDate,
    #[serde(rename = "nadi")]
    pub pulse: Option<String>,
    #[serde(rename = "tekanan_darah")]
    pub blood_pressure: Option<String>,
    #[serde(rename = "suhu")]
    pub temperature: Option<String>,
    #[serde(rename = "berat_badan")]
    pub weight: Option<String>,
    #[serde(rename = "keluhan")]
    pub complaint: Option<String>,
    #[serde(rename = "tindakan")]
    pub treatment: Option<String>,
    #[serde(rename = "pasien")]
    pub patient: ExaminationPatient,
    #[serde(rename = "dokter")]
    pub doctor: IdNama,
    #[serde(rename = "poli")]
    pub clinic: IdNama,
    #[serde(rename = "diagnosis")]
    pub diagnosis: ExaminationDiagnosis,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdNama {
    pub id: i32,
    #[serde(rename = "nama")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExaminationPatient {
    pub id: i32,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "no_rekam_medis")]
    pub medical_record_no: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExaminationDiagnosis {
    pub id: Option<i32>,
    #[serde(rename = "kode")]
    pub code: Option<String>,
    #[serde(rename = "penyakit")]
    pub disease_name: Option<String>,
}
