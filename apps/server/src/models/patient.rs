//! Patient (pasien) domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Patient {
    pub id: i32,
    pub nik: String,
    #[serde(rename = "no_rekam_medis")]
    pub medical_record_no: Option<String>,
    #[serde(rename = "no_kartu_jaminan")]
    pub insurance_no: Option<String>,
    #[serde(rename = "username_pasien")]
    pub username: String,
    #[serde(rename = "no_telepon_pasien")]
    pub phone: Option<String>,
    #[serde(rename = "nama_pasien")]
    pub name: String,
    #[serde(rename = "alamat_pasien")]
    pub address: String,
    #[serde(rename = "tempat_lahir_pasien")]
    pub birth_place: String,
    #[serde(rename = "tanggal_lahir_pasien")]
    pub birth_date: NaiveDate,
    #[serde(rename = "jk_pasien")]
    pub sex: String,
    #[serde(rename = "status_pernikahan")]
    pub marital_status: String,
    #[serde(rename = "nama_keluarga_terdekat")]
    pub next_of_kin_name: Option<String>,
    #[serde(rename = "no_telepon_keluarga_terdekat")]
    pub next_of_kin_phone: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn validate_nik(nik: &str) -> Result<(), ValidationError> {
    if nik.len() != 16 || !nik.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("nik", "nik must be exactly 16 digits"));
    }
    Ok(())
}

fn validate_sex(sex: &str) -> Result<(), ValidationError> {
    match sex {
        "L" | "P" => Ok(()),
        _ => Err(invalid("jk_pasien", "jk_pasien must be L or P")),
    }
}

fn validate_marital_status(status: &str) -> Result<(), ValidationError> {
    match status {
        "single" | "married" | "divorced" | "widowed" => Ok(()),
        _ => Err(invalid(
            "status_pernikahan",
            "status_pernikahan must be one of single, married, divorced, widowed",
        )),
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePatientRequest {
    #[validate(custom(function = validate_nik))]
    pub nik: String,
    #[serde(rename = "no_rekam_medis")]
    pub medical_record_no: Option<String>,
    #[serde(rename = "no_kartu_jaminan")]
    pub insurance_no: Option<String>,
    #[serde(rename = "username_pasien")]
    #[validate(length(min = 5, message = "username_pasien must be at least 5 characters"))]
    pub username: String,
    #[serde(rename = "no_telepon_pasien")]
    pub phone: Option<String>,
    #[serde(rename = "nama_pasien")]
    #[validate(length(min = 1, message = "nama_pasien is required"))]
    pub name: String,
    #[serde(rename = "alamat_pasien")]
    #[validate(length(min = 1, message = "alamat_pasien is required"))]
    pub address: String,
    #[serde(rename = "tempat_lahir_pasien")]
    #[validate(length(min = 1, message = "tempat_lahir_pasien is required"))]
    pub birth_place: String,
    #[serde(rename = "tanggal_lahir_pasien")]
    pub birth_date: NaiveDate,
    #[serde(rename = "jk_pasien")]
    #[validate(custom(function = validate_sex))]
    pub sex: String,
    #[serde(rename = "status_pernikahan")]
    #[validate(custom(function = validate_marital_status))]
    pub marital_status: String,
    #[serde(rename = "nama_keluarga_terdekat")]
    pub next_of_kin_name: Option<String>,
    #[serde(rename = "no_telepon_keluarga_terdekat")]
    pub next_of_kin_phone: Option<String>,
    /// Hashed before storage; omitted means the account cannot log in yet.
    pub password: Option<String>,
}

pub type UpdatePatientRequest = CreatePatientRequest;

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreatePatientRequest {
        serde_json::from_value(serde_json::json!({
            "nik": "3174012345678901",
            "username_pasien": "budi01",
            "nama_pasien": "Budi Santoso",
            "alamat_pasien": "Jl. Melati 5",
            "tempat_lahir_pasien": "Jakarta",
            "tanggal_lahir_pasien": "1990-04-12",
            "jk_pasien": "L",
            "status_pernikahan": "married"
        }))
        .unwrap()
    }

    #[test]
    fn accepts_valid_patient() {
        assert!(base_request().validate().is_ok());
    }

    #[test]
    fn rejects_bad_nik_and_sex() {
        let mut req = base_request();
        req.nik = "12345".into();
        assert!(req.validate().is_err());

        let mut req = base_request();
        req.sex = "X".into();
        assert!(req.validate().is_err());
    }
}
