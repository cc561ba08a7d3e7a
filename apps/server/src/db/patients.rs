//! Patient (pasien) repository.

use chrono::NaiveDate;
use sqlx::PgPool;

use super::{classify_constraint, classify_unique};
use crate::{models::patient::Patient, Error, Result};

const PATIENT_COLUMNS: &str = "id, nik, medical_record_no, insurance_no, username, phone, name, \
                               address, birth_place, birth_date, sex, marital_status, \
                               next_of_kin_name, next_of_kin_phone, password_hash, \
                               created_at, updated_at";

#[derive(Debug, Clone, Default)]
pub struct ListPatientParams {
    pub name: Option<String>,
    pub nik: Option<String>,
    pub page: i64,
    pub page_size: i64,
}

/// Column values for insert/update; the password hash is produced upstream.
#[derive(Debug, Clone)]
pub struct PatientWrite {
    pub nik: String,
    pub medical_record_no: Option<String>,
    pub insurance_no: Option<String>,
    pub username: String,
    pub phone: Option<String>,
    pub name: String,
    pub address: String,
    pub birth_place: String,
    pub birth_date: NaiveDate,
    pub sex: String,
    pub marital_status: String,
    pub next_of_kin_name: Option<String>,
    pub next_of_kin_phone: Option<String>,
    pub password_hash: Option<String>,
}

fn conflict_error() -> Error {
    Error::Conflict("nik, username, or medical record number already exists".to_string())
}

#[derive(Clone)]
pub struct PatientRepository {
    pool: PgPool,
}

impl PatientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, write: &PatientWrite) -> Result<Patient> {
        let query = format!(
            "INSERT INTO patients (nik, medical_record_no, insurance_no, username, phone, name,
                                   address, birth_place, birth_date, sex, marital_status,
                                   next_of_kin_name, next_of_kin_phone, password_hash)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {PATIENT_COLUMNS}"
        );

        self.bind_write(sqlx::query_as::<_, Patient>(&query), write)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_unique(e, conflict_error))
    }

    pub async fn list(&self, params: &ListPatientParams) -> Result<(Vec<Patient>, i64)> {
        let name_pattern = params.name.as_ref().map(|n| format!("%{n}%"));
        let offset = (params.page - 1) * params.page_size;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM patients
             WHERE ($1::text IS NULL OR name ILIKE $1)
               AND ($2::text IS NULL OR nik = $2)",
        )
        .bind(&name_pattern)
        .bind(&params.nik)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        let query = format!(
            "SELECT {PATIENT_COLUMNS} FROM patients
             WHERE ($1::text IS NULL OR name ILIKE $1)
               AND ($2::text IS NULL OR nik = $2)
             ORDER BY name ASC
             LIMIT $3 OFFSET $4"
        );

        let patients: Vec<Patient> = sqlx::query_as(&query)
            .bind(&name_pattern)
            .bind(&params.nik)
            .bind(params.page_size)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok((patients, total))
    }

    pub async fn find(&self, id: i32) -> Result<Option<Patient>> {
        let query = format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = $1");

        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    pub async fn update(&self, id: i32, write: &PatientWrite) -> Result<Option<Patient>> {
        let query = format!(
            "UPDATE patients
             SET nik = $2, medical_record_no = $3, insurance_no = $4, username = $5, phone = $6,
                 name = $7, address = $8, birth_place = $9, birth_date = $10, sex = $11,
                 marital_status = $12, next_of_kin_name = $13, next_of_kin_phone = $14,
                 password_hash = COALESCE($15, password_hash), updated_at = now()
             WHERE id = $1
             RETURNING {PATIENT_COLUMNS}"
        );

        self.bind_write(sqlx::query_as::<_, Patient>(&query).bind(id), write)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify_unique(e, conflict_error))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                classify_constraint(
                    e,
                    || Error::Conflict("patient has related records".to_string()),
                    || Error::Conflict("patient has related records".to_string()),
                )
            })?;

        Ok(result.rows_affected() > 0)
    }

    fn bind_write<'q>(
        &self,
        query: sqlx::query::QueryAs<'q, sqlx::Postgres, Patient, sqlx::postgres::PgArguments>,
        write: &'q PatientWrite,
    ) -> sqlx::query::QueryAs<'q, sqlx::Postgres, Patient, sqlx::postgres::PgArguments> {
        query
            .bind(&write.nik)
            .bind(&write.medical_record_no)
            .bind(&write.insurance_no)
            .bind(&write.username)
            .bind(&write.phone)
            .bind(&write.name)
            .bind(&write.address)
            .bind(&write.birth_place)
            .bind(write.birth_date)
            .bind(&write.sex)
            .bind(&write.marital_status)
            .bind(&write.next_of_kin_name)
            .bind(&write.next_of_kin_phone)
            .bind(&write.password_hash)
    }
}
