//! Examination (pemeriksaan) repository.

use chrono::NaiveDate;
use sqlx::PgPool;

use super::classify_constraint;
use crate::{
    models::examination::{
        Examination, ExaminationDetail, ExaminationDiagnosis, ExaminationPatient, IdNama,
    },
    Error, Result,
};

const EXAM_COLUMNS: &str = "id, queue_entry_id, icd_id, pulse, blood_pressure, temperature, \
                            weight, general_condition, complaint, medical_history, note, \
                            treatment, examined_on, created_at, updated_at";

/// Column values for insert/update.
#[derive(Debug, Clone)]
pub struct ExaminationWrite {
    pub icd_id: Option<i32>,
    pub pulse: Option<String>,
    pub blood_pressure: Option<String>,
    pub temperature: Option<String>,
    pub weight: Option<String>,
    pub general_condition: Option<String>,
    pub complaint: Option<String>,
    pub medical_history: Option<String>,
    pub note: Option<String>,
    pub treatment: Option<String>,
    pub examined_on: NaiveDate,
}

#[derive(Debug, sqlx::FromRow)]
struct ExaminationDetailRow {
    id: i32,
    examined_on: NaiveDate,
    pulse: Option<String>,
    blood_pressure: Option<String>,
    temperature: Option<String>,
    weight: Option<String>,
    complaint: Option<String>,
    treatment: Option<String>,
    patient_id: i32,
    patient_name: String,
    medical_record_no: Option<String>,
    doctor_id: i32,
    doctor_name: String,
    clinic_id: i32,
    clinic_name: String,
    icd_id: Option<i32>,
    icd_code: Option<String>,
    disease_name: Option<String>,
}

impl From<ExaminationDetailRow> for ExaminationDetail {
    fn from(row: ExaminationDetailRow) -> Self {
        ExaminationDetail {
            id: row.id,
            examined_on: row.examined_on,
            pulse: row.pulse,
            blood_pressure: row.blood_pressure,
            temperature: row.temperature,
            weight: row.weight,
            complaint: row.complaint,
            treatment: row.treatment,
            patient: ExaminationPatient {
                id: row.patient_id,
                name: row.patient_name,
                medical_record_no: row.medical_record_no,
            },
            doctor: IdNama {
                id: row.doctor_id,
                name: row.doctor_name,
            },
            clinic: IdNama {
                id: row.clinic_id,
                name: row.clinic_name,
            },
            diagnosis: ExaminationDiagnosis {
                id: row.icd_id,
                code: row.icd_code,
                disease_name: row.disease_name,
            },
        }
    }
}

const DETAIL_SELECT: &str = "SELECT e.id, e.examined_on, e.pulse, e.blood_pressure, e.temperature,
            e.weight, e.complaint, e.treatment,
            p.id AS patient_id, p.name AS patient_name, p.medical_record_no,
            st.id AS doctor_id, st.name AS doctor_name,
            c.id AS clinic_id, c.name AS clinic_name,
            i.id AS icd_id, i.code AS icd_code, i.disease_name
     FROM examinations e
     JOIN queue_entries q ON q.id = e.queue_entry_id
     JOIN patients p ON p.id = q.patient_id
     JOIN schedules s ON s.id = q.schedule_id
     JOIN staff st ON st.id = s.staff_id
     JOIN clinics c ON c.id = s.clinic_id
     LEFT JOIN icd_codes i ON i.id = e.icd_id";

#[derive(Clone)]
pub struct ExaminationRepository {
    pool: PgPool,
}

impl ExaminationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, queue_entry_id: i32, write: &ExaminationWrite) -> Result<Examination> {
        let query = format!(
            "INSERT INTO examinations (queue_entry_id, icd_id, pulse, blood_pressure, temperature,
                                       weight, general_condition, complaint, medical_history,
                                       note, treatment, examined_on)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {EXAM_COLUMNS}"
        );

        self.bind_write(sqlx::query_as::<_, Examination>(&query).bind(queue_entry_id), write)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                classify_constraint(
                    e,
                    || Error::Conflict("examination for this visit already exists".to_string()),
                    || Error::InvalidReference("invalid antrian_id or icd_id".to_string()),
                )
            })
    }

    pub async fn find(&self, id: i32) -> Result<Option<Examination>> {
        let query = format!("SELECT {EXAM_COLUMNS} FROM examinations WHERE id = $1");

        sqlx::query_as::<_, Examination>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    pub async fn find_detail(&self, id: i32) -> Result<Option<ExaminationDetail>> {
        let query = format!("{DETAIL_SELECT} WHERE e.id = $1");

        let row: Option<ExaminationDetailRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.map(Into::into))
    }

    /// A patient's examination history, newest first.
    pub async fn list_by_patient(&self, patient_id: i32) -> Result<Vec<ExaminationDetail>> {
        let query =
            format!("{DETAIL_SELECT} WHERE p.id = $1 ORDER BY e.examined_on DESC, e.id DESC");

        let rows: Vec<ExaminationDetailRow> = sqlx::query_as(&query)
            .bind(patient_id)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn exists_for_queue_entry(&self, queue_entry_id: i32) -> Result<bool> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM examinations WHERE queue_entry_id = $1)")
            .bind(queue_entry_id)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)
    }

    pub async fn update(&self, id: i32, write: &ExaminationWrite) -> Result<Option<Examination>> {
        let query = format!(
            "UPDATE examinations
             SET icd_id = $2, pulse = $3, blood_pressure = $4, temperature = $5, weight = $6,
                 general_condition = $7, complaint = $8, medical_history = $9, note = $10,
                 treatment = $11, examined_on = $12, updated_at = now()
             WHERE id = $1
             RETURNING {EXAM_COLUMNS}"
        );

        self.bind_write(sqlx::query_as::<_, Examination>(&query).bind(id), write)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                classify_constraint(
                    e,
                    || Error::Conflict("examination for this visit already exists".to_string()),
                    || Error::InvalidReference("invalid icd_id".to_string()),
                )
            })
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM examinations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }

    fn bind_write<'q>(
        &self,
        query: sqlx::query::QueryAs<'q, sqlx::Postgres, Examination, sqlx::postgres::PgArguments>,
        write: &'q ExaminationWrite,
    ) -> sqlx::query::QueryAs<'q, sqlx::Postgres, Examination, sqlx::postgres::PgArguments> {
        query
            .bind(write.icd_id)
            .bind(&write.pulse)
            .bind(&write.blood_pressure)
            .bind(&write.temperature)
            .bind(&write.weight)
            .bind(&write.general_condition)
            .bind(&write.complaint)
            .bind(&write.medical_history)
            .bind(&write.note)
            .bind(&write.treatment)
            .bind(write.examined_on)
    }
}
