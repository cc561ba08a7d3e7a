//! Lab result (hasil lab) repository.

use sqlx::PgPool;

use super::classify_constraint;
use crate::{
    models::lab::{LabResult, LabResultDetail},
    models::schedule::IdName,
    Error, Result,
};

const RESULT_COLUMNS: &str =
    "id, examination_id, lab_test_type_id, result, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct LabResultDetailRow {
    id: i32,
    result: String,
    test_type_id: i32,
    test_type_name: String,
}

impl From<LabResultDetailRow> for LabResultDetail {
    fn from(row: LabResultDetailRow) -> Self {
        LabResultDetail {
            id: row.id,
            result: row.result,
            test_type: IdName {
                id: row.test_type_id,
                name: row.test_type_name,
            },
        }
    }
}

fn reference_error() -> Error {
    Error::InvalidReference("invalid pemeriksaan_id or jenis_pemeriksaan_id".to_string())
}

#[derive(Clone)]
pub struct LabResultRepository {
    pool: PgPool,
}

impl LabResultRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        examination_id: i32,
        lab_test_type_id: i32,
        result: &str,
    ) -> Result<LabResult> {
        let query = format!(
            "INSERT INTO lab_results (examination_id, lab_test_type_id, result)
             VALUES ($1, $2, $3)
             RETURNING {RESULT_COLUMNS}"
        );

        sqlx::query_as::<_, LabResult>(&query)
            .bind(examination_id)
            .bind(lab_test_type_id)
            .bind(result)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_constraint(e, reference_error, reference_error))
    }

    /// All results for one examination, with test type names resolved.
    pub async fn list_by_examination(&self, examination_id: i32) -> Result<Vec<LabResultDetail>> {
        let rows: Vec<LabResultDetailRow> = sqlx::query_as(
            "SELECT r.id, r.result, t.id AS test_type_id, t.name AS test_type_name
             FROM lab_results r
             JOIN lab_test_types t ON t.id = r.lab_test_type_id
             WHERE r.examination_id = $1
             ORDER BY r.id ASC",
        )
        .bind(examination_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn update(&self, id: i32, result: &str) -> Result<Option<LabResult>> {
        let query = format!(
            "UPDATE lab_results SET result = $2, updated_at = now()
             WHERE id = $1
             RETURNING {RESULT_COLUMNS}"
        );

        sqlx::query_as::<_, LabResult>(&query)
            .bind(id)
            .bind(result)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM lab_results WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }
}
