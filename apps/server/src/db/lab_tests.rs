//! Lab test catalog (jenis pemeriksaan lab) repository.

use sqlx::PgPool;

use super::classify_unique;
use crate::{
    models::lab::{LabTestType, LabTestTypeRequest},
    Error, Result,
};

const LAB_TEST_COLUMNS: &str = "id, name, unit, reference_range, criteria, created_at, updated_at";

#[derive(Clone)]
pub struct LabTestTypeRepository {
    pool: PgPool,
}

impl LabTestTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, req: &LabTestTypeRequest) -> Result<LabTestType> {
        let query = format!(
            "INSERT INTO lab_test_types (name, unit, reference_range, criteria)
             VALUES ($1, $2, $3, $4)
             RETURNING {LAB_TEST_COLUMNS}"
        );

        sqlx::query_as::<_, LabTestType>(&query)
            .bind(&req.name)
            .bind(&req.unit)
            .bind(&req.reference_range)
            .bind(&req.criteria)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                classify_unique(e, || Error::Conflict("lab test name already exists".into()))
            })
    }

    pub async fn list(&self, page: i64, page_size: i64) -> Result<(Vec<LabTestType>, i64)> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM lab_test_types WHERE deleted_at IS NULL")
                .fetch_one(&self.pool)
                .await
                .map_err(Error::Database)?;

        let query = format!(
            "SELECT {LAB_TEST_COLUMNS} FROM lab_test_types
             WHERE deleted_at IS NULL
             ORDER BY name ASC
             LIMIT $1 OFFSET $2"
        );

        let types: Vec<LabTestType> = sqlx::query_as(&query)
            .bind(page_size)
            .bind((page - 1) * page_size)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok((types, total))
    }

    pub async fn find(&self, id: i32) -> Result<Option<LabTestType>> {
        let query = format!(
            "SELECT {LAB_TEST_COLUMNS} FROM lab_test_types WHERE id = $1 AND deleted_at IS NULL"
        );

        sqlx::query_as::<_, LabTestType>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    pub async fn update(&self, id: i32, req: &LabTestTypeRequest) -> Result<Option<LabTestType>> {
        let query = format!(
            "UPDATE lab_test_types
             SET name = $2, unit = $3, reference_range = $4, criteria = $5, updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {LAB_TEST_COLUMNS}"
        );

        sqlx::query_as::<_, LabTestType>(&query)
            .bind(id)
            .bind(&req.name)
            .bind(&req.unit)
            .bind(&req.reference_range)
            .bind(&req.criteria)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                classify_unique(e, || Error::Conflict("lab test name already exists".into()))
            })
    }

    /// Soft delete. Returns whether a live row was affected.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE lab_test_types SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }
}
