//! ICD code catalog repository.

use sqlx::PgPool;

use super::classify_unique;
use crate::{
    models::icd::{IcdCode, IcdRequest},
    Error, Result,
};

const ICD_COLUMNS: &str = "id, code, disease_name, description, status, created_at, updated_at";

#[derive(Clone)]
pub struct IcdRepository {
    pool: PgPool,
}

impl IcdRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, req: &IcdRequest) -> Result<IcdCode> {
        let query = format!(
            "INSERT INTO icd_codes (code, disease_name, description, status)
             VALUES ($1, $2, $3, $4)
             RETURNING {ICD_COLUMNS}"
        );

        sqlx::query_as::<_, IcdCode>(&query)
            .bind(&req.code)
            .bind(&req.disease_name)
            .bind(&req.description)
            .bind(&req.status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_unique(e, || Error::Conflict("ICD code already exists".into())))
    }

    pub async fn list(&self, page: i64, page_size: i64) -> Result<(Vec<IcdCode>, i64)> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM icd_codes WHERE deleted_at IS NULL")
                .fetch_one(&self.pool)
                .await
                .map_err(Error::Database)?;

        let query = format!(
            "SELECT {ICD_COLUMNS} FROM icd_codes
             WHERE deleted_at IS NULL
             ORDER BY code ASC
             LIMIT $1 OFFSET $2"
        );

        let codes: Vec<IcdCode> = sqlx::query_as(&query)
            .bind(page_size)
            .bind((page - 1) * page_size)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok((codes, total))
    }

    pub async fn find(&self, id: i32) -> Result<Option<IcdCode>> {
        let query =
            format!("SELECT {ICD_COLUMNS} FROM icd_codes WHERE id = $1 AND deleted_at IS NULL");

        sqlx::query_as::<_, IcdCode>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    pub async fn update(&self, id: i32, req: &IcdRequest) -> Result<Option<IcdCode>> {
        let query = format!(
            "UPDATE icd_codes
             SET code = $2, disease_name = $3, description = $4, status = $5, updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {ICD_COLUMNS}"
        );

        sqlx::query_as::<_, IcdCode>(&query)
            .bind(id)
            .bind(&req.code)
            .bind(&req.disease_name)
            .bind(&req.description)
            .bind(&req.status)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify_unique(e, || Error::Conflict("ICD code already exists".into())))
    }

    /// Soft delete. Returns whether a live row was affected.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE icd_codes SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }
}
