//! Polyclinic (poli) repository.

use sqlx::PgPool;

use super::classify_unique;
use crate::{models::clinic::Clinic, Error, Result};

const CLINIC_COLUMNS: &str = "id, name, status, created_at, updated_at";

#[derive(Clone)]
pub struct ClinicRepository {
    pool: PgPool,
}

impl ClinicRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str, status: &str) -> Result<Clinic> {
        let query = format!(
            "INSERT INTO clinics (name, status) VALUES ($1, $2) RETURNING {CLINIC_COLUMNS}"
        );

        sqlx::query_as::<_, Clinic>(&query)
            .bind(name)
            .bind(status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_unique(e, || Error::Conflict("clinic name already exists".into())))
    }

    pub async fn list(&self, page: i64, page_size: i64) -> Result<(Vec<Clinic>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clinics WHERE deleted_at IS NULL")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        let query = format!(
            "SELECT {CLINIC_COLUMNS} FROM clinics
             WHERE deleted_at IS NULL
             ORDER BY name ASC
             LIMIT $1 OFFSET $2"
        );

        let clinics: Vec<Clinic> = sqlx::query_as(&query)
            .bind(page_size)
            .bind((page - 1) * page_size)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok((clinics, total))
    }

    pub async fn find(&self, id: i32) -> Result<Option<Clinic>> {
        let query =
            format!("SELECT {CLINIC_COLUMNS} FROM clinics WHERE id = $1 AND deleted_at IS NULL");

        sqlx::query_as::<_, Clinic>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    pub async fn update(&self, id: i32, name: &str, status: &str) -> Result<Option<Clinic>> {
        let query = format!(
            "UPDATE clinics SET name = $2, status = $3, updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {CLINIC_COLUMNS}"
        );

        sqlx::query_as::<_, Clinic>(&query)
            .bind(id)
            .bind(name)
            .bind(status)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify_unique(e, || Error::Conflict("clinic name already exists".into())))
    }

    /// Soft delete. Returns whether a live row was affected.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE clinics SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }
}
