//! Staff (petugas) repository.

use sqlx::PgPool;

use super::classify_constraint;
use crate::{
    models::staff::{Role, Staff},
    Error, Result,
};

const STAFF_COLUMNS: &str = "id, clinic_id, username, name, status, role, password_hash, \
                             must_change_password, created_at, updated_at";

#[derive(Debug, Clone, Default)]
pub struct ListStaffParams {
    pub name: Option<String>,
    pub status: Option<String>,
    pub page: i64,
    pub page_size: i64,
}

#[derive(Debug, Clone)]
pub struct StaffWrite {
    pub clinic_id: Option<i32>,
    pub username: String,
    pub name: String,
    pub status: String,
    pub role: Role,
}

fn conflict_error() -> Error {
    Error::Conflict("username already exists".to_string())
}

fn reference_error() -> Error {
    Error::InvalidReference("invalid poli_id".to_string())
}

#[derive(Clone)]
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new staff member with an already-hashed initial password.
    pub async fn create(&self, write: &StaffWrite, password_hash: &str) -> Result<Staff> {
        let query = format!(
            "INSERT INTO staff (clinic_id, username, name, status, role, password_hash,
                                must_change_password)
             VALUES ($1, $2, $3, $4, $5, $6, TRUE)
             RETURNING {STAFF_COLUMNS}"
        );

        sqlx::query_as::<_, Staff>(&query)
            .bind(write.clinic_id)
            .bind(&write.username)
            .bind(&write.name)
            .bind(&write.status)
            .bind(write.role.as_str())
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_constraint(e, conflict_error, reference_error))
    }

    pub async fn list(&self, params: &ListStaffParams) -> Result<(Vec<Staff>, i64)> {
        let name_pattern = params.name.as_ref().map(|n| format!("%{n}%"));
        let offset = (params.page - 1) * params.page_size;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM staff
             WHERE deleted_at IS NULL
               AND ($1::text IS NULL OR name ILIKE $1)
               AND ($2::text IS NULL OR status = $2)",
        )
        .bind(&name_pattern)
        .bind(&params.status)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        let query = format!(
            "SELECT {STAFF_COLUMNS} FROM staff
             WHERE deleted_at IS NULL
               AND ($1::text IS NULL OR name ILIKE $1)
               AND ($2::text IS NULL OR status = $2)
             ORDER BY name ASC
             LIMIT $3 OFFSET $4"
        );

        let staff: Vec<Staff> = sqlx::query_as(&query)
            .bind(&name_pattern)
            .bind(&params.status)
            .bind(params.page_size)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok((staff, total))
    }

    pub async fn find(&self, id: i32) -> Result<Option<Staff>> {
        let query =
            format!("SELECT {STAFF_COLUMNS} FROM staff WHERE id = $1 AND deleted_at IS NULL");

        sqlx::query_as::<_, Staff>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Staff>> {
        let query =
            format!("SELECT {STAFF_COLUMNS} FROM staff WHERE username = $1 AND deleted_at IS NULL");

        sqlx::query_as::<_, Staff>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    pub async fn update(&self, id: i32, write: &StaffWrite) -> Result<Option<Staff>> {
        let query = format!(
            "UPDATE staff
             SET clinic_id = $2, username = $3, name = $4, status = $5, role = $6,
                 updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {STAFF_COLUMNS}"
        );

        sqlx::query_as::<_, Staff>(&query)
            .bind(id)
            .bind(write.clinic_id)
            .bind(&write.username)
            .bind(&write.name)
            .bind(&write.status)
            .bind(write.role.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify_constraint(e, conflict_error, reference_error))
    }

    pub async fn update_password(&self, id: i32, password_hash: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE staff
             SET password_hash = $2, must_change_password = FALSE, updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }

    /// Soft delete. Returns whether a live row was affected.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result =
            sqlx::query("UPDATE staff SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }
}
