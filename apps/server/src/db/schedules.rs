//! Schedule (jadwal) repository.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use super::{classify_constraint, traits::ScheduleStore};
use crate::{
    models::schedule::{IdName, Schedule, ScheduleDetail, ScheduleSlot},
    Error, Result,
};

const SCHEDULE_COLUMNS: &str = "id, staff_id, clinic_id, practice_date, start_time, end_time, \
                                note, created_at, updated_at";

#[derive(Debug, Clone, Default)]
pub struct ListScheduleParams {
    pub staff_id: Option<i32>,
    pub clinic_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Whitelisted sort key; anything unknown falls back to date descending.
    pub sort_by: Option<String>,
    pub page: i64,
    pub page_size: i64,
}

/// Validated insert/update payload (times already parsed and ordered).
#[derive(Debug, Clone)]
pub struct ScheduleWrite {
    pub staff_id: i32,
    pub clinic_id: i32,
    pub practice_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub note: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct ScheduleDetailRow {
    id: i32,
    practice_date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    note: Option<String>,
    staff_id: i32,
    staff_name: String,
    clinic_id: i32,
    clinic_name: String,
}

impl From<ScheduleDetailRow> for ScheduleDetail {
    fn from(row: ScheduleDetailRow) -> Self {
        ScheduleDetail {
            id: row.id,
            practice_date: row.practice_date,
            start_time: row.start_time,
            end_time: row.end_time,
            note: row.note,
            staff: IdName {
                id: row.staff_id,
                name: row.staff_name,
            },
            clinic: IdName {
                id: row.clinic_id,
                name: row.clinic_name,
            },
        }
    }
}

fn conflict_error() -> Error {
    Error::Conflict("schedule slot for this doctor at this time already exists".to_string())
}

fn reference_error() -> Error {
    Error::InvalidReference("invalid petugas_id or poli_id".to_string())
}

#[derive(Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, write: &ScheduleWrite) -> Result<Schedule> {
        let query = format!(
            "INSERT INTO schedules (staff_id, clinic_id, practice_date, start_time, end_time, note)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {SCHEDULE_COLUMNS}"
        );

        sqlx::query_as::<_, Schedule>(&query)
            .bind(write.staff_id)
            .bind(write.clinic_id)
            .bind(write.practice_date)
            .bind(write.start_time)
            .bind(write.end_time)
            .bind(&write.note)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_constraint(e, conflict_error, reference_error))
    }

    pub async fn list_details(
        &self,
        params: &ListScheduleParams,
    ) -> Result<(Vec<ScheduleDetail>, i64)> {
        let offset = (params.page - 1) * params.page_size;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM schedules
             WHERE deleted_at IS NULL
               AND ($1::int4 IS NULL OR staff_id = $1)
               AND ($2::int4 IS NULL OR clinic_id = $2)
               AND ($3::date IS NULL OR practice_date >= $3)
               AND ($4::date IS NULL OR practice_date <= $4)",
        )
        .bind(params.staff_id)
        .bind(params.clinic_id)
        .bind(params.start_date)
        .bind(params.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        let order_by = match params.sort_by.as_deref() {
            Some("tanggal_asc") => "s.practice_date ASC, s.start_time ASC",
            _ => "s.practice_date DESC, s.start_time ASC",
        };

        let query = format!(
            "SELECT s.id, s.practice_date, s.start_time, s.end_time, s.note,
                    st.id AS staff_id, st.name AS staff_name,
                    c.id AS clinic_id, c.name AS clinic_name
             FROM schedules s
             JOIN staff st ON st.id = s.staff_id
             JOIN clinics c ON c.id = s.clinic_id
             WHERE s.deleted_at IS NULL
               AND ($1::int4 IS NULL OR s.staff_id = $1)
               AND ($2::int4 IS NULL OR s.clinic_id = $2)
               AND ($3::date IS NULL OR s.practice_date >= $3)
               AND ($4::date IS NULL OR s.practice_date <= $4)
             ORDER BY {order_by}
             LIMIT $5 OFFSET $6"
        );

        let rows: Vec<ScheduleDetailRow> = sqlx::query_as(&query)
            .bind(params.staff_id)
            .bind(params.clinic_id)
            .bind(params.start_date)
            .bind(params.end_date)
            .bind(params.page_size)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    pub async fn find(&self, id: i32) -> Result<Option<Schedule>> {
        let query =
            format!("SELECT {SCHEDULE_COLUMNS} FROM schedules WHERE id = $1 AND deleted_at IS NULL");

        sqlx::query_as::<_, Schedule>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    pub async fn find_detail(&self, id: i32) -> Result<Option<ScheduleDetail>> {
        let row: Option<ScheduleDetailRow> = sqlx::query_as(
            "SELECT s.id, s.practice_date, s.start_time, s.end_time, s.note,
                    st.id AS staff_id, st.name AS staff_name,
                    c.id AS clinic_id, c.name AS clinic_name
             FROM schedules s
             JOIN staff st ON st.id = s.staff_id
             JOIN clinics c ON c.id = s.clinic_id
             WHERE s.id = $1 AND s.deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(Into::into))
    }

    pub async fn update(&self, id: i32, write: &ScheduleWrite) -> Result<Option<Schedule>> {
        let query = format!(
            "UPDATE schedules
             SET staff_id = $2, clinic_id = $3, practice_date = $4,
                 start_time = $5, end_time = $6, note = $7, updated_at = now()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {SCHEDULE_COLUMNS}"
        );

        sqlx::query_as::<_, Schedule>(&query)
            .bind(id)
            .bind(write.staff_id)
            .bind(write.clinic_id)
            .bind(write.practice_date)
            .bind(write.start_time)
            .bind(write.end_time)
            .bind(&write.note)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify_constraint(e, conflict_error, reference_error))
    }

    /// Soft delete. Returns whether a live row was affected.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE schedules SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ScheduleStore for ScheduleRepository {
    async fn get_by_id(&self, id: i32) -> Result<Option<ScheduleSlot>> {
        sqlx::query_as(
            "SELECT s.id, s.staff_id, s.clinic_id, s.practice_date, s.start_time, s.end_time,
                    c.name AS clinic_name, st.name AS staff_name
             FROM schedules s
             JOIN clinics c ON c.id = s.clinic_id
             JOIN staff st ON st.id = s.staff_id
             WHERE s.id = $1 AND s.deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)
    }
}
