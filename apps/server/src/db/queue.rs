//! Queue entry (antrian) repository.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use super::{classify_constraint, traits::QueueStore};
use crate::{
    models::queue::{
        NameRef, NewQueueEntry, Priority, QueueEntry, QueueEntryDetail, QueuePatientInfo,
        QueueScheduleInfo, QueueStatus,
    },
    Error, Result,
};

const ENTRY_COLUMNS: &str =
    "id, schedule_id, patient_id, ticket_number, priority, status, created_at, updated_at";

/// Listing filters for the queue; `None` means "no filter".
#[derive(Debug, Clone, Default)]
pub struct ListQueueParams {
    pub status: Option<QueueStatus>,
    pub practice_date: Option<NaiveDate>,
    pub clinic_id: Option<i32>,
    pub page: i64,
    pub page_size: i64,
}

/// Flat row behind [`QueueEntryDetail`].
#[derive(Debug, sqlx::FromRow)]
struct QueueDetailRow {
    id: i32,
    ticket_number: String,
    #[sqlx(try_from = "String")]
    priority: Priority,
    #[sqlx(try_from = "String")]
    status: QueueStatus,
    schedule_id: i32,
    practice_date: NaiveDate,
    clinic_name: String,
    doctor_name: String,
    patient_id: i32,
    patient_name: String,
}

impl From<QueueDetailRow> for QueueEntryDetail {
    fn from(row: QueueDetailRow) -> Self {
        QueueEntryDetail {
            id: row.id,
            ticket_number: row.ticket_number,
            priority: row.priority,
            status: row.status,
            schedule: QueueScheduleInfo {
                id: row.schedule_id,
                practice_date: row.practice_date,
                clinic: NameRef {
                    name: row.clinic_name,
                },
                doctor: NameRef {
                    name: row.doctor_name,
                },
            },
            patient: QueuePatientInfo {
                id: row.patient_id,
                name: row.patient_name,
            },
        }
    }
}

#[derive(Clone)]
pub struct QueueRepository {
    pool: PgPool,
}

impl QueueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Filtered, paged listing joined with display names.
    ///
    /// Ordered by creation time ascending so the queue reads in arrival
    /// order. Returns the page and the total record count for the filter.
    pub async fn list_details(
        &self,
        params: &ListQueueParams,
    ) -> Result<(Vec<QueueEntryDetail>, i64)> {
        let status = params.status.map(|s| s.as_str().to_string());
        let offset = (params.page - 1) * params.page_size;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)
             FROM queue_entries q
             JOIN schedules s ON s.id = q.schedule_id
             WHERE ($1::text IS NULL OR q.status = $1)
               AND ($2::date IS NULL OR s.practice_date = $2)
               AND ($3::int4 IS NULL OR s.clinic_id = $3)",
        )
        .bind(&status)
        .bind(params.practice_date)
        .bind(params.clinic_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        let rows: Vec<QueueDetailRow> = sqlx::query_as(
            "SELECT q.id, q.ticket_number, q.priority, q.status,
                    s.id AS schedule_id, s.practice_date,
                    c.name AS clinic_name, st.name AS doctor_name,
                    p.id AS patient_id, p.name AS patient_name
             FROM queue_entries q
             JOIN schedules s ON s.id = q.schedule_id
             JOIN clinics c ON c.id = s.clinic_id
             JOIN staff st ON st.id = s.staff_id
             JOIN patients p ON p.id = q.patient_id
             WHERE ($1::text IS NULL OR q.status = $1)
               AND ($2::date IS NULL OR s.practice_date = $2)
               AND ($3::int4 IS NULL OR s.clinic_id = $3)
             ORDER BY q.created_at ASC
             LIMIT $4 OFFSET $5",
        )
        .bind(&status)
        .bind(params.practice_date)
        .bind(params.clinic_id)
        .bind(params.page_size)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    /// Single entry joined with display names.
    pub async fn find_detail(&self, id: i32) -> Result<Option<QueueEntryDetail>> {
        let row: Option<QueueDetailRow> = sqlx::query_as(
            "SELECT q.id, q.ticket_number, q.priority, q.status,
                    s.id AS schedule_id, s.practice_date,
                    c.name AS clinic_name, st.name AS doctor_name,
                    p.id AS patient_id, p.name AS patient_name
             FROM queue_entries q
             JOIN schedules s ON s.id = q.schedule_id
             JOIN clinics c ON c.id = s.clinic_id
             JOIN staff st ON st.id = s.staff_id
             JOIN patients p ON p.id = q.patient_id
             WHERE q.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(Into::into))
    }
}

#[async_trait]
impl QueueStore for QueueRepository {
    async fn create(&self, entry: NewQueueEntry) -> Result<QueueEntry> {
        let query = format!(
            "INSERT INTO queue_entries (schedule_id, patient_id, ticket_number, priority, status)
             VALUES ($1, $2, $3, $4, 'waiting')
             RETURNING {ENTRY_COLUMNS}"
        );

        sqlx::query_as::<_, QueueEntry>(&query)
            .bind(entry.schedule_id)
            .bind(entry.patient_id)
            .bind(&entry.ticket_number)
            .bind(entry.priority.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                classify_constraint(
                    e,
                    || Error::DuplicateEnrollment,
                    || Error::InvalidReference("invalid jadwal_id or pasien_id".to_string()),
                )
            })
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<QueueEntry>> {
        let query = format!("SELECT {ENTRY_COLUMNS} FROM queue_entries WHERE id = $1");

        sqlx::query_as::<_, QueueEntry>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn update_entry(
        &self,
        id: i32,
        status: QueueStatus,
        priority: Priority,
    ) -> Result<Option<QueueEntry>> {
        let query = format!(
            "UPDATE queue_entries
             SET status = $2, priority = $3, updated_at = now()
             WHERE id = $1
             RETURNING {ENTRY_COLUMNS}"
        );

        sqlx::query_as::<_, QueueEntry>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(priority.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM queue_entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn has_active_enrollment(&self, patient_id: i32, schedule_id: i32) -> Result<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM queue_entries
                 WHERE patient_id = $1
                   AND schedule_id = $2
                   AND status IN ('waiting', 'in_diagnosis')
             )",
        )
        .bind(patient_id)
        .bind(schedule_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)
    }

    async fn has_overlapping_active(
        &self,
        patient_id: i32,
        schedule_id: i32,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<bool> {
        // Interval intersection: existing.start < target.end AND
        // existing.end > target.start, same date, active entries only.
        // The target schedule itself is the duplicate case, not an overlap.
        sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1
                 FROM queue_entries q
                 JOIN schedules s ON s.id = q.schedule_id
                 WHERE q.patient_id = $1
                   AND q.schedule_id <> $2
                   AND q.status IN ('waiting', 'in_diagnosis')
                   AND s.practice_date = $3
                   AND s.start_time < $5
                   AND s.end_time > $4
             )",
        )
        .bind(patient_id)
        .bind(schedule_id)
        .bind(date)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)
    }

    async fn count_created_today(&self, schedule_id: i32) -> Result<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM queue_entries
             WHERE schedule_id = $1 AND created_at::date = CURRENT_DATE",
        )
        .bind(schedule_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)
    }
}
