//! Reporting aggregate queries.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{
    models::report::{ClinicVisitReport, TopDiseaseReport},
    Error, Result,
};

#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Visit volume per clinic, counted over queue entries whose schedule
    /// falls inside the (inclusive) date range.
    pub async fn clinic_visits(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<ClinicVisitReport>> {
        sqlx::query_as(
            "SELECT c.name AS clinic_name, COUNT(q.id) AS visit_count
             FROM queue_entries q
             JOIN schedules s ON s.id = q.schedule_id
             JOIN clinics c ON c.id = s.clinic_id
             WHERE s.practice_date BETWEEN $1 AND $2
             GROUP BY c.name
             ORDER BY visit_count DESC, c.name ASC",
        )
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)
    }

    /// Most frequent diagnoses over the date range, by examination count.
    pub async fn top_diseases(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        limit: i64,
    ) -> Result<Vec<TopDiseaseReport>> {
        sqlx::query_as(
            "SELECT i.code, i.disease_name, COUNT(e.id) AS case_count
             FROM examinations e
             JOIN icd_codes i ON i.id = e.icd_id
             WHERE e.examined_on BETWEEN $1 AND $2
             GROUP BY i.code, i.disease_name
             ORDER BY case_count DESC, i.code ASC
             LIMIT $3",
        )
        .bind(start_date)
        .bind(end_date)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)
    }
}
