//! Storage traits consumed by the admission engine.
//!
//! The orchestrator only ever sees these two interfaces. The Postgres
//! implementations live in [`super::schedules`] and [`super::queue`];
//! tests substitute in-memory stores.

use crate::{
    models::{
        queue::{NewQueueEntry, Priority, QueueEntry, QueueStatus},
        schedule::ScheduleSlot,
    },
    Result,
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

/// Read access to schedule slots.
///
/// Schedule CRUD and its own conflict rules (no two slots for the same
/// doctor at the same time) are enforced upstream before a schedule is
/// visible here.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Fetch a slot with clinic/doctor names resolved; `None` if absent.
    async fn get_by_id(&self, id: i32) -> Result<Option<ScheduleSlot>>;
}

/// Queue entry persistence with the conflict queries the admission guards
/// need. "Active" always means status `waiting` or `in_diagnosis`.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Insert a new entry with status `waiting`.
    ///
    /// The storage layer's partial unique index on active
    /// `(patient, schedule)` pairs is the authoritative duplicate check:
    /// implementations must surface its violation as
    /// [`crate::Error::DuplicateEnrollment`] and dangling references as
    /// [`crate::Error::InvalidReference`].
    async fn create(&self, entry: NewQueueEntry) -> Result<QueueEntry>;

    async fn get_by_id(&self, id: i32) -> Result<Option<QueueEntry>>;

    /// Replace status and priority; `None` if the entry does not exist.
    async fn update_entry(
        &self,
        id: i32,
        status: QueueStatus,
        priority: Priority,
    ) -> Result<Option<QueueEntry>>;

    /// Hard delete. Returns whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool>;

    /// Does the patient already hold an active entry for this schedule?
    async fn has_active_enrollment(&self, patient_id: i32, schedule_id: i32) -> Result<bool>;

    /// Does the patient hold an active entry on some *other* schedule whose
    /// interval intersects `[start, end)` on `date`? Entries on
    /// `schedule_id` itself are the duplicate-enrollment case and are
    /// excluded here.
    async fn has_overlapping_active(
        &self,
        patient_id: i32,
        schedule_id: i32,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<bool>;

    /// Number of entries (any status) created today for this schedule.
    async fn count_created_today(&self, schedule_id: i32) -> Result<i64>;
}
