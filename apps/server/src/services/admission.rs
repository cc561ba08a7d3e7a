//! Visit admission engine.
//!
//! Sole authority for how a patient enters a schedule's queue and how a
//! queue entry's status evolves. Works purely against the [`ScheduleStore`]
//! and [`QueueStore`] seams; listing and display joins stay on the
//! repositories.

use std::sync::Arc;

use crate::{
    db::traits::{QueueStore, ScheduleStore},
    models::{
        queue::{NewQueueEntry, Priority, QueueEntry, QueueStatus},
        schedule::ScheduleSlot,
    },
    Error, Result,
};

#[derive(Clone)]
pub struct AdmissionService {
    schedules: Arc<dyn ScheduleStore>,
    queue: Arc<dyn QueueStore>,
}

impl AdmissionService {
    pub fn new(schedules: Arc<dyn ScheduleStore>, queue: Arc<dyn QueueStore>) -> Self {
        Self { schedules, queue }
    }

    /// Enroll a patient into a schedule's queue.
    ///
    /// Guard order: schedule existence, interval overlap with the patient's
    /// other active entries on the same date, duplicate enrollment for the
    /// exact pair. The guards are a fast path for precise error messages;
    /// the store's unique index on active pairs is the authoritative check
    /// under concurrency, and [`QueueStore::create`] surfaces its violation
    /// as [`Error::DuplicateEnrollment`].
    pub async fn admit(
        &self,
        schedule_id: i32,
        patient_id: i32,
        priority: Priority,
    ) -> Result<QueueEntry> {
        let slot = self
            .schedules
            .get_by_id(schedule_id)
            .await?
            .ok_or_else(|| Error::InvalidReference("invalid jadwal_id or pasien_id".to_string()))?;

        let overlapping = self
            .queue
            .has_overlapping_active(
                patient_id,
                schedule_id,
                slot.practice_date,
                slot.start_time,
                slot.end_time,
            )
            .await?;
        if overlapping {
            return Err(Error::ScheduleOverlap);
        }

        if self
            .queue
            .has_active_enrollment(patient_id, schedule_id)
            .await?
        {
            return Err(Error::DuplicateEnrollment);
        }

        let ticket_number = self.next_ticket_number(&slot).await?;

        let entry = self
            .queue
            .create(NewQueueEntry {
                schedule_id,
                patient_id,
                ticket_number,
                priority,
            })
            .await?;

        tracing::info!(
            queue_entry_id = entry.id,
            schedule_id,
            patient_id,
            ticket_number = %entry.ticket_number,
            "Patient admitted to queue"
        );

        Ok(entry)
    }

    /// Clinic-initial + today's per-schedule sequence, e.g. `U7`.
    ///
    /// Resets daily per schedule; concurrent admissions may collide on the
    /// same number, which is tolerated (the entry's identity is its id).
    async fn next_ticket_number(&self, slot: &ScheduleSlot) -> Result<String> {
        let count = self.queue.count_created_today(slot.id).await?;
        let initial = slot
            .clinic_name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('X');
        Ok(format!("{initial}{}", count + 1))
    }

    /// Replace status and priority. Status may only stay or advance along
    /// `waiting -> in_diagnosis -> done`; regressions are rejected.
    pub async fn update_status(
        &self,
        id: i32,
        status: QueueStatus,
        priority: Priority,
    ) -> Result<QueueEntry> {
        let current = self
            .queue
            .get_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("queue entry"))?;

        if status < current.status {
            return Err(Error::InvalidTransition {
                from: current.status.to_string(),
                to: status.to_string(),
            });
        }

        self.queue
            .update_entry(id, status, priority)
            .await?
            .ok_or_else(|| Error::not_found("queue entry"))
    }

    pub async fn get(&self, id: i32) -> Result<QueueEntry> {
        self.queue
            .get_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("queue entry"))
    }

    /// Hard delete; terminal for the entry.
    pub async fn remove(&self, id: i32) -> Result<()> {
        if self.queue.delete(id).await? {
            Ok(())
        } else {
            Err(Error::not_found("queue entry"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryScheduleStore {
        slots: Mutex<HashMap<i32, ScheduleSlot>>,
    }

    impl MemoryScheduleStore {
        fn insert(&self, slot: ScheduleSlot) {
            self.slots.lock().unwrap().insert(slot.id, slot);
        }
    }

    #[async_trait]
    impl ScheduleStore for MemoryScheduleStore {
        async fn get_by_id(&self, id: i32) -> Result<Option<ScheduleSlot>> {
            Ok(self.slots.lock().unwrap().get(&id).cloned())
        }
    }

    /// In-memory queue store enforcing the same partial-unique semantics as
    /// the Postgres index, so constraint mapping can be tested without a
    /// database.
    struct MemoryQueueStore {
        schedules: Arc<MemoryScheduleStore>,
        entries: Mutex<Vec<QueueEntry>>,
        next_id: AtomicI32,
    }

    impl MemoryQueueStore {
        fn new(schedules: Arc<MemoryScheduleStore>) -> Self {
            Self {
                schedules,
                entries: Mutex::new(Vec::new()),
                next_id: AtomicI32::new(1),
            }
        }
    }

    #[async_trait]
    impl QueueStore for MemoryQueueStore {
        async fn create(&self, entry: NewQueueEntry) -> Result<QueueEntry> {
            let mut entries = self.entries.lock().unwrap();

            // Equivalent of the unique index on active (patient, schedule).
            let duplicate = entries.iter().any(|e| {
                e.patient_id == entry.patient_id
                    && e.schedule_id == entry.schedule_id
                    && e.status.is_active()
            });
            if duplicate {
                return Err(Error::DuplicateEnrollment);
            }

            let created = QueueEntry {
                id: self.next_id.fetch_add(1, Ordering::SeqCst),
                schedule_id: entry.schedule_id,
                patient_id: entry.patient_id,
                ticket_number: entry.ticket_number,
                priority: entry.priority,
                status: QueueStatus::Waiting,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            entries.push(created.clone());
            Ok(created)
        }

        async fn get_by_id(&self, id: i32) -> Result<Option<QueueEntry>> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.id == id)
                .cloned())
        }

        async fn update_entry(
            &self,
            id: i32,
            status: QueueStatus,
            priority: Priority,
        ) -> Result<Option<QueueEntry>> {
            let mut entries = self.entries.lock().unwrap();
            let Some(entry) = entries.iter_mut().find(|e| e.id == id) else {
                return Ok(None);
            };
            entry.status = status;
            entry.priority = priority;
            entry.updated_at = Utc::now();
            Ok(Some(entry.clone()))
        }

        async fn delete(&self, id: i32) -> Result<bool> {
            let mut entries = self.entries.lock().unwrap();
            let before = entries.len();
            entries.retain(|e| e.id != id);
            Ok(entries.len() != before)
        }

        async fn has_active_enrollment(&self, patient_id: i32, schedule_id: i32) -> Result<bool> {
            Ok(self.entries.lock().unwrap().iter().any(|e| {
                e.patient_id == patient_id
                    && e.schedule_id == schedule_id
                    && e.status.is_active()
            }))
        }

        async fn has_overlapping_active(
            &self,
            patient_id: i32,
            schedule_id: i32,
            date: NaiveDate,
            start: NaiveTime,
            end: NaiveTime,
        ) -> Result<bool> {
            let slots = self.schedules.slots.lock().unwrap();
            Ok(self.entries.lock().unwrap().iter().any(|e| {
                if e.patient_id != patient_id
                    || e.schedule_id == schedule_id
                    || !e.status.is_active()
                {
                    return false;
                }
                let Some(slot) = slots.get(&e.schedule_id) else {
                    return false;
                };
                slot.practice_date == date && slot.start_time < end && slot.end_time > start
            }))
        }

        async fn count_created_today(&self, schedule_id: i32) -> Result<i64> {
            let today = Utc::now().date_naive();
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.schedule_id == schedule_id && e.created_at.date_naive() == today)
                .count() as i64)
        }
    }

    fn slot(id: i32, clinic: &str, date: (i32, u32, u32), start: (u32, u32), end: (u32, u32)) -> ScheduleSlot {
        ScheduleSlot {
            id,
            staff_id: 1,
            clinic_id: 1,
            practice_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            clinic_name: clinic.to_string(),
            staff_name: "dr. Sari".to_string(),
        }
    }

    fn service_with_slots(slots: Vec<ScheduleSlot>) -> AdmissionService {
        let schedules = Arc::new(MemoryScheduleStore::default());
        for s in slots {
            schedules.insert(s);
        }
        let queue = Arc::new(MemoryQueueStore::new(schedules.clone()));
        AdmissionService::new(schedules, queue)
    }

    #[tokio::test]
    async fn admit_assigns_clinic_scoped_ticket_and_waiting_status() {
        let service = service_with_slots(vec![slot(1, "Umum", (2025, 8, 23), (9, 0), (11, 0))]);

        let entry = service.admit(1, 10, Priority::Normal).await.unwrap();
        assert_eq!(entry.ticket_number, "U1");
        assert_eq!(entry.status, QueueStatus::Waiting);
        assert_eq!(entry.schedule_id, 1);
        assert_eq!(entry.patient_id, 10);

        // Second patient gets the next number.
        let entry = service.admit(1, 11, Priority::Normal).await.unwrap();
        assert_eq!(entry.ticket_number, "U2");
    }

    #[tokio::test]
    async fn admit_rejects_unknown_schedule() {
        let service = service_with_slots(vec![]);

        let err = service.admit(999, 10, Priority::Normal).await.unwrap_err();
        assert!(matches!(err, Error::InvalidReference(_)));
    }

    #[tokio::test]
    async fn admit_rejects_duplicate_enrollment() {
        let service = service_with_slots(vec![slot(1, "Umum", (2025, 8, 23), (9, 0), (11, 0))]);

        service.admit(1, 10, Priority::Normal).await.unwrap();
        let err = service.admit(1, 10, Priority::Urgent).await.unwrap_err();
        assert!(matches!(err, Error::DuplicateEnrollment));
    }

    #[tokio::test]
    async fn admit_rejects_overlapping_interval_on_same_date() {
        let service = service_with_slots(vec![
            slot(1, "Umum", (2025, 8, 23), (9, 0), (11, 0)),
            slot(2, "Umum", (2025, 8, 23), (10, 0), (12, 0)),
        ]);

        service.admit(1, 10, Priority::Normal).await.unwrap();
        let err = service.admit(2, 10, Priority::Normal).await.unwrap_err();
        assert!(matches!(err, Error::ScheduleOverlap));
    }

    #[tokio::test]
    async fn admit_allows_touching_intervals_and_other_dates() {
        let service = service_with_slots(vec![
            slot(1, "Umum", (2025, 8, 23), (9, 0), (11, 0)),
            // [11:00, 13:00) only touches [09:00, 11:00) - no intersection.
            slot(2, "Umum", (2025, 8, 23), (11, 0), (13, 0)),
            slot(3, "Umum", (2025, 8, 24), (9, 0), (11, 0)),
        ]);

        service.admit(1, 10, Priority::Normal).await.unwrap();
        service.admit(2, 10, Priority::Normal).await.unwrap();
        service.admit(3, 10, Priority::Normal).await.unwrap();
    }

    #[tokio::test]
    async fn admit_allows_reenrollment_after_done() {
        let service = service_with_slots(vec![slot(1, "Umum", (2025, 8, 23), (9, 0), (11, 0))]);

        let entry = service.admit(1, 10, Priority::Normal).await.unwrap();
        service
            .update_status(entry.id, QueueStatus::Done, Priority::Normal)
            .await
            .unwrap();

        // The pair is no longer active, so a fresh enrollment is allowed.
        service.admit(1, 10, Priority::Normal).await.unwrap();
    }

    #[tokio::test]
    async fn ticket_numbers_are_non_decreasing_in_creation_order() {
        let service = service_with_slots(vec![slot(1, "Gigi", (2025, 8, 23), (8, 0), (12, 0))]);

        let mut previous = 0u32;
        for patient_id in 1..=5 {
            let entry = service.admit(1, patient_id, Priority::Normal).await.unwrap();
            assert!(entry.ticket_number.starts_with('G'));
            let seq: u32 = entry.ticket_number[1..].parse().unwrap();
            assert!(seq >= previous, "ticket sequence regressed: {seq} < {previous}");
            previous = seq;
        }
    }

    #[tokio::test]
    async fn concurrent_admissions_for_same_pair_yield_exactly_one_success() {
        let service = service_with_slots(vec![slot(1, "Umum", (2025, 8, 23), (9, 0), (11, 0))]);

        let mut handles = Vec::new();
        for _ in 0..2 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.admit(1, 10, Priority::Normal).await
            }));
        }

        let mut successes = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(Error::DuplicateEnrollment) => duplicates += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(duplicates, 1);
    }

    #[tokio::test]
    async fn store_unique_violation_is_authoritative_even_past_guards() {
        // Drive the store directly to simulate the race where both requests
        // pass the guards: the second insert must surface the constraint as
        // DuplicateEnrollment.
        let schedules = Arc::new(MemoryScheduleStore::default());
        schedules.insert(slot(1, "Umum", (2025, 8, 23), (9, 0), (11, 0)));
        let queue = MemoryQueueStore::new(schedules);

        let entry = NewQueueEntry {
            schedule_id: 1,
            patient_id: 10,
            ticket_number: "U1".to_string(),
            priority: Priority::Normal,
        };
        queue.create(entry.clone()).await.unwrap();
        let err = queue.create(entry).await.unwrap_err();
        assert!(matches!(err, Error::DuplicateEnrollment));
    }

    #[tokio::test]
    async fn admitted_entry_round_trips_through_get() {
        let service = service_with_slots(vec![slot(1, "Umum", (2025, 8, 23), (9, 0), (11, 0))]);

        let created = service.admit(1, 10, Priority::Urgent).await.unwrap();
        let fetched = service.get(created.id).await.unwrap();

        assert_eq!(fetched.schedule_id, created.schedule_id);
        assert_eq!(fetched.patient_id, created.patient_id);
        assert_eq!(fetched.priority, Priority::Urgent);
        assert_eq!(fetched.status, QueueStatus::Waiting);
        assert_eq!(fetched.ticket_number, created.ticket_number);
    }

    #[tokio::test]
    async fn update_status_advances_forward_only() {
        let service = service_with_slots(vec![slot(1, "Umum", (2025, 8, 23), (9, 0), (11, 0))]);
        let entry = service.admit(1, 10, Priority::Normal).await.unwrap();

        let updated = service
            .update_status(entry.id, QueueStatus::InDiagnosis, Priority::Normal)
            .await
            .unwrap();
        assert_eq!(updated.status, QueueStatus::InDiagnosis);

        let updated = service
            .update_status(entry.id, QueueStatus::Done, Priority::Normal)
            .await
            .unwrap();
        assert_eq!(updated.status, QueueStatus::Done);

        let err = service
            .update_status(entry.id, QueueStatus::Waiting, Priority::Normal)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn update_status_allows_priority_correction_at_same_state() {
        let service = service_with_slots(vec![slot(1, "Umum", (2025, 8, 23), (9, 0), (11, 0))]);
        let entry = service.admit(1, 10, Priority::Normal).await.unwrap();

        let updated = service
            .update_status(entry.id, QueueStatus::Waiting, Priority::Urgent)
            .await
            .unwrap();
        assert_eq!(updated.status, QueueStatus::Waiting);
        assert_eq!(updated.priority, Priority::Urgent);
    }

    #[tokio::test]
    async fn missing_ids_always_surface_not_found() {
        let service = service_with_slots(vec![]);

        assert!(matches!(service.get(99999).await.unwrap_err(), Error::NotFound(_)));
        assert!(matches!(
            service.remove(99999).await.unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(matches!(
            service
                .update_status(99999, QueueStatus::Done, Priority::Normal)
                .await
                .unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn remove_is_terminal() {
        let service = service_with_slots(vec![slot(1, "Umum", (2025, 8, 23), (9, 0), (11, 0))]);
        let entry = service.admit(1, 10, Priority::Normal).await.unwrap();

        service.remove(entry.id).await.unwrap();
        assert!(matches!(
            service.get(entry.id).await.unwrap_err(),
            Error::NotFound(_)
        ));
    }
}
