//! Schedule management rules on top of the schedule repository.

use crate::{
    db::schedules::{ScheduleRepository, ScheduleWrite},
    models::schedule::{time_hm, Schedule, ScheduleRequest},
    Error, Result,
};

#[derive(Clone)]
pub struct ScheduleService {
    repo: ScheduleRepository,
}

impl ScheduleService {
    pub fn new(repo: ScheduleRepository) -> Self {
        Self { repo }
    }

    pub async fn create(&self, req: &ScheduleRequest) -> Result<Schedule> {
        let write = validate_request(req)?;
        self.repo.create(&write).await
    }

    pub async fn update(&self, id: i32, req: &ScheduleRequest) -> Result<Schedule> {
        let write = validate_request(req)?;
        self.repo
            .update(id, &write)
            .await?
            .ok_or_else(|| Error::not_found("schedule"))
    }
}

/// Parse and order-check the `HH:MM` times of an incoming request.
fn validate_request(req: &ScheduleRequest) -> Result<ScheduleWrite> {
    let start_time = time_hm::parse(&req.start_time)
        .map_err(|_| Error::Validation("invalid format for waktu_mulai".to_string()))?;
    let end_time = time_hm::parse(&req.end_time)
        .map_err(|_| Error::Validation("invalid format for waktu_selesai".to_string()))?;

    if end_time <= start_time {
        return Err(Error::Validation(
            "waktu_selesai must be after waktu_mulai".to_string(),
        ));
    }

    Ok(ScheduleWrite {
        staff_id: req.staff_id,
        clinic_id: req.clinic_id,
        practice_date: req.practice_date,
        start_time,
        end_time,
        note: req.note.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request(start: &str, end: &str) -> ScheduleRequest {
        ScheduleRequest {
            staff_id: 1,
            clinic_id: 1,
            practice_date: NaiveDate::from_ymd_opt(2025, 8, 23).unwrap(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            note: None,
        }
    }

    #[test]
    fn accepts_ordered_times() {
        let write = validate_request(&request("09:00", "11:00")).unwrap();
        assert!(write.end_time > write.start_time);
    }

    #[test]
    fn rejects_unordered_or_equal_times() {
        assert!(matches!(
            validate_request(&request("11:00", "09:00")),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            validate_request(&request("09:00", "09:00")),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn rejects_unparseable_times() {
        assert!(matches!(
            validate_request(&request("nine", "11:00")),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            validate_request(&request("09:00", "eleven")),
            Err(Error::Validation(_))
        ));
    }
}
