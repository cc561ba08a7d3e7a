//! Schedule (jadwal) domain models.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Serialize/deserialize `NaiveTime` as `HH:MM` (the API's wire format).
/// Seconds are accepted on input for robustness.
pub mod time_hm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map_err(|_| format!("invalid time '{raw}', expected HH:MM"))
    }
}

/// A bounded `[start_time, end_time)` slot for one staff member at one clinic
/// on one date. `end_time > start_time` is enforced by the service layer and
/// by a database CHECK.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Schedule {
    pub id: i32,
    #[serde(rename = "petugas_id")]
    pub staff_id: i32,
    #[serde(rename = "poli_id")]
    pub clinic_id: i32,
    #[serde(rename = "tanggal")]
    pub practice_date: NaiveDate,
    #[serde(rename = "waktu_mulai", with = "time_hm")]
    pub start_time: NaiveTime,
    #[serde(rename = "waktu_selesai", with = "time_hm")]
    pub end_time: NaiveTime,
    #[serde(rename = "keterangan")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ScheduleRequest {
    #[serde(rename = "petugas_id")]
    #[validate(range(min = 1, message = "petugas_id must be a positive id"))]
    pub staff_id: i32,
    #[serde(rename = "poli_id")]
    #[validate(range(min = 1, message = "poli_id must be a positive id"))]
    pub clinic_id: i32,
    #[serde(rename = "tanggal")]
    pub practice_date: NaiveDate,
    /// `HH:MM`; parsed and range-checked by the schedule service.
    #[serde(rename = "waktu_mulai")]
    pub start_time: String,
    #[serde(rename = "waktu_selesai")]
    pub end_time: String,
    #[serde(rename = "keterangan")]
    pub note: Option<String>,
}

/// Schedule joined with its clinic and doctor names, as consumed by the
/// admission engine (the clinic name supplies the ticket prefix).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScheduleSlot {
    pub id: i32,
    pub staff_id: i32,
    pub clinic_id: i32,
    pub practice_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub clinic_name: String,
    pub staff_name: String,
}

/// Listing projection with staff and clinic names resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleDetail {
    pub id: i32,
    #[serde(rename = "tanggal")]
    pub practice_date: NaiveDate,
    #[serde(rename = "waktu_mulai", with = "time_hm")]
    pub start_time: NaiveTime,
    #[serde(rename = "waktu_selesai", with = "time_hm")]
    pub end_time: NaiveTime,
    #[serde(rename = "keterangan")]
    pub note: Option<String>,
    #[serde(rename = "petugas")]
    pub staff: IdName,
    #[serde(rename = "poli")]
    pub clinic: IdName,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdName {
    pub id: i32,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_hm_parses_with_and_without_seconds() {
        assert_eq!(
            time_hm::parse("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(
            time_hm::parse("09:30:15").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 15).unwrap()
        );
        assert!(time_hm::parse("9 o'clock").is_err());
    }

    #[test]
    fn schedule_serializes_times_as_hh_mm() {
        let schedule = Schedule {
            id: 1,
            staff_id: 2,
            clinic_id: 3,
            practice_date: NaiveDate::from_ymd_opt(2025, 8, 23).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            note: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&schedule).unwrap();
        assert_eq!(value["waktu_mulai"], "09:00");
        assert_eq!(value["waktu_selesai"], "11:00");
        assert_eq!(value["tanggal"], "2025-08-23");
    }
}
