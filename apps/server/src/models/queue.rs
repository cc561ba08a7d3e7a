//! Queue entry (antrian) domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Lifecycle of a queue entry. Variant order is the transition order:
/// a status may only move to an equal or later variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    Waiting,
    InDiagnosis,
    Done,
}

impl QueueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueStatus::Waiting => "waiting",
            QueueStatus::InDiagnosis => "in_diagnosis",
            QueueStatus::Done => "done",
        }
    }

    /// An entry still occupying its slot (not yet done).
    pub fn is_active(&self) -> bool {
        !matches!(self, QueueStatus::Done)
    }
}

impl TryFrom<String> for QueueStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "waiting" => Ok(QueueStatus::Waiting),
            "in_diagnosis" => Ok(QueueStatus::InDiagnosis),
            "done" => Ok(QueueStatus::Done),
            _ => Err(format!("invalid queue status: {value}")),
        }
    }
}

impl std::fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Urgent,
    Normal,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::Normal => "normal",
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "urgent" => Ok(Priority::Urgent),
            "normal" => Ok(Priority::Normal),
            _ => Err(format!("invalid priority: {value}")),
        }
    }
}

/// A patient's claim on a schedule slot.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct QueueEntry {
    pub id: i32,
    #[serde(rename = "jadwal_id")]
    pub schedule_id: i32,
    #[serde(rename = "pasien_id")]
    pub patient_id: i32,
    #[serde(rename = "nomor_antrian")]
    pub ticket_number: String,
    #[serde(rename = "prioritas")]
    #[sqlx(try_from = "String")]
    pub priority: Priority,
    #[sqlx(try_from = "String")]
    pub status: QueueStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload assembled by the admission orchestrator.
#[derive(Debug, Clone)]
pub struct NewQueueEntry {
    pub schedule_id: i32,
    pub patient_id: i32,
    pub ticket_number: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQueueEntryRequest {
    #[serde(rename = "jadwal_id")]
    #[validate(range(min = 1, message = "jadwal_id must be a positive id"))]
    pub schedule_id: i32,
    #[serde(rename = "pasien_id")]
    #[validate(range(min = 1, message = "pasien_id must be a positive id"))]
    pub patient_id: i32,
    #[serde(rename = "prioritas")]
    pub priority: Priority,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQueueEntryRequest {
    pub status: QueueStatus,
    #[serde(rename = "prioritas")]
    pub priority: Priority,
}

/// Read-side projection joining schedule, clinic, doctor and patient names.
#[derive(Debug, Clone, Serialize)]
pub struct QueueEntryDetail {
    pub id: i32,
    #[serde(rename = "nomor_antrian")]
    pub ticket_number: String,
    #[serde(rename = "prioritas")]
    pub priority: Priority,
    pub status: QueueStatus,
    #[serde(rename = "jadwal")]
    pub schedule: QueueScheduleInfo,
    #[serde(rename = "pasien")]
    pub patient: QueuePatientInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueueScheduleInfo {
    pub id: i32,
    #[serde(rename = "tanggal")]
    pub practice_date: NaiveDate,
    #[serde(rename = "poli")]
    pub clinic: NameRef,
    #[serde(rename = "dokter")]
    pub doctor: NameRef,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueuePatientInfo {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NameRef {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_variant_order_is_transition_order() {
        assert!(QueueStatus::Waiting < QueueStatus::InDiagnosis);
        assert!(QueueStatus::InDiagnosis < QueueStatus::Done);
    }

    #[test]
    fn active_means_not_done() {
        assert!(QueueStatus::Waiting.is_active());
        assert!(QueueStatus::InDiagnosis.is_active());
        assert!(!QueueStatus::Done.is_active());
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in [
            QueueStatus::Waiting,
            QueueStatus::InDiagnosis,
            QueueStatus::Done,
        ] {
            assert_eq!(
                QueueStatus::try_from(status.as_str().to_string()).unwrap(),
                status
            );
        }
        assert!(QueueStatus::try_from("selesai".to_string()).is_err());
    }

    #[test]
    fn create_request_uses_wire_names() {
        let req: CreateQueueEntryRequest =
            serde_json::from_str(r#"{"jadwal_id": 3, "pasien_id": 7, "prioritas": "urgent"}"#)
                .unwrap();
        assert_eq!(req.schedule_id, 3);
        assert_eq!(req.patient_id, 7);
        assert_eq!(req.priority, Priority::Urgent);
    }
}
