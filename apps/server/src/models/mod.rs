//! Domain models and request/response DTOs.
//!
//! Wire names follow the established API contract (Indonesian resource
//! vocabulary: `jadwal_id`, `nomor_antrian`, ...); Rust-side names are
//! English. Enumerated columns are stored as text and decoded through
//! `#[sqlx(try_from = "String")]`.

pub mod clinic;
pub mod examination;
pub mod icd;
pub mod lab;
pub mod patient;
pub mod queue;
pub mod report;
pub mod schedule;
pub mod staff;

use validator::ValidationError;

/// Shared `active`/`inactive` status check for catalog-style records.
pub fn validate_status(status: &str) -> Result<(), ValidationError> {
    match status {
        "active" | "inactive" => Ok(()),
        _ => {
            let mut error = ValidationError::new("status");
            error.message = Some("status must be active or inactive".into());
            Err(error)
        }
    }
}

pub use clinic::Clinic;
pub use examination::{Examination, ExaminationDetail};
pub use icd::IcdCode;
pub use lab::{LabResult, LabResultDetail, LabTestType};
pub use patient::Patient;
pub use queue::{NewQueueEntry, Priority, QueueEntry, QueueEntryDetail, QueueStatus};
pub use report::{ClinicVisitReport, TopDiseaseReport};
pub use schedule::{Schedule, ScheduleDetail};
pub use staff::{Role, Staff};
