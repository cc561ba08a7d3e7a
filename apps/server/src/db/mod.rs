//! Database layer - repositories and data access

pub mod clinics;
pub mod examinations;
pub mod icd;
pub mod lab_results;
pub mod lab_tests;
pub mod patients;
pub mod queue;
pub mod reports;
pub mod schedules;
pub mod seed;
pub mod staff;
pub mod traits;

pub use clinics::ClinicRepository;
pub use examinations::ExaminationRepository;
pub use icd::IcdRepository;
pub use lab_results::LabResultRepository;
pub use lab_tests::LabTestTypeRepository;
pub use patients::PatientRepository;
pub use queue::QueueRepository;
pub use reports::ReportRepository;
pub use schedules::ScheduleRepository;
pub use staff::StaffRepository;
pub use traits::{QueueStore, ScheduleStore};

use crate::Error;
use sqlx::error::ErrorKind;

/// Translate a constraint violation into a business error.
///
/// Unique and foreign-key violations become the supplied errors; everything
/// else stays an opaque storage failure so unknown constraint classes never
/// masquerade as business errors.
pub(crate) fn classify_constraint(
    err: sqlx::Error,
    on_unique: impl FnOnce() -> Error,
    on_foreign_key: impl FnOnce() -> Error,
) -> Error {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.kind() {
            ErrorKind::UniqueViolation => return on_unique(),
            ErrorKind::ForeignKeyViolation => return on_foreign_key(),
            _ => {}
        }
    }
    Error::Database(err)
}

/// As [`classify_constraint`], for tables where only uniqueness can trip.
pub(crate) fn classify_unique(err: sqlx::Error, on_unique: impl FnOnce() -> Error) -> Error {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.kind() == ErrorKind::UniqueViolation {
            return on_unique();
        }
    }
    Error::Database(err)
}
