//! Business services. The admission engine is the core; the rest wrap
//! repository access where real rules exist (time validation, credentials,
//! one-examination-per-visit, report ranges).

pub mod admission;
pub mod examinations;
pub mod reports;
pub mod schedules;
pub mod staff;

pub use admission::AdmissionService;
pub use examinations::ExaminationService;
pub use reports::ReportService;
pub use schedules::ScheduleService;
pub use staff::StaffService;
