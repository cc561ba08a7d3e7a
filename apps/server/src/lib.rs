//! Clinic management REST API.
//!
//! Patients, staff, polyclinics, schedules, visit queues, examinations and
//! lab results over HTTP with role-based access control. The heart of the
//! crate is the visit admission engine in [`services::admission`], which
//! decides whether a patient may be enqueued against a doctor's time slot
//! and maintains queue-entry lifecycle.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod request_context;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::{AppState, AppStateOptions};
