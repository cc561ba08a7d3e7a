//! Protected route table with per-group role gates.
//!
//! Reads are open to any authenticated staff member unless noted; writes are
//! gated per resource. The bearer-token check itself is layered on top of
//! this router in [`super::create_router`].

use axum::{
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};

use super::handlers::{
    clinics, examinations, icd, lab_results, lab_tests, patients, queue, reports, schedules, staff,
};
use crate::{auth::authorize, models::staff::Role, state::AppState};

const ADMIN: &[Role] = &[Role::Admin];
const ADMIN_CLINIC: &[Role] = &[Role::Admin, Role::Clinic];
const DOCTOR_CLINIC: &[Role] = &[Role::Doctor, Role::Clinic];
const DOCTOR_LAB_CLINIC: &[Role] = &[Role::Doctor, Role::Lab, Role::Clinic];

pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .merge(queue_routes())
        .merge(patient_routes())
        .merge(staff_routes())
        .merge(schedule_routes())
        .merge(clinic_routes())
        .merge(icd_routes())
        .merge(lab_test_routes())
        .merge(examination_routes())
        .merge(report_routes())
}

fn queue_routes() -> Router<AppState> {
    Router::new()
        .route("/antrian", get(queue::list))
        .route("/antrian/:id", get(queue::get_by_id))
        .merge(
            Router::new()
                .route("/antrian", post(queue::create))
                .route("/antrian/:id", delete(queue::remove))
                .route_layer(from_fn(|req, next| authorize(ADMIN, req, next))),
        )
        .merge(
            Router::new()
                .route("/antrian/:id", put(queue::update))
                .route_layer(from_fn(|req, next| authorize(ADMIN_CLINIC, req, next))),
        )
}

fn patient_routes() -> Router<AppState> {
    Router::new()
        .route("/pasien", get(patients::list))
        .route("/pasien/:id", get(patients::get_by_id))
        .merge(
            Router::new()
                .route("/pasien", post(patients::create))
                .route("/pasien/:id", put(patients::update).delete(patients::remove))
                .route_layer(from_fn(|req, next| authorize(ADMIN, req, next))),
        )
}

fn staff_routes() -> Router<AppState> {
    Router::new()
        .route("/petugas", get(staff::list))
        // Exact routes first so "change-password" never binds as an :id.
        .route("/petugas/change-password", put(staff::change_password))
        .route("/petugas/:id", get(staff::get_by_id))
        .merge(
            Router::new()
                .route("/petugas", post(staff::create))
                .route("/petugas/:id", put(staff::update).delete(staff::remove))
                .route_layer(from_fn(|req, next| authorize(ADMIN, req, next))),
        )
}

fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route("/jadwal", get(schedules::list))
        .route("/jadwal/:id", get(schedules::get_by_id))
        .merge(
            Router::new()
                .route("/jadwal", post(schedules::create))
                .route(
                    "/jadwal/:id",
                    put(schedules::update).delete(schedules::remove),
                )
                .route_layer(from_fn(|req, next| authorize(ADMIN, req, next))),
        )
}

fn clinic_routes() -> Router<AppState> {
    Router::new()
        .route("/poli", get(clinics::list))
        .route("/poli/:id", get(clinics::get_by_id))
        .merge(
            Router::new()
                .route("/poli", post(clinics::create))
                .route("/poli/:id", put(clinics::update).delete(clinics::remove))
                .route_layer(from_fn(|req, next| authorize(ADMIN, req, next))),
        )
}

fn icd_routes() -> Router<AppState> {
    Router::new()
        .route("/icd", get(icd::list))
        .route("/icd/:id", get(icd::get_by_id))
        .merge(
            Router::new()
                .route("/icd", post(icd::create))
                .route("/icd/:id", put(icd::update).delete(icd::remove))
                .route_layer(from_fn(|req, next| authorize(ADMIN, req, next))),
        )
}

fn lab_test_routes() -> Router<AppState> {
    Router::new()
        .route("/jenis-pemeriksaan-lab", get(lab_tests::list))
        .route("/jenis-pemeriksaan-lab/:id", get(lab_tests::get_by_id))
        .merge(
            Router::new()
                .route("/jenis-pemeriksaan-lab", post(lab_tests::create))
                .route(
                    "/jenis-pemeriksaan-lab/:id",
                    put(lab_tests::update).delete(lab_tests::remove),
                )
                .route_layer(from_fn(|req, next| authorize(ADMIN, req, next))),
        )
}

fn examination_routes() -> Router<AppState> {
    Router::new()
        .route("/pemeriksaan/:id", get(examinations::get_by_id))
        .route(
            "/pemeriksaan/riwayat/:pasien_id",
            get(examinations::history_by_patient),
        )
        .merge(
            Router::new()
                .route("/pemeriksaan", post(examinations::create))
                .route("/pemeriksaan/:id", put(examinations::update))
                .route_layer(from_fn(|req, next| authorize(DOCTOR_CLINIC, req, next))),
        )
        .merge(
            Router::new()
                .route(
                    "/pemeriksaan/:id/hasil-lab",
                    get(lab_results::list_by_examination).post(lab_results::create),
                )
                .route(
                    "/hasil-lab/:id",
                    put(lab_results::update).delete(lab_results::remove),
                )
                .route_layer(from_fn(|req, next| authorize(DOCTOR_LAB_CLINIC, req, next))),
        )
}

fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/laporan/kunjungan-poli", get(reports::clinic_visits))
        .route("/laporan/penyakit-teratas", get(reports::top_diseases))
        .route_layer(from_fn(|req, next| authorize(ADMIN, req, next)))
}
