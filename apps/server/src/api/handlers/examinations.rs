//! Examination (pemeriksaan) handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};

use super::validate;
use crate::{
    api::response,
    models::examination::{CreateExaminationRequest, UpdateExaminationRequest},
    state::AppState,
    Error, Result,
};

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateExaminationRequest>,
) -> Result<Response> {
    validate(&req)?;

    let examination = state.examination_service.create(&req).await?;
    Ok(response::success(
        StatusCode::CREATED,
        examination,
        "data created successfully",
    ))
}

pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    let examination = state
        .examinations
        .find_detail(id)
        .await?
        .ok_or_else(|| Error::not_found("examination"))?;

    Ok(response::success(StatusCode::OK, examination, "success"))
}

/// A patient's examination history.
pub async fn history_by_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<i32>,
) -> Result<Response> {
    let history = state.examinations.list_by_patient(patient_id).await?;
    Ok(response::success(StatusCode::OK, history, "success"))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateExaminationRequest>,
) -> Result<Response> {
    validate(&req)?;

    let examination = state.examination_service.update(id, &req).await?;
    Ok(response::success(
        StatusCode::OK,
        examination,
        "data updated successfully",
    ))
}
