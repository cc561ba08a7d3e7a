//! Lab result (hasil lab) handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};

use super::validate;
use crate::{
    api::response,
    models::lab::{CreateLabResultRequest, UpdateLabResultRequest},
    state::AppState,
    Error, Result,
};

/// All results attached to one examination.
pub async fn list_by_examination(
    State(state): State<AppState>,
    Path(examination_id): Path<i32>,
) -> Result<Response> {
    if state.examinations.find(examination_id).await?.is_none() {
        return Err(Error::not_found("examination"));
    }

    let results = state.lab_results.list_by_examination(examination_id).await?;
    Ok(response::success(StatusCode::OK, results, "success"))
}

pub async fn create(
    State(state): State<AppState>,
    Path(examination_id): Path<i32>,
    Json(req): Json<CreateLabResultRequest>,
) -> Result<Response> {
    validate(&req)?;

    let result = state
        .lab_results
        .create(examination_id, req.lab_test_type_id, &req.result)
        .await?;

    Ok(response::success(
        StatusCode::CREATED,
        result,
        "data created successfully",
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateLabResultRequest>,
) -> Result<Response> {
    validate(&req)?;

    let result = state
        .lab_results
        .update(id, &req.result)
        .await?
        .ok_or_else(|| Error::not_found("lab result"))?;

    Ok(response::success(
        StatusCode::OK,
        result,
        "data updated successfully",
    ))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    if !state.lab_results.delete(id).await? {
        return Err(Error::not_found("lab result"));
    }

    Ok(response::success(
        StatusCode::OK,
        serde_json::Value::Null,
        "data deleted successfully",
    ))
}
