//! Lab test catalog (jenis pemeriksaan lab) handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};

use super::validate;
use crate::{
    api::{
        pagination::{PageInfo, PageQuery},
        response,
    },
    models::lab::LabTestTypeRequest,
    state::AppState,
    Error, Result,
};

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<LabTestTypeRequest>,
) -> Result<Response> {
    validate(&req)?;

    let test_type = state.lab_tests.create(&req).await?;
    Ok(response::success(
        StatusCode::CREATED,
        test_type,
        "data created successfully",
    ))
}

pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Response> {
    let (page, page_size) = page.normalize();
    let (types, total) = state.lab_tests.list(page, page_size).await?;

    Ok(response::success_page(
        types,
        PageInfo::new(total, page, page_size),
    ))
}

pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    let test_type = state
        .lab_tests
        .find(id)
        .await?
        .ok_or_else(|| Error::not_found("lab test type"))?;

    Ok(response::success(StatusCode::OK, test_type, "success"))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<LabTestTypeRequest>,
) -> Result<Response> {
    validate(&req)?;

    let test_type = state
        .lab_tests
        .update(id, &req)
        .await?
        .ok_or_else(|| Error::not_found("lab test type"))?;

    Ok(response::success(
        StatusCode::OK,
        test_type,
        "data updated successfully",
    ))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    if !state.lab_tests.delete(id).await? {
        return Err(Error::not_found("lab test type"));
    }

    Ok(response::success(
        StatusCode::OK,
        serde_json::Value::Null,
        "data deleted successfully",
    ))
}
