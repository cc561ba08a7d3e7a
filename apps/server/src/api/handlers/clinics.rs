//! Polyclinic (poli) handlers.

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
    models::clinic::ClinicRequest,
    state::AppState,
    Error, Result,
};

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<ClinicRequest>,
) -> Result<Response> {
    validate(&req)?;

    let clinic = state.clinics.create(&req.name, &req.status).await?;
    Ok(response::success(
        StatusCode::CREATED,
        clinic,
        "data created successfully",
    ))
}

pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Response> {
    let (page, page_size) = page.normalize();
    let (clinics, total) = state.clinics.list(page, page_size).await?;

    Ok(response::success_page(
        clinics,
        PageInfo::new(total, page, page_size),
    ))
}

pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    let clinic = state
        .clinics
        .find(id)
        .await?
        .ok_or_else(|| Error::not_found("clinic"))?;

    Ok(response::success(StatusCode::OK, clinic, "success"))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<ClinicRequest>,
) -> Result<Response> {
    validate(&req)?;

    let clinic = state
        .clinics
        .update(id, &req.name, &req.status)
        .await?
        .ok_or_else(|| Error::not_found("clinic"))?;

    Ok(response::success(
        StatusCode::OK,
        clinic,
        "data updated successfully",
    ))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    if !state.clinics.delete(id).await? {
        return Err(Error::not_found("clinic"));
    }

    Ok(response::success(
        StatusCode::OK,
        serde_json::Value::Null,
        "data deleted successfully",
    ))
}
