//! ICD code catalog handlers.

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
    models::icd::IcdRequest,
    state::AppState,
    Error, Result,
};

pub async fn create(State(state): State<AppState>, Json(req): Json<IcdRequest>) -> Result<Response> {
    validate(&req)?;

    let code = state.icd.create(&req).await?;
    Ok(response::success(
        StatusCode::CREATED,
        code,
        "data created successfully",
    ))
}

pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<Response> {
    let (page, page_size) = page.normalize();
    let (codes, total) = state.icd.list(page, page_size).await?;

    Ok(response::success_page(
        codes,
        PageInfo::new(total, page, page_size),
    ))
}

pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    let code = state
        .icd
        .find(id)
        .await?
        .ok_or_else(|| Error::not_found("ICD code"))?;

    Ok(response::success(StatusCode::OK, code, "success"))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<IcdRequest>,
) -> Result<Response> {
    validate(&req)?;

    let code = state
        .icd
        .update(id, &req)
        .await?
        .ok_or_else(|| Error::not_found("ICD code"))?;

    Ok(response::success(
        StatusCode::OK,
        code,
        "data updated successfully",
    ))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    if !state.icd.delete(id).await? {
        return Err(Error::not_found("ICD code"));
    }

    Ok(response::success(
        StatusCode::OK,
        serde_json::Value::Null,
        "data deleted successfully",
    ))
}
