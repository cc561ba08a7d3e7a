//! Schedule (jadwal) handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::validate;
use crate::{
    api::{
        pagination::{PageInfo, PageQuery},
        response,
    },
    db::schedules::ListScheduleParams,
    models::schedule::ScheduleRequest,
    state::AppState,
    Error, Result,
};

#[derive(Debug, Deserialize)]
pub struct ListScheduleQuery {
    pub poli_id: Option<i32>,
    pub petugas_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub sort: Option<String>,
    pub page: Option<i64>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<ScheduleRequest>,
) -> Result<Response> {
    validate(&req)?;

    let schedule = state.schedule_service.create(&req).await?;
    Ok(response::success(
        StatusCode::CREATED,
        schedule,
        "data created successfully",
    ))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListScheduleQuery>,
) -> Result<Response> {
    let (page, page_size) = PageQuery {
        page: query.page,
        page_size: query.page_size,
    }
    .normalize();
    let params = ListScheduleParams {
        staff_id: query.petugas_id,
        clinic_id: query.poli_id,
        start_date: query.start_date,
        end_date: query.end_date,
        sort_by: query.sort,
        page,
        page_size,
    };

    let (schedules, total) = state.schedules.list_details(&params).await?;
    Ok(response::success_page(
        schedules,
        PageInfo::new(total, page, page_size),
    ))
}

pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    let schedule = state
        .schedules
        .find_detail(id)
        .await?
        .ok_or_else(|| Error::not_found("schedule"))?;

    Ok(response::success(StatusCode::OK, schedule, "success"))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<ScheduleRequest>,
) -> Result<Response> {
    validate(&req)?;

    let schedule = state.schedule_service.update(id, &req).await?;
    Ok(response::success(
        StatusCode::OK,
        schedule,
        "data updated successfully",
    ))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    if !state.schedules.delete(id).await? {
        return Err(Error::not_found("schedule"));
    }

    Ok(response::success(
        StatusCode::OK,
        serde_json::Value::Null,
        "data deleted successfully",
    ))
}
