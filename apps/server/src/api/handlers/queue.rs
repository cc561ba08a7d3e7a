//! Visit queue (antrian) handlers.

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
    db::queue::ListQueueParams,
    models::queue::{CreateQueueEntryRequest, QueueStatus, UpdateQueueEntryRequest},
    state::AppState,
    Result,
};

#[derive(Debug, Deserialize)]
pub struct ListQueueQuery {
    pub status: Option<QueueStatus>,
    #[serde(rename = "tanggal")]
    pub practice_date: Option<NaiveDate>,
    pub poli_id: Option<i32>,
    pub page: Option<i64>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateQueueEntryRequest>,
) -> Result<Response> {
    validate(&req)?;

    let entry = state
        .admission
        .admit(req.schedule_id, req.patient_id, req.priority)
        .await?;

    // Display enrichment is read-side; fall back to the bare entry if the
    // joined row is gone already.
    match state.queue.find_detail(entry.id).await? {
        Some(detail) => Ok(response::success(
            StatusCode::CREATED,
            detail,
            "data created successfully",
        )),
        None => Ok(response::success(
            StatusCode::CREATED,
            entry,
            "data created successfully",
        )),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQueueQuery>,
) -> Result<Response> {
    let (page, page_size) = PageQuery {
        page: query.page,
        page_size: query.page_size,
    }
    .normalize();

    let params = ListQueueParams {
        status: query.status,
        practice_date: query.practice_date,
        clinic_id: query.poli_id,
        page,
        page_size,
    };

    let (entries, total) = state.queue.list_details(&params).await?;
    Ok(response::success_page(
        entries,
        PageInfo::new(total, page, page_size),
    ))
}

pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    let entry = state.admission.get(id).await?;

    match state.queue.find_detail(entry.id).await? {
        Some(detail) => Ok(response::success(StatusCode::OK, detail, "success")),
        None => Ok(response::success(StatusCode::OK, entry, "success")),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateQueueEntryRequest>,
) -> Result<Response> {
    let entry = state
        .admission
        .update_status(id, req.status, req.priority)
        .await?;

    Ok(response::success(
        StatusCode::OK,
        entry,
        "data updated successfully",
    ))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    state.admission.remove(id).await?;

    Ok(response::success(
        StatusCode::OK,
        serde_json::Value::Null,
        "data deleted successfully",
    ))
}
