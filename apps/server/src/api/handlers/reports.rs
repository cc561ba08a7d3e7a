//! Reporting handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use serde::Deserialize;

use crate::{api::response, state::AppState, Result};

#[derive(Debug, Deserialize)]
pub struct ReportRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<i64>,
}

pub async fn clinic_visits(
    State(state): State<AppState>,
    Query(query): Query<ReportRangeQuery>,
) -> Result<Response> {
    let report = state
        .report_service
        .clinic_visits(query.start_date.as_deref(), query.end_date.as_deref())
        .await?;

    Ok(response::success(StatusCode::OK, report, "success"))
}

pub async fn top_diseases(
    State(state): State<AppState>,
    Query(query): Query<ReportRangeQuery>,
) -> Result<Response> {
    let report = state
        .report_service
        .top_diseases(
            query.start_date.as_deref(),
            query.end_date.as_deref(),
            query.limit,
        )
        .await?;

    Ok(response::success(StatusCode::OK, report, "success"))
}
