//! Staff (petugas) handlers, including login and password change.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Deserialize;

use super::validate;
use crate::{
    api::{
        pagination::{PageInfo, PageQuery},
        response,
    },
    auth::AuthenticatedStaff,
    db::staff::{ListStaffParams, StaffWrite},
    models::staff::{
        ChangePasswordRequest, CreateStaffRequest, LoginRequest, LoginResponse, UpdateStaffRequest,
    },
    state::AppState,
    Error, Result,
};

#[derive(Debug, Deserialize)]
pub struct ListStaffQuery {
    #[serde(rename = "nama")]
    pub name: Option<String>,
    pub status: Option<String>,
    pub page: Option<i64>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response> {
    validate(&req)?;

    let token = state.staff_service.login(&req).await?;
    Ok(response::success(
        StatusCode::OK,
        LoginResponse { token },
        "login successful",
    ))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateStaffRequest>,
) -> Result<Response> {
    validate(&req)?;

    let staff = state.staff_service.create(&req).await?;
    Ok(response::success(
        StatusCode::CREATED,
        staff,
        "data created successfully",
    ))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListStaffQuery>,
) -> Result<Response> {
    let (page, page_size) = PageQuery {
        page: query.page,
        page_size: query.page_size,
    }
    .normalize();
    let params = ListStaffParams {
        name: query.name,
        status: query.status,
        page,
        page_size,
    };

    let (staff, total) = state.staff.list(&params).await?;
    Ok(response::success_page(
        staff,
        PageInfo::new(total, page, page_size),
    ))
}

pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    let staff = state
        .staff
        .find(id)
        .await?
        .ok_or_else(|| Error::not_found("staff"))?;

    Ok(response::success(StatusCode::OK, staff, "success"))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateStaffRequest>,
) -> Result<Response> {
    validate(&req)?;

    let write = StaffWrite {
        clinic_id: req.clinic_id,
        username: req.username.clone(),
        name: req.name.clone(),
        status: req.status.clone(),
        role: req.role,
    };

    let staff = state
        .staff
        .update(id, &write)
        .await?
        .ok_or_else(|| Error::not_found("staff"))?;

    Ok(response::success(
        StatusCode::OK,
        staff,
        "data updated successfully",
    ))
}

/// Change the authenticated caller's own password.
pub async fn change_password(
    State(state): State<AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Response> {
    validate(&req)?;

    let staff_id = claims
        .staff_id()
        .ok_or_else(|| Error::Unauthorized("invalid token subject".to_string()))?;

    state.staff_service.change_password(staff_id, &req).await?;
    Ok(response::success(
        StatusCode::OK,
        serde_json::Value::Null,
        "password updated successfully",
    ))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    if !state.staff.delete(id).await? {
        return Err(Error::not_found("staff"));
    }

    Ok(response::success(
        StatusCode::OK,
        serde_json::Value::Null,
        "data deleted successfully",
    ))
}
