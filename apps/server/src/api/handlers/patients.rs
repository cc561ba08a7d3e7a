//! Patient (pasien) handlers.

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
    auth,
    db::patients::{ListPatientParams, PatientWrite},
    models::patient::CreatePatientRequest,
    state::AppState,
    Error, Result,
};

#[derive(Debug, Deserialize)]
pub struct ListPatientQuery {
    #[serde(rename = "nama")]
    pub name: Option<String>,
    pub nik: Option<String>,
    pub page: Option<i64>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
}

fn to_write(req: &CreatePatientRequest) -> PatientWrite {
    PatientWrite {
        nik: req.nik.clone(),
        medical_record_no: req.medical_record_no.clone(),
        insurance_no: req.insurance_no.clone(),
        username: req.username.clone(),
        phone: req.phone.clone(),
        name: req.name.clone(),
        address: req.address.clone(),
        birth_place: req.birth_place.clone(),
        birth_date: req.birth_date,
        sex: req.sex.clone(),
        marital_status: req.marital_status.clone(),
        next_of_kin_name: req.next_of_kin_name.clone(),
        next_of_kin_phone: req.next_of_kin_phone.clone(),
        password_hash: req.password.as_deref().map(auth::hash_password),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreatePatientRequest>,
) -> Result<Response> {
    validate(&req)?;

    let patient = state.patients.create(&to_write(&req)).await?;
    Ok(response::success(
        StatusCode::CREATED,
        patient,
        "data created successfully",
    ))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListPatientQuery>,
) -> Result<Response> {
    let (page, page_size) = PageQuery {
        page: query.page,
        page_size: query.page_size,
    }
    .normalize();
    let params = ListPatientParams {
        name: query.name,
        nik: query.nik,
        page,
        page_size,
    };

    let (patients, total) = state.patients.list(&params).await?;
    Ok(response::success_page(
        patients,
        PageInfo::new(total, page, page_size),
    ))
}

pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    let patient = state
        .patients
        .find(id)
        .await?
        .ok_or_else(|| Error::not_found("patient"))?;

    Ok(response::success(StatusCode::OK, patient, "success"))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<CreatePatientRequest>,
) -> Result<Response> {
    validate(&req)?;

    let patient = state
        .patients
        .update(id, &to_write(&req))
        .await?
        .ok_or_else(|| Error::not_found("patient"))?;

    Ok(response::success(
        StatusCode::OK,
        patient,
        "data updated successfully",
    ))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    if !state.patients.delete(id).await? {
        return Err(Error::not_found("patient"));
    }

    Ok(response::success(
        StatusCode::OK,
        serde_json::Value::Null,
        "data deleted successfully",
    ))
}
