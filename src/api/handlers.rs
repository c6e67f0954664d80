//! HTTP request handlers for the Absence Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AbsenceError;
use crate::models::{BereavementLeaveRequest, LeaveRequest};

use super::request::{BereavementLeaveBody, CheckOverlapBody, CreateLeaveBody, SspPreviewBody};
use super::response::{ApiError, ApiErrorResponse, CheckOverlapResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/absences/check-overlap", post(check_overlap_handler))
        .route("/absences", post(create_leave_handler))
        .route(
            "/absences/parental-bereavement",
            post(create_bereavement_handler),
        )
        .route("/ssp/preview", post(ssp_preview_handler))
        .with_state(state)
}

/// Handler for POST /absences/check-overlap.
///
/// Always answers 200 with the check outcome unless the request is invalid
/// or the check fails closed.
async fn check_overlap_handler(
    State(state): State<AppState>,
    payload: Result<Json<CheckOverlapBody>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing overlap check");

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state.service().check_overlap(
        &body.company_id,
        &body.employee_id,
        &body.start_date,
        &body.end_date,
        body.exclude_id.as_deref(),
    ) {
        Ok(check) => {
            let response = CheckOverlapResponse::from(check);
            info!(
                correlation_id = %correlation_id,
                employee_id = %body.employee_id,
                verified = response.verified,
                conflicts = response.conflicts.len(),
                "Overlap check completed"
            );
            json_response(StatusCode::OK, &response)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /absences.
///
/// Records a single-range absence and returns it with 201.
async fn create_leave_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLeaveBody>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing absence creation");

    let request: LeaveRequest = match payload {
        Ok(Json(body)) => body.into(),
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match state.service().create_leave(&request) {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                id = %record.id,
                employee_id = %record.employee_id,
                duration_us = start_time.elapsed().as_micros(),
                "Absence created"
            );
            json_response(StatusCode::CREATED, &record)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /absences/parental-bereavement.
///
/// Records one absence per leave block and returns them with 201.
async fn create_bereavement_handler(
    State(state): State<AppState>,
    payload: Result<Json<BereavementLeaveBody>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing parental bereavement leave");

    let request: BereavementLeaveRequest = match payload {
        Ok(Json(body)) => body.into(),
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state.service().create_bereavement_leave(&request) {
        Ok(records) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                blocks = records.len(),
                "Parental bereavement leave created"
            );
            json_response(StatusCode::CREATED, &records)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /ssp/preview.
async fn ssp_preview_handler(
    State(state): State<AppState>,
    payload: Result<Json<SspPreviewBody>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing SSP preview");

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = body
        .into_request()
        .and_then(|request| state.service().preview_ssp(&request));
    match result {
        Ok(preview) => {
            info!(
                correlation_id = %correlation_id,
                company_id = %preview.company_id,
                employees = preview.employees.len(),
                total_amount = %preview.total_amount,
                duration_us = start_time.elapsed().as_micros(),
                "SSP preview completed"
            );
            json_response(StatusCode::OK, &preview)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: AbsenceError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, &api_error.error)
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, &error)
}
