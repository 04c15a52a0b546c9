//! HTTP request handlers for the Roster Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::{Availability, CandidateQuery, StatusReport};
use crate::error::EngineError;
use crate::models::{AssignmentKind, AssignmentRef, Candidate, ClockRecord};

use super::request::{AvailabilityRequest, CandidatesRequest, StatusRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/availability", post(availability_handler))
        .route("/candidates", post(candidates_handler))
        .route("/status", post(status_handler))
        .route("/assignments/:kind/:id/status", get(assignment_status_handler))
        .route("/assignments/:kind/:id/check-in", post(check_in_handler))
        .route("/assignments/:kind/:id/check-out", post(check_out_handler))
        .with_state(state)
}

/// Handler for POST /availability.
async fn availability_handler(
    State(state): State<AppState>,
    payload: Result<Json<AvailabilityRequest>, JsonRejection>,
) -> ApiResult<Availability> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing availability request");

    let request = parse_body(payload, correlation_id)?;
    let window = request
        .window()
        .map_err(|err| engine_failure(correlation_id, err))?;

    let availability = state
        .engine()
        .check_availability(&request.employee_id, &window, request.exclude_event_id.as_deref())
        .await
        .map_err(|err| engine_failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        is_available = availability.is_available,
        "Availability check completed"
    );
    Ok(Json(availability))
}

/// Handler for POST /candidates.
///
/// Returns eligible employees best-first.
async fn candidates_handler(
    State(state): State<AppState>,
    payload: Result<Json<CandidatesRequest>, JsonRejection>,
) -> ApiResult<Vec<Candidate>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing candidate search");

    let request = parse_body(payload, correlation_id)?;
    let query =
        CandidateQuery::try_from(request).map_err(|err| engine_failure(correlation_id, err))?;

    let start_time = Instant::now();
    let candidates = state
        .engine()
        .find_candidates(&query)
        .await
        .map_err(|err| engine_failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        role = ?query.role,
        candidates = candidates.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Candidate search completed"
    );
    Ok(Json(candidates))
}

/// Handler for POST /status.
///
/// Evaluates explicit timestamps; nothing is read from the store.
async fn status_handler(
    State(state): State<AppState>,
    payload: Result<Json<StatusRequest>, JsonRejection>,
) -> ApiResult<StatusReport> {
    let correlation_id = Uuid::new_v4();

    let request = parse_body(payload, correlation_id)?;
    let shift = request
        .shift()
        .map_err(|err| engine_failure(correlation_id, err))?;

    Ok(Json(state.engine().shift_status(&shift, request.now)))
}

/// Handler for GET /assignments/:kind/:id/status.
async fn assignment_status_handler(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> ApiResult<StatusReport> {
    let correlation_id = Uuid::new_v4();
    let assignment = parse_assignment(&kind, id, correlation_id)?;

    let report = state
        .engine()
        .assignment_status(&assignment)
        .await
        .map_err(|err| engine_failure(correlation_id, err))?;
    Ok(Json(report))
}

/// Handler for POST /assignments/:kind/:id/check-in.
async fn check_in_handler(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> ApiResult<ClockRecord> {
    let correlation_id = Uuid::new_v4();
    let assignment = parse_assignment(&kind, id, correlation_id)?;
    info!(correlation_id = %correlation_id, assignment = %assignment, "Processing check-in");

    let record = state
        .engine()
        .check_in(&assignment)
        .await
        .map_err(|err| engine_failure(correlation_id, err))?;
    Ok(Json(record))
}

/// Handler for POST /assignments/:kind/:id/check-out.
async fn check_out_handler(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> ApiResult<ClockRecord> {
    let correlation_id = Uuid::new_v4();
    let assignment = parse_assignment(&kind, id, correlation_id)?;
    info!(correlation_id = %correlation_id, assignment = %assignment, "Processing check-out");

    let record = state
        .engine()
        .check_out(&assignment)
        .await
        .map_err(|err| engine_failure(correlation_id, err))?;
    Ok(Json(record))
}

/// Unwraps a JSON body, mapping extractor rejections to API errors.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // the body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
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
    Err(ApiErrorResponse::bad_request(error))
}

fn parse_assignment(
    kind: &str,
    id: String,
    correlation_id: Uuid,
) -> Result<AssignmentRef, ApiErrorResponse> {
    match kind.parse::<AssignmentKind>() {
        Ok(kind) => Ok(AssignmentRef::new(id, kind)),
        Err(_) => {
            warn!(correlation_id = %correlation_id, kind = %kind, "Unknown assignment kind");
            Err(ApiErrorResponse::bad_request(ApiError::invalid_assignment_kind(kind)))
        }
    }
}

fn engine_failure(correlation_id: Uuid, err: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    err.into()
}
