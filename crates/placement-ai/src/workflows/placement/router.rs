use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::{Drive, DriveId, StudentId, StudentProfile};
use super::repository::PlacementRepository;
use super::service::{EligibilityService, EligibilityServiceError};

/// Router builder exposing HTTP endpoints for eligibility checks.
pub fn eligibility_router<R>(service: Arc<EligibilityService<R>>) -> Router
where
    R: PlacementRepository + 'static,
{
    Router::new()
        .route("/api/v1/eligibility/check", post(inline_check_handler::<R>))
        .route(
            "/api/v1/students/:student_id/drives/:drive_id/eligibility",
            get(stored_check_handler::<R>),
        )
        .route(
            "/api/v1/students/:student_id/drives",
            get(student_drives_handler::<R>),
        )
        .route("/api/v1/drives/:drive_id/cohort", get(cohort_handler::<R>))
        .with_state(service)
}

/// Inline evaluation payload for callers that already hold both records.
#[derive(Debug, Deserialize)]
pub struct InlineCheckRequest {
    pub student: StudentProfile,
    pub drive: Drive,
}

#[derive(Debug, Default, Deserialize)]
pub struct DriveListingQuery {
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

pub(crate) async fn inline_check_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    axum::Json(request): axum::Json<InlineCheckRequest>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    let result = service.evaluate_inline(&request.student, &request.drive);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn stored_check_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    Path((student_id, drive_id)): Path<(String, String)>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    match service.check(&StudentId(student_id), &DriveId(drive_id)) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn student_drives_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    Path(student_id): Path<String>,
    Query(query): Query<DriveListingQuery>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    let today = query.today.unwrap_or_else(|| Local::now().date_naive());
    match service.drives_for_student(&StudentId(student_id), today) {
        Ok(buckets) => (StatusCode::OK, axum::Json(buckets)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn cohort_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    Path(drive_id): Path<String>,
) -> Response
where
    R: PlacementRepository + 'static,
{
    match service.cohort(&DriveId(drive_id)) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: EligibilityServiceError) -> Response {
    let status = if error.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
