use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationId, ApplicationStatus, ApplicationSubmission, JobPosting};
use super::repository::{ApplicationStore, RepositoryError};
use super::service::{ApplicationFilter, ScreeningService, ScreeningServiceError};

type SharedService<S> = Arc<ScreeningService<S>>;

/// Router builder exposing job registration, intake, scoring, and review endpoints.
pub fn screening_router<S>(service: SharedService<S>) -> Router
where
    S: ApplicationStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/jobs",
            post(register_job_handler::<S>).get(list_jobs_handler::<S>),
        )
        .route(
            "/api/v1/applications",
            post(submit_handler::<S>).get(list_handler::<S>),
        )
        .route(
            "/api/v1/applications/:application_id",
            get(application_handler::<S>).delete(delete_handler::<S>),
        )
        .route(
            "/api/v1/applications/:application_id/scores",
            get(history_handler::<S>),
        )
        .route(
            "/api/v1/applications/:application_id/rescore",
            post(rescore_handler::<S>),
        )
        .route(
            "/api/v1/applications/:application_id/status",
            patch(status_handler::<S>),
        )
        .route("/api/v1/stats/applications", get(stats_handler::<S>))
        .with_state(service)
}

/// Body accepted by the manual status override.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
}

fn error_response(error: ScreeningServiceError) -> Response {
    let status = match &error {
        ScreeningServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        err if err.is_lookup_failure() => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

pub(crate) async fn register_job_handler<S>(
    State(service): State<SharedService<S>>,
    Json(job): Json<JobPosting>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    match service.register_job(job) {
        Ok(job) => (StatusCode::CREATED, Json(job)).into_response(),
        Err(ScreeningServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({ "error": "job already exists" });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn list_jobs_handler<S>(State(service): State<SharedService<S>>) -> Response
where
    S: ApplicationStore + 'static,
{
    match service.jobs() {
        Ok(jobs) => (StatusCode::OK, Json(jobs)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn submit_handler<S>(
    State(service): State<SharedService<S>>,
    Json(submission): Json<ApplicationSubmission>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    match service.submit(submission) {
        Ok(view) => (StatusCode::ACCEPTED, Json(view)).into_response(),
        Err(ScreeningServiceError::JobNotFound { job_id }) => {
            let payload = json!({
                "error": format!("job {job_id} not found or not accepting applications"),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn list_handler<S>(
    State(service): State<SharedService<S>>,
    Query(filter): Query<ApplicationFilter>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    match service.list(&filter) {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn application_handler<S>(
    State(service): State<SharedService<S>>,
    Path(application_id): Path<String>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    match service.get(&ApplicationId(application_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn history_handler<S>(
    State(service): State<SharedService<S>>,
    Path(application_id): Path<String>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    match service.score_history(&ApplicationId(application_id)) {
        Ok(scores) => (StatusCode::OK, Json(scores)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn rescore_handler<S>(
    State(service): State<SharedService<S>>,
    Path(application_id): Path<String>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    match service.score(&ApplicationId(application_id)) {
        Ok(score) => (StatusCode::OK, Json(score)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn status_handler<S>(
    State(service): State<SharedService<S>>,
    Path(application_id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    match service.update_status(&ApplicationId(application_id), update.status) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn delete_handler<S>(
    State(service): State<SharedService<S>>,
    Path(application_id): Path<String>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    match service.delete(&ApplicationId(application_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn stats_handler<S>(State(service): State<SharedService<S>>) -> Response
where
    S: ApplicationStore + 'static,
{
    match service.stats() {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(other) => error_response(other),
    }
}
