use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::screening::router::{rescore_handler, submit_handler};
use crate::workflows::screening::{ScoringConfig, ScreeningService};

fn json_request(method: Method, uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("serialize")))
        .expect("request builds")
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn submit_route_returns_scored_application() {
    let (service, _) = build_service();
    let router = screening_router_with_service(service);
    let payload = serde_json::to_value(submission()).expect("submission serializes");

    let response = router
        .oneshot(json_request(Method::POST, "/api/v1/applications", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = read_json_body(response).await;
    assert_eq!(body["status"], "under_review");
    assert_eq!(body["job_id"], JOB_ID);
    assert_eq!(body["latest_score"]["final_score"], 70.0);
    assert_eq!(body["latest_score"]["skills_match"], 50.0);
    assert_eq!(body["latest_score"]["details"]["education_match"], 70.0);
    assert_eq!(body["latest_score"]["decision"], "requalification_needed");
}

#[tokio::test]
async fn submit_route_scores_null_sections_as_empty() {
    let (service, _) = build_service();
    let router = screening_router_with_service(service);
    let mut payload = serde_json::to_value(submission()).expect("submission serializes");
    payload["parsed"]["skills"] = Value::Null;
    payload["parsed"]["education"] = Value::Null;
    payload["parsed"]["certifications"] = Value::Null;

    let response = router
        .oneshot(json_request(Method::POST, "/api/v1/applications", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = read_json_body(response).await;
    assert_eq!(body["latest_score"]["skills_match"], 0.0);
    assert_eq!(body["latest_score"]["education_match"], 0.0);
    assert_eq!(body["latest_score"]["experience_match"], 80.0);
    assert_eq!(body["latest_score"]["final_score"], 63.33);
    assert_eq!(body["status"], "under_review");
}

#[tokio::test]
async fn submit_handler_returns_not_found_for_unknown_job() {
    let (service, _) = build_service();
    let mut submission = submission();
    submission.job_id.0 = "job-missing".to_string();

    let response = submit_handler(State(Arc::new(service)), axum::Json(submission)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("job-missing"));
}

#[tokio::test]
async fn submit_handler_returns_internal_error_when_store_is_down() {
    let service = Arc::new(ScreeningService::new(
        Arc::new(UnavailableStore),
        ScoringConfig::default(),
    ));

    let response = submit_handler(State(service), axum::Json(submission())).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn rescore_handler_reports_missing_application() {
    let (service, _) = build_service();

    let response = rescore_handler(
        State(Arc::new(service)),
        Path("app-does-not-exist".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rescore_route_appends_to_history() {
    let (service, _) = build_service();
    let id = service.submit(submission()).expect("submitted").application.id;
    let router = screening_router_with_service(service);

    let response = router
        .clone()
        .oneshot(empty_request(
            Method::POST,
            &format!("/api/v1/applications/{}/rescore", id.0),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let rescored = read_json_body(response).await;
    assert_eq!(rescored["application_id"], id.0.as_str());

    let response = router
        .oneshot(empty_request(
            Method::GET,
            &format!("/api/v1/applications/{}/scores", id.0),
        ))
        .await
        .expect("router responds");
    let history = read_json_body(response).await;
    let history = history.as_array().expect("history array");
    assert_eq!(history.len(), 2);
    assert_eq!(history[1]["id"], rescored["id"]);
}

#[tokio::test]
async fn status_route_applies_manual_override() {
    let (service, _) = build_service();
    let id = service.submit(submission()).expect("submitted").application.id;
    let router = screening_router_with_service(service);

    let response = router
        .oneshot(json_request(
            Method::PATCH,
            &format!("/api/v1/applications/{}/status", id.0),
            &json!({ "status": "interview_scheduled" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["status"], "interview_scheduled");
}

#[tokio::test]
async fn list_route_filters_by_status() {
    let (service, _) = build_service();
    service.submit(strong_submission()).expect("shortlisted");
    service.submit(empty_submission()).expect("rejected");
    let router = screening_router_with_service(service);

    let response = router
        .oneshot(empty_request(
            Method::GET,
            "/api/v1/applications?status=rejected",
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let listed = body.as_array().expect("array");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["status"], "rejected");
}

#[tokio::test]
async fn job_routes_register_and_detect_duplicates() {
    let store = Arc::new(crate::workflows::screening::InMemoryApplicationStore::default());
    let router = screening_router_with_service(ScreeningService::new(
        store,
        ScoringConfig::default(),
    ));
    let payload = serde_json::to_value(job()).expect("job serializes");

    let response = router
        .clone()
        .oneshot(json_request(Method::POST, "/api/v1/jobs", &payload))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .clone()
        .oneshot(json_request(Method::POST, "/api/v1/jobs", &payload))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = router
        .oneshot(empty_request(Method::GET, "/api/v1/jobs"))
        .await
        .expect("router responds");
    let body = read_json_body(response).await;
    assert_eq!(body.as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn delete_route_then_get_returns_not_found() {
    let (service, _) = build_service();
    let id = service.submit(submission()).expect("submitted").application.id;
    let router = screening_router_with_service(service);
    let uri = format!("/api/v1/applications/{}", id.0);

    let response = router
        .clone()
        .oneshot(empty_request(Method::DELETE, &uri))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .oneshot(empty_request(Method::GET, &uri))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stats_route_summarises_pipeline() {
    let (service, _) = build_service();
    service.submit(submission()).expect("under review");
    let router = screening_router_with_service(service);

    let response = router
        .oneshot(empty_request(Method::GET, "/api/v1/stats/applications"))
        .await
        .expect("router responds");

    let body = read_json_body(response).await;
    assert_eq!(body["total_applications"], 1);
    assert_eq!(body["under_review"], 1);
    assert_eq!(body["by_status"]["under_review"], 1);
}
