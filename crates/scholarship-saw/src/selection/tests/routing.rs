use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::selection::catalog::CriteriaCatalog;
use crate::selection::roster::{InMemoryRoster, RosterRepository};
use crate::selection::router::{self, selection_router};
use crate::selection::service::SelectionService;

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("request builds")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn criteria_route_lists_catalog_and_weight() {
    let response = router_with_defaults()
        .oneshot(empty_request("GET", "/api/v1/criteria"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["criteria"].as_array().map(Vec::len), Some(5));
    assert_eq!(body["criteria"][1]["type"], "cost");
    assert_close(body["total_weight"].as_f64().expect("weight"), 1.0);
}

#[tokio::test]
async fn create_route_returns_created_candidate() {
    let payload = serde_json::to_value(new_applicant("S011")).expect("serialize");

    let response = router_with_defaults()
        .oneshot(json_request("POST", "/api/v1/candidates", payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["id"], "S011");
}

#[tokio::test]
async fn create_handler_returns_unprocessable_for_rejection() {
    let (service, _) = build_service();
    let mut applicant = new_applicant("S012");
    applicant.name = "   ".to_string();

    let response = router::create_handler(State(Arc::new(service)), axum::Json(applicant)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_handler_returns_conflict_on_duplicate() {
    let (service, _) = build_service();

    let response =
        router::create_handler(State(Arc::new(service)), axum::Json(new_applicant("S002"))).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn fetch_handler_returns_not_found_payload() {
    let (service, _) = build_service();

    let response =
        router::fetch_handler(State(Arc::new(service)), Path("S404".to_string())).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body["candidate_id"], "S404");
}

#[tokio::test]
async fn update_route_replaces_fields() {
    let (service, roster) = build_service();
    let app = selection_router(Arc::new(service));
    let draft = json!({
        "name": "Bob Smith Jr.",
        "scores": { "C1": 5, "C2": 1, "C3": 5, "C4": 5, "C5": 1 }
    });

    let response = app
        .oneshot(json_request("PUT", "/api/v1/candidates/S002", draft))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let stored = roster.snapshot().expect("snapshot");
    assert_eq!(stored[1].name, "Bob Smith Jr.");
}

#[tokio::test]
async fn delete_route_returns_no_content() {
    let response = router_with_defaults()
        .oneshot(empty_request("DELETE", "/api/v1/candidates/S005"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn reset_route_returns_default_roster() {
    let response = router_with_defaults()
        .oneshot(empty_request("POST", "/api/v1/candidates/reset"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(10));
}

#[tokio::test]
async fn results_route_returns_report() {
    let response = router_with_defaults()
        .oneshot(empty_request("GET", "/api/v1/results"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["summary"]["passed"], 6);
    assert_eq!(body["candidates"][0]["id"], "S007");
    assert_eq!(body["candidates"][0]["rank"], 1);
    assert_eq!(body["candidates"][0]["passed"], true);
    assert!(body["candidates"][0]["normalized_scores"]["C1"].is_number());
}

#[tokio::test]
async fn results_route_reports_empty_roster_kind() {
    let service = SelectionService::new(
        Arc::new(InMemoryRoster::new(Vec::new())),
        CriteriaCatalog::standard(),
    );

    let response = selection_router(Arc::new(service))
        .oneshot(empty_request("GET", "/api/v1/results"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["kind"], "empty_roster");
}

#[tokio::test]
async fn rank_route_rejects_zero_scores() {
    let payload = json!({
        "candidates": [
            { "id": "A", "name": "A", "scores": { "C1": 5, "C2": 4, "C3": 4, "C4": 5, "C5": 4 } },
            { "id": "B", "name": "B", "scores": { "C1": 4, "C2": 0, "C3": 3, "C4": 4, "C5": 5 } }
        ]
    });

    let response = router_with_defaults()
        .oneshot(json_request("POST", "/api/v1/rank", payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["kind"], "invalid_score");
}

#[tokio::test]
async fn rank_route_scores_posted_snapshot() {
    let payload = json!({
        "candidates": [
            { "id": "Q1", "name": "Quinn", "scores": { "C1": 3, "C2": 3, "C3": 3, "C4": 3, "C5": 3 } },
            { "id": "Q2", "name": "Rowan", "scores": { "C1": 5, "C2": 1, "C3": 5, "C4": 5, "C5": 1 } }
        ]
    });

    let response = router_with_defaults()
        .oneshot(json_request("POST", "/api/v1/rank", payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["threshold"], 0.7);
    assert_eq!(body["candidates"][0]["id"], "Q2");
    assert_close(body["candidates"][0]["aggregate_score"].as_f64().expect("score"), 1.0);
    assert_eq!(body["candidates"][1]["passed"], false);
}

#[tokio::test]
async fn list_handler_returns_internal_error_when_store_fails() {
    let service = SelectionService::new(Arc::new(UnavailableRoster), CriteriaCatalog::standard());

    let response = router::list_handler(State(Arc::new(service))).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
