use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{Candidate, CandidateDraft, CandidateId};
use super::roster::{RosterError, RosterRepository};
use super::scoring::{RankedCandidate, PASS_THRESHOLD};
use super::service::{SelectionService, SelectionServiceError};

/// Stateless ranking request carrying its own roster snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankRequest {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub threshold: f64,
    pub candidates: Vec<RankedCandidate>,
}

/// Router builder exposing the roster and ranking endpoints.
pub fn selection_router<R>(service: Arc<SelectionService<R>>) -> Router
where
    R: RosterRepository + 'static,
{
    Router::new()
        .route("/api/v1/criteria", get(criteria_handler::<R>))
        .route(
            "/api/v1/candidates",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route("/api/v1/candidates/reset", post(reset_handler::<R>))
        .route(
            "/api/v1/candidates/:candidate_id",
            get(fetch_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .route("/api/v1/results", get(results_handler::<R>))
        .route("/api/v1/rank", post(rank_handler::<R>))
        .with_state(service)
}

pub(crate) async fn criteria_handler<R>(State(service): State<Arc<SelectionService<R>>>) -> Response
where
    R: RosterRepository + 'static,
{
    let catalog = service.catalog();
    let payload = json!({
        "criteria": catalog,
        "total_weight": catalog.total_weight(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<SelectionService<R>>>) -> Response
where
    R: RosterRepository + 'static,
{
    match service.candidates() {
        Ok(candidates) => (StatusCode::OK, axum::Json(candidates)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<SelectionService<R>>>,
    axum::Json(candidate): axum::Json<Candidate>,
) -> Response
where
    R: RosterRepository + 'static,
{
    match service.add(candidate) {
        Ok(stored) => (StatusCode::CREATED, axum::Json(stored)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<SelectionService<R>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: RosterRepository + 'static,
{
    match service.candidate(&CandidateId(candidate_id)) {
        Ok(candidate) => (StatusCode::OK, axum::Json(candidate)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<SelectionService<R>>>,
    Path(candidate_id): Path<String>,
    axum::Json(draft): axum::Json<CandidateDraft>,
) -> Response
where
    R: RosterRepository + 'static,
{
    match service.update(&CandidateId(candidate_id), draft) {
        Ok(stored) => (StatusCode::OK, axum::Json(stored)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<SelectionService<R>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: RosterRepository + 'static,
{
    match service.remove(&CandidateId(candidate_id)) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn reset_handler<R>(State(service): State<Arc<SelectionService<R>>>) -> Response
where
    R: RosterRepository + 'static,
{
    match service.reset() {
        Ok(candidates) => (StatusCode::OK, axum::Json(candidates)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn results_handler<R>(State(service): State<Arc<SelectionService<R>>>) -> Response
where
    R: RosterRepository + 'static,
{
    match service.report() {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn rank_handler<R>(
    State(service): State<Arc<SelectionService<R>>>,
    axum::Json(request): axum::Json<RankRequest>,
) -> Response
where
    R: RosterRepository + 'static,
{
    match service.rank_snapshot(&request.candidates) {
        Ok(candidates) => {
            let body = RankResponse {
                threshold: PASS_THRESHOLD,
                candidates,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: SelectionServiceError) -> Response {
    let (status, payload) = match &err {
        SelectionServiceError::Rejected(rejection) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "error": rejection.to_string() }),
        ),
        SelectionServiceError::Scoring(scoring) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({
                "error": scoring.to_string(),
                "kind": scoring.kind(),
            }),
        ),
        SelectionServiceError::Roster(RosterError::Conflict(id)) => (
            StatusCode::CONFLICT,
            json!({ "error": format!("candidate {id} already exists") }),
        ),
        SelectionServiceError::Roster(RosterError::NotFound(id)) => (
            StatusCode::NOT_FOUND,
            json!({
                "error": "candidate not found",
                "candidate_id": id,
            }),
        ),
        SelectionServiceError::Roster(other) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": other.to_string() }),
        ),
    };

    (status, axum::Json(payload)).into_response()
}
