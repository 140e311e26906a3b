use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::selection::catalog::CriteriaCatalog;
use crate::selection::domain::{Candidate, CandidateId, Criterion, CriterionId, CriterionKind};
use crate::selection::roster::{InMemoryRoster, RosterError, RosterRepository};
use crate::selection::router::selection_router;
use crate::selection::service::SelectionService;

pub(super) fn criterion(id: &str, weight: f64, kind: CriterionKind) -> Criterion {
    Criterion {
        id: CriterionId::new(id),
        name: format!("Criterion {id}"),
        weight,
        kind,
        rubric: Vec::new(),
    }
}

/// Benefit-only catalog weighted .30/.20/.20/.15/.15.
pub(super) fn benefit_catalog() -> CriteriaCatalog {
    CriteriaCatalog::new(vec![
        criterion("C1", 0.30, CriterionKind::Benefit),
        criterion("C2", 0.20, CriterionKind::Benefit),
        criterion("C3", 0.20, CriterionKind::Benefit),
        criterion("C4", 0.15, CriterionKind::Benefit),
        criterion("C5", 0.15, CriterionKind::Benefit),
    ])
    .expect("valid catalog")
}

pub(super) fn scored(id: &str, scores: [f64; 5]) -> Candidate {
    ["C1", "C2", "C3", "C4", "C5"]
        .into_iter()
        .zip(scores)
        .fold(Candidate::new(id, format!("Candidate {id}")), |candidate, (criterion, score)| {
            candidate.with_score(criterion, score)
        })
}

/// Three-candidate roster whose expected outcome is 0.89 / 0.83 / 0.68.
pub(super) fn worked_example_roster() -> Vec<Candidate> {
    vec![
        scored("A", [5.0, 4.0, 4.0, 5.0, 4.0]),
        scored("B", [4.0, 5.0, 3.0, 4.0, 5.0]),
        scored("C", [3.0, 3.0, 5.0, 3.0, 3.0]),
    ]
}

pub(super) fn new_applicant(id: &str) -> Candidate {
    scored(id, [4.0, 2.0, 5.0, 3.0, 1.0])
}

pub(super) fn build_service() -> (SelectionService<InMemoryRoster>, Arc<InMemoryRoster>) {
    let roster = Arc::new(InMemoryRoster::with_defaults());
    let service = SelectionService::new(roster.clone(), CriteriaCatalog::standard());
    (service, roster)
}

pub(super) fn router_with_defaults() -> axum::Router {
    let (service, _) = build_service();
    selection_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// Store whose backing medium is gone.
pub(super) struct UnavailableRoster;

impl RosterRepository for UnavailableRoster {
    fn snapshot(&self) -> Result<Vec<Candidate>, RosterError> {
        Err(RosterError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &CandidateId) -> Result<Option<Candidate>, RosterError> {
        Err(RosterError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _candidate: Candidate) -> Result<Candidate, RosterError> {
        Err(RosterError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _id: &CandidateId, _candidate: Candidate) -> Result<Candidate, RosterError> {
        Err(RosterError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _id: &CandidateId) -> Result<Candidate, RosterError> {
        Err(RosterError::Unavailable("database offline".to_string()))
    }

    fn replace_all(&self, _candidates: Vec<Candidate>) -> Result<(), RosterError> {
        Err(RosterError::Unavailable("database offline".to_string()))
    }
}
