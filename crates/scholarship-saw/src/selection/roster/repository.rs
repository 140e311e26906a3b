use std::path::PathBuf;

use crate::selection::domain::{Candidate, CandidateId};

/// Storage abstraction for the candidate roster.
///
/// Reads hand out owned snapshots in insertion order; callers never hold a reference
/// into the store between computations.
pub trait RosterRepository: Send + Sync {
    fn snapshot(&self) -> Result<Vec<Candidate>, RosterError>;
    fn fetch(&self, id: &CandidateId) -> Result<Option<Candidate>, RosterError>;
    fn insert(&self, candidate: Candidate) -> Result<Candidate, RosterError>;
    /// Replace a candidate in place, keeping its position and id.
    fn update(&self, id: &CandidateId, candidate: Candidate) -> Result<Candidate, RosterError>;
    fn remove(&self, id: &CandidateId) -> Result<Candidate, RosterError>;
    fn replace_all(&self, candidates: Vec<Candidate>) -> Result<(), RosterError>;
}

/// Error enumeration for roster storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("candidate {0} already exists")]
    Conflict(CandidateId),
    #[error("candidate {0} not found")]
    NotFound(CandidateId),
    #[error("roster unavailable: {0}")]
    Unavailable(String),
    #[error("failed to persist roster at {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("roster file {} is not valid JSON: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub(super) fn poisoned() -> RosterError {
    RosterError::Unavailable("roster lock poisoned".to_string())
}

/// Position-preserving edit shared by the in-process stores.
pub(super) fn apply_update(
    candidates: &mut [Candidate],
    id: &CandidateId,
    mut candidate: Candidate,
) -> Result<Candidate, RosterError> {
    let slot = candidates
        .iter_mut()
        .find(|existing| &existing.id == id)
        .ok_or_else(|| RosterError::NotFound(id.clone()))?;
    candidate.id = id.clone();
    *slot = candidate.clone();
    Ok(candidate)
}

pub(super) fn apply_insert(
    candidates: &mut Vec<Candidate>,
    candidate: Candidate,
) -> Result<Candidate, RosterError> {
    if candidates.iter().any(|existing| existing.id == candidate.id) {
        return Err(RosterError::Conflict(candidate.id));
    }
    candidates.push(candidate.clone());
    Ok(candidate)
}

pub(super) fn apply_remove(
    candidates: &mut Vec<Candidate>,
    id: &CandidateId,
) -> Result<Candidate, RosterError> {
    let index = candidates
        .iter()
        .position(|existing| &existing.id == id)
        .ok_or_else(|| RosterError::NotFound(id.clone()))?;
    Ok(candidates.remove(index))
}
