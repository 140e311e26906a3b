//! Simple Additive Weighting over a roster snapshot.
//!
//! Every stage is a pure function of `(roster, catalog)` and the first invalid input
//! found aborts the computation. Criteria are visited in catalog order and candidates
//! in roster order, so the reported violation and every floating point sum are
//! reproducible for a given snapshot.

mod aggregate;
mod normalize;
mod rank;

pub use aggregate::{aggregate, AggregateScores};
pub use normalize::normalize;
pub use rank::{passes_threshold, rank, RankedCandidate, PASS_THRESHOLD};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Candidate, CandidateId, CriterionId};

/// Normalized value per (candidate, criterion) pair, each within `(0, 1]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct NormalizedMatrix {
    rows: BTreeMap<CandidateId, BTreeMap<CriterionId, f64>>,
}

impl NormalizedMatrix {
    pub fn row(&self, candidate: &CandidateId) -> Option<&BTreeMap<CriterionId, f64>> {
        self.rows.get(candidate)
    }

    pub fn value(&self, candidate: &CandidateId, criterion: &CriterionId) -> Option<f64> {
        self.rows.get(candidate)?.get(criterion).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CandidateId, &BTreeMap<CriterionId, f64>)> {
        self.rows.iter()
    }

    pub(crate) fn into_rows(self) -> BTreeMap<CandidateId, BTreeMap<CriterionId, f64>> {
        self.rows
    }
}

/// Machine readable category of a [`ScoringError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringErrorKind {
    InvalidScore,
    MissingScore,
    EmptyRoster,
    DuplicateCandidate,
}

impl ScoringErrorKind {
    pub const fn label(self) -> &'static str {
        match self {
            ScoringErrorKind::InvalidScore => "invalid_score",
            ScoringErrorKind::MissingScore => "missing_score",
            ScoringErrorKind::EmptyRoster => "empty_roster",
            ScoringErrorKind::DuplicateCandidate => "duplicate_candidate",
        }
    }
}

/// Terminal failure of a scoring computation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("candidate {candidate} has score {value} for criterion {criterion}; raw scores must be positive")]
    InvalidScore {
        candidate: CandidateId,
        criterion: CriterionId,
        value: f64,
    },
    #[error("candidate {candidate} has no score for criterion {criterion}")]
    MissingScore {
        candidate: CandidateId,
        criterion: CriterionId,
    },
    #[error("roster is empty; at least one candidate is required")]
    EmptyRoster,
    #[error("candidate {0} appears more than once in the roster")]
    DuplicateCandidate(CandidateId),
}

impl ScoringError {
    pub fn kind(&self) -> ScoringErrorKind {
        match self {
            ScoringError::InvalidScore { .. } => ScoringErrorKind::InvalidScore,
            ScoringError::MissingScore { .. } => ScoringErrorKind::MissingScore,
            ScoringError::EmptyRoster => ScoringErrorKind::EmptyRoster,
            ScoringError::DuplicateCandidate(_) => ScoringErrorKind::DuplicateCandidate,
        }
    }
}

fn ensure_roster(roster: &[Candidate]) -> Result<(), ScoringError> {
    if roster.is_empty() {
        return Err(ScoringError::EmptyRoster);
    }

    let mut seen = std::collections::HashSet::with_capacity(roster.len());
    for candidate in roster {
        if !seen.insert(&candidate.id) {
            return Err(ScoringError::DuplicateCandidate(candidate.id.clone()));
        }
    }

    Ok(())
}
