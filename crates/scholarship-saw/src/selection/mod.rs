//! Scholarship selection: criteria catalog, candidate roster, SAW scoring, and the
//! service and HTTP surfaces built on top of them.

pub mod catalog;
pub mod domain;
pub mod intake;
pub mod report;
pub mod roster;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, CriteriaCatalog};
pub use domain::{
    Candidate, CandidateDraft, CandidateId, Criterion, CriterionId, CriterionKind, RubricLevel,
};
pub use intake::{CandidateIntake, CandidateRejection};
pub use report::{SelectionReport, SelectionSummary};
pub use roster::{
    default_roster, InMemoryRoster, JsonFileRoster, RosterError, RosterImportError,
    RosterImporter, RosterRepository,
};
pub use router::{selection_router, RankRequest, RankResponse};
pub use scoring::{
    aggregate, normalize, passes_threshold, rank, AggregateScores, NormalizedMatrix,
    RankedCandidate, ScoringError, ScoringErrorKind, PASS_THRESHOLD,
};
pub use service::{SelectionService, SelectionServiceError};
