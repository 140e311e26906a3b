use std::sync::Arc;

use tracing::{debug, info};

use super::catalog::CriteriaCatalog;
use super::domain::{Candidate, CandidateDraft, CandidateId};
use super::intake::{CandidateIntake, CandidateRejection};
use super::report::SelectionReport;
use super::roster::{default_roster, RosterError, RosterRepository};
use super::scoring::{self, RankedCandidate, ScoringError};

/// Service composing the criteria catalog, roster store, and scoring stages.
pub struct SelectionService<R> {
    intake: Arc<CandidateIntake>,
    roster: Arc<R>,
}

impl<R> SelectionService<R>
where
    R: RosterRepository + 'static,
{
    pub fn new(roster: Arc<R>, catalog: CriteriaCatalog) -> Self {
        Self {
            intake: Arc::new(CandidateIntake::new(catalog)),
            roster,
        }
    }

    pub fn catalog(&self) -> &CriteriaCatalog {
        self.intake.catalog()
    }

    /// Current roster in insertion order.
    pub fn candidates(&self) -> Result<Vec<Candidate>, SelectionServiceError> {
        Ok(self.roster.snapshot()?)
    }

    pub fn candidate(&self, id: &CandidateId) -> Result<Candidate, SelectionServiceError> {
        let candidate = self
            .roster
            .fetch(id)?
            .ok_or_else(|| RosterError::NotFound(id.clone()))?;
        Ok(candidate)
    }

    pub fn add(&self, candidate: Candidate) -> Result<Candidate, SelectionServiceError> {
        let candidate = self.intake.admit(candidate)?;
        let stored = self.roster.insert(candidate)?;
        info!(candidate = %stored.id, "candidate added to roster");
        Ok(stored)
    }

    pub fn update(
        &self,
        id: &CandidateId,
        draft: CandidateDraft,
    ) -> Result<Candidate, SelectionServiceError> {
        let candidate = self.intake.admit(draft.into_candidate(id.clone()))?;
        let stored = self.roster.update(id, candidate)?;
        info!(candidate = %stored.id, "candidate updated");
        Ok(stored)
    }

    pub fn remove(&self, id: &CandidateId) -> Result<Candidate, SelectionServiceError> {
        let removed = self.roster.remove(id)?;
        info!(candidate = %removed.id, "candidate removed from roster");
        Ok(removed)
    }

    /// Restore the default roster, discarding every edit.
    pub fn reset(&self) -> Result<Vec<Candidate>, SelectionServiceError> {
        let defaults = default_roster();
        self.roster.replace_all(defaults.clone())?;
        info!(candidates = defaults.len(), "roster reset to defaults");
        Ok(defaults)
    }

    /// Rank a fresh snapshot of the stored roster.
    pub fn rank(&self) -> Result<Vec<RankedCandidate>, SelectionServiceError> {
        let snapshot = self.roster.snapshot()?;
        self.rank_snapshot(&snapshot)
    }

    /// Rank a caller supplied roster without touching the store.
    pub fn rank_snapshot(
        &self,
        candidates: &[Candidate],
    ) -> Result<Vec<RankedCandidate>, SelectionServiceError> {
        let ranked = scoring::rank(candidates, self.catalog())?;
        debug!(
            candidates = ranked.len(),
            criteria = self.catalog().len(),
            "ranked roster snapshot"
        );
        Ok(ranked)
    }

    pub fn report(&self) -> Result<SelectionReport, SelectionServiceError> {
        let ranked = self.rank()?;
        let report = SelectionReport::new(ranked, self.catalog());
        info!(
            total = report.summary.total,
            passed = report.summary.passed,
            "selection report generated"
        );
        Ok(report)
    }
}

/// Error raised by the selection service.
#[derive(Debug, thiserror::Error)]
pub enum SelectionServiceError {
    #[error(transparent)]
    Rejected(#[from] CandidateRejection),
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}
