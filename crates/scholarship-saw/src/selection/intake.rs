use super::catalog::CriteriaCatalog;
use super::domain::{Candidate, CriterionId};

/// Reasons a roster write is refused before it reaches the store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CandidateRejection {
    #[error("candidate id must not be blank")]
    BlankId,
    #[error("candidate name must not be blank")]
    BlankName,
    #[error("missing score for criterion {0}")]
    MissingScore(CriterionId),
    #[error("criterion {0} is not part of the catalog")]
    UnknownCriterion(CriterionId),
    #[error("score {value} for criterion {criterion} must be a whole number between {min} and {max}")]
    OutOfRubric {
        criterion: CriterionId,
        value: f64,
        min: u8,
        max: u8,
    },
}

/// Gatekeeper for candidates entering the roster.
///
/// Checks are stricter than scoring: the scoring stages accept any positive score,
/// while the roster only stores scores a reviewer could pick from the rubric.
#[derive(Debug, Clone, Default)]
pub struct CandidateIntake {
    catalog: CriteriaCatalog,
}

impl CandidateIntake {
    pub fn new(catalog: CriteriaCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CriteriaCatalog {
        &self.catalog
    }

    /// Trim display fields and check every score against the catalog.
    pub fn admit(&self, mut candidate: Candidate) -> Result<Candidate, CandidateRejection> {
        candidate.id.0 = candidate.id.0.trim().to_string();
        candidate.name = candidate.name.trim().to_string();

        if candidate.id.0.is_empty() {
            return Err(CandidateRejection::BlankId);
        }
        if candidate.name.is_empty() {
            return Err(CandidateRejection::BlankName);
        }

        if let Some(unknown) = candidate
            .scores
            .keys()
            .find(|criterion| !self.catalog.contains(criterion))
        {
            return Err(CandidateRejection::UnknownCriterion(unknown.clone()));
        }

        for criterion in &self.catalog {
            let value = candidate
                .score_for(&criterion.id)
                .ok_or_else(|| CandidateRejection::MissingScore(criterion.id.clone()))?;

            if let Some((min, max)) = criterion.score_range() {
                let whole = value.fract() == 0.0;
                if !whole || value < f64::from(min) || value > f64::from(max) {
                    return Err(CandidateRejection::OutOfRubric {
                        criterion: criterion.id.clone(),
                        value,
                        min,
                        max,
                    });
                }
            }
        }

        Ok(candidate)
    }
}
