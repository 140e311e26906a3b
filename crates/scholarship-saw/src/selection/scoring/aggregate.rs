use std::collections::BTreeMap;

use super::{NormalizedMatrix, ScoringError};
use crate::selection::catalog::CriteriaCatalog;
use crate::selection::domain::{CandidateId, CriterionId};

/// Aggregate SAW score per candidate.
pub type AggregateScores = BTreeMap<CandidateId, f64>;

/// Weighted sum of each matrix row, `V_i = Σ W_j × r_ij`.
///
/// An empty catalog scores every candidate `0.0`.
pub fn aggregate(
    matrix: &NormalizedMatrix,
    catalog: &CriteriaCatalog,
) -> Result<AggregateScores, ScoringError> {
    if matrix.is_empty() {
        return Err(ScoringError::EmptyRoster);
    }

    matrix
        .iter()
        .map(|(candidate, row)| {
            weighted_sum(candidate, row, catalog).map(|score| (candidate.clone(), score))
        })
        .collect()
}

/// Sums in catalog order so repeated runs are bit-identical.
pub(super) fn weighted_sum(
    candidate: &CandidateId,
    row: &BTreeMap<CriterionId, f64>,
    catalog: &CriteriaCatalog,
) -> Result<f64, ScoringError> {
    catalog.iter().try_fold(0.0, |total, criterion| {
        let value = row
            .get(&criterion.id)
            .ok_or_else(|| ScoringError::MissingScore {
                candidate: candidate.clone(),
                criterion: criterion.id.clone(),
            })?;
        Ok(total + criterion.weight * value)
    })
}
