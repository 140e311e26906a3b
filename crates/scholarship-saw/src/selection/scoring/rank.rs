use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::aggregate::weighted_sum;
use super::{normalize, ScoringError};
use crate::selection::catalog::CriteriaCatalog;
use crate::selection::domain::{Candidate, CriterionId};

/// Minimum aggregate score a candidate needs to pass.
pub const PASS_THRESHOLD: f64 = 0.70;

/// Candidate annotated with its normalized row, SAW score, and placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub normalized_scores: BTreeMap<CriterionId, f64>,
    pub aggregate_score: f64,
    pub rank: usize,
    pub passed: bool,
}

/// Exact comparison against [`PASS_THRESHOLD`]; no tolerance band.
pub fn passes_threshold(score: f64) -> bool {
    score >= PASS_THRESHOLD
}

/// Normalize, aggregate, and order a roster snapshot.
///
/// Ranks are positions in the sorted sequence. Equal scores keep their roster order
/// and still receive distinct, consecutive ranks.
pub fn rank(
    roster: &[Candidate],
    catalog: &CriteriaCatalog,
) -> Result<Vec<RankedCandidate>, ScoringError> {
    let mut rows = normalize(roster, catalog)?.into_rows();

    let mut ranked = Vec::with_capacity(roster.len());
    for candidate in roster {
        let normalized_scores = rows.remove(&candidate.id).unwrap_or_default();
        let aggregate_score = weighted_sum(&candidate.id, &normalized_scores, catalog)?;
        ranked.push(RankedCandidate {
            candidate: candidate.clone(),
            normalized_scores,
            aggregate_score,
            rank: 0,
            passed: false,
        });
    }

    // `sort_by` is stable, which keeps tied candidates in roster order.
    ranked.sort_by(|a, b| b.aggregate_score.total_cmp(&a.aggregate_score));

    for (position, entry) in ranked.iter_mut().enumerate() {
        entry.rank = position + 1;
        entry.passed = passes_threshold(entry.aggregate_score);
    }

    Ok(ranked)
}
