use chrono::{DateTime, Utc};
use serde::Serialize;

use super::catalog::CriteriaCatalog;
use super::scoring::{RankedCandidate, PASS_THRESHOLD};

/// Ranked roster plus the headline statistics shown to the selection committee.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionReport {
    pub generated_at: DateTime<Utc>,
    pub threshold: f64,
    pub candidates: Vec<RankedCandidate>,
    pub summary: SelectionSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Share of candidates that passed, in `[0, 1]`.
    pub pass_rate: f64,
    pub average_score: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
    pub total_weight: f64,
}

impl SelectionSummary {
    pub fn from_ranked(ranked: &[RankedCandidate], catalog: &CriteriaCatalog) -> Self {
        let total = ranked.len();
        let passed = ranked.iter().filter(|entry| entry.passed).count();
        let scores = ranked.iter().map(|entry| entry.aggregate_score);

        let (sum, highest, lowest) = scores.fold(
            (0.0, f64::NEG_INFINITY, f64::INFINITY),
            |(sum, highest, lowest): (f64, f64, f64), score| {
                (sum + score, highest.max(score), lowest.min(score))
            },
        );

        let (pass_rate, average_score, highest_score, lowest_score) = if total == 0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let count = total as f64;
            (passed as f64 / count, sum / count, highest, lowest)
        };

        Self {
            total,
            passed,
            failed: total - passed,
            pass_rate,
            average_score,
            highest_score,
            lowest_score,
            total_weight: catalog.total_weight(),
        }
    }
}

impl SelectionReport {
    pub fn new(candidates: Vec<RankedCandidate>, catalog: &CriteriaCatalog) -> Self {
        let summary = SelectionSummary::from_ranked(&candidates, catalog);
        Self {
            generated_at: Utc::now(),
            threshold: PASS_THRESHOLD,
            candidates,
            summary,
        }
    }

    /// The first `count` candidates in rank order.
    pub fn leaders(&self, count: usize) -> &[RankedCandidate] {
        &self.candidates[..count.min(self.candidates.len())]
    }

    /// Passing candidates in rank order.
    pub fn recipients(&self) -> impl Iterator<Item = &RankedCandidate> {
        self.candidates.iter().filter(|entry| entry.passed)
    }
}
