use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Short stable token identifying a criterion (e.g. `C1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriterionId(pub String);

impl CriterionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for roster candidates; stable across edits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl CandidateId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction in which a raw score is desirable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    /// Larger raw scores are better.
    Benefit,
    /// Smaller raw scores are better.
    Cost,
}

impl CriterionKind {
    pub const fn label(self) -> &'static str {
        match self {
            CriterionKind::Benefit => "benefit",
            CriterionKind::Cost => "cost",
        }
    }
}

/// One rubric step shown to reviewers when they pick a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricLevel {
    pub score: u8,
    pub description: String,
}

impl RubricLevel {
    pub fn new(score: u8, description: impl Into<String>) -> Self {
        Self {
            score,
            description: description.into(),
        }
    }
}

/// Weighted criterion from the catalog.
///
/// The rubric is display data only; scoring reads `id`, `weight`, and `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub name: String,
    pub weight: f64,
    #[serde(rename = "type")]
    pub kind: CriterionKind,
    #[serde(default)]
    pub rubric: Vec<RubricLevel>,
}

impl Criterion {
    /// Lowest and highest rubric score, if the rubric has any levels.
    pub fn score_range(&self) -> Option<(u8, u8)> {
        let min = self.rubric.iter().map(|level| level.score).min()?;
        let max = self.rubric.iter().map(|level| level.score).max()?;
        Some((min, max))
    }
}

/// Roster entry with one raw score per criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub scores: BTreeMap<CriterionId, f64>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CandidateId::new(id),
            name: name.into(),
            scores: BTreeMap::new(),
        }
    }

    pub fn with_score(mut self, criterion: impl Into<String>, score: f64) -> Self {
        self.scores.insert(CriterionId::new(criterion), score);
        self
    }

    pub fn score_for(&self, criterion: &CriterionId) -> Option<f64> {
        self.scores.get(criterion).copied()
    }
}

/// Editable fields of a candidate; the id is fixed once the candidate exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateDraft {
    pub name: String,
    pub scores: BTreeMap<CriterionId, f64>,
}

impl CandidateDraft {
    pub fn into_candidate(self, id: CandidateId) -> Candidate {
        Candidate {
            id,
            name: self.name,
            scores: self.scores,
        }
    }
}
