use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::domain::{Criterion, CriterionId, CriterionKind, RubricLevel};

/// Validation errors raised while assembling a criteria catalog.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("criterion {0} is defined more than once")]
    DuplicateCriterion(CriterionId),
    #[error("criterion {criterion} has weight {weight}; weights must be within (0, 1]")]
    InvalidWeight { criterion: CriterionId, weight: f64 },
}

/// Ordered, read-only list of criteria the scoring engine iterates over.
///
/// Weights are expected to total 1.0 but the sum is reported, not enforced.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Criterion>", into = "Vec<Criterion>")]
pub struct CriteriaCatalog {
    criteria: Vec<Criterion>,
}

impl CriteriaCatalog {
    pub fn new(criteria: Vec<Criterion>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(criteria.len());
        for criterion in &criteria {
            if !seen.insert(&criterion.id) {
                return Err(CatalogError::DuplicateCriterion(criterion.id.clone()));
            }
            if !(criterion.weight.is_finite() && criterion.weight > 0.0 && criterion.weight <= 1.0)
            {
                return Err(CatalogError::InvalidWeight {
                    criterion: criterion.id.clone(),
                    weight: criterion.weight,
                });
            }
        }

        Ok(Self { criteria })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Scholarship catalog used by the selection committee.
    pub fn standard() -> Self {
        let criteria = vec![
            criterion(
                "C1",
                "Academic Performance (GPA)",
                0.30,
                CriterionKind::Benefit,
                [
                    "GPA < 2.0",
                    "GPA 2.0 - 2.49",
                    "GPA 2.5 - 2.99",
                    "GPA 3.0 - 3.49",
                    "GPA ≥ 3.5",
                ],
            ),
            criterion(
                "C2",
                "Family Income",
                0.25,
                CriterionKind::Cost,
                [
                    "> $100,000/year",
                    "$75,000 - $100,000/year",
                    "$50,000 - $74,999/year",
                    "$25,000 - $49,999/year",
                    "< $25,000/year",
                ],
            ),
            criterion(
                "C3",
                "Extracurricular Activities",
                0.15,
                CriterionKind::Benefit,
                [
                    "No participation",
                    "1-2 activities",
                    "3-4 activities",
                    "5-6 activities with leadership",
                    "7+ activities with significant leadership",
                ],
            ),
            criterion(
                "C4",
                "Community Service Hours",
                0.15,
                CriterionKind::Benefit,
                [
                    "0-10 hours",
                    "11-25 hours",
                    "26-50 hours",
                    "51-100 hours",
                    "> 100 hours",
                ],
            ),
            criterion(
                "C5",
                "Distance from Campus",
                0.15,
                CriterionKind::Cost,
                ["< 5 km", "5-15 km", "16-30 km", "31-50 km", "> 50 km"],
            ),
        ];

        Self { criteria }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Criterion> {
        self.criteria.iter()
    }

    pub fn as_slice(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn get(&self, id: &CriterionId) -> Option<&Criterion> {
        self.criteria.iter().find(|criterion| &criterion.id == id)
    }

    pub fn contains(&self, id: &CriterionId) -> bool {
        self.get(id).is_some()
    }

    /// Sum of weights in catalog order.
    pub fn total_weight(&self) -> f64 {
        self.criteria.iter().map(|criterion| criterion.weight).sum()
    }
}

impl TryFrom<Vec<Criterion>> for CriteriaCatalog {
    type Error = CatalogError;

    fn try_from(criteria: Vec<Criterion>) -> Result<Self, Self::Error> {
        Self::new(criteria)
    }
}

impl From<CriteriaCatalog> for Vec<Criterion> {
    fn from(catalog: CriteriaCatalog) -> Self {
        catalog.criteria
    }
}

impl<'a> IntoIterator for &'a CriteriaCatalog {
    type Item = &'a Criterion;
    type IntoIter = std::slice::Iter<'a, Criterion>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn criterion(
    id: &str,
    name: &str,
    weight: f64,
    kind: CriterionKind,
    levels: [&str; 5],
) -> Criterion {
    let rubric = levels
        .into_iter()
        .zip(1u8..)
        .map(|(description, score)| RubricLevel::new(score, description))
        .collect();

    Criterion {
        id: CriterionId::new(id),
        name: name.to_string(),
        weight,
        kind,
        rubric,
    }
}
