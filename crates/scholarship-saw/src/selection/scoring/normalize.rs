use std::collections::BTreeMap;

use super::{ensure_roster, NormalizedMatrix, ScoringError};
use crate::selection::catalog::CriteriaCatalog;
use crate::selection::domain::{Candidate, Criterion, CriterionKind};

/// Build the normalized decision matrix for a roster snapshot.
///
/// Benefit columns divide by the column maximum, cost columns divide the column
/// minimum by each value. A column where everyone scored the same therefore
/// normalizes to exactly `1.0` regardless of its kind.
///
/// Values stay strictly positive only while a column's `min / max` ratio is
/// representable as an `f64`; columns spanning beyond roughly 300 orders of
/// magnitude underflow to `0.0`. Rubric scores are nowhere near that limit.
pub fn normalize(
    roster: &[Candidate],
    catalog: &CriteriaCatalog,
) -> Result<NormalizedMatrix, ScoringError> {
    ensure_roster(roster)?;

    let mut rows: BTreeMap<_, BTreeMap<_, f64>> = roster
        .iter()
        .map(|candidate| (candidate.id.clone(), BTreeMap::new()))
        .collect();

    for criterion in catalog {
        let column = raw_column(roster, criterion)?;
        let (min, max) = column_bounds(&column);

        for (candidate, raw) in roster.iter().zip(column) {
            let value = match criterion.kind {
                CriterionKind::Benefit => raw / max,
                CriterionKind::Cost => min / raw,
            };
            rows.entry(candidate.id.clone())
                .or_default()
                .insert(criterion.id.clone(), value);
        }
    }

    Ok(NormalizedMatrix { rows })
}

/// Raw scores for one criterion in roster order; rejects gaps and non-positive values.
fn raw_column(roster: &[Candidate], criterion: &Criterion) -> Result<Vec<f64>, ScoringError> {
    roster
        .iter()
        .map(|candidate| {
            let value =
                candidate
                    .score_for(&criterion.id)
                    .ok_or_else(|| ScoringError::MissingScore {
                        candidate: candidate.id.clone(),
                        criterion: criterion.id.clone(),
                    })?;

            if value.is_finite() && value > 0.0 {
                Ok(value)
            } else {
                Err(ScoringError::InvalidScore {
                    candidate: candidate.id.clone(),
                    criterion: criterion.id.clone(),
                    value,
                })
            }
        })
        .collect()
}

fn column_bounds(column: &[f64]) -> (f64, f64) {
    column
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &value| {
            (min.min(value), max.max(value))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::domain::{CandidateId, CriterionId};

    fn catalog(kinds: &[(&str, CriterionKind)]) -> CriteriaCatalog {
        let criteria = kinds
            .iter()
            .map(|(id, kind)| Criterion {
                id: CriterionId::new(*id),
                name: id.to_string(),
                weight: 1.0 / kinds.len() as f64,
                kind: *kind,
                rubric: Vec::new(),
            })
            .collect();
        CriteriaCatalog::new(criteria).expect("valid catalog")
    }

    #[test]
    fn benefit_divides_by_column_max() {
        let catalog = catalog(&[("C1", CriterionKind::Benefit)]);
        let roster = vec![
            Candidate::new("A", "A").with_score("C1", 4.0),
            Candidate::new("B", "B").with_score("C1", 2.0),
        ];

        let matrix = normalize(&roster, &catalog).expect("normalizes");
        let c1 = CriterionId::new("C1");

        assert_eq!(matrix.value(&CandidateId::new("A"), &c1), Some(1.0));
        assert_eq!(matrix.value(&CandidateId::new("B"), &c1), Some(0.5));
    }

    #[test]
    fn cost_divides_column_min_by_value() {
        let catalog = catalog(&[("C2", CriterionKind::Cost)]);
        let roster = vec![
            Candidate::new("A", "A").with_score("C2", 2.0),
            Candidate::new("B", "B").with_score("C2", 5.0),
        ];

        let matrix = normalize(&roster, &catalog).expect("normalizes");
        let c2 = CriterionId::new("C2");

        assert_eq!(matrix.value(&CandidateId::new("A"), &c2), Some(1.0));
        assert_eq!(matrix.value(&CandidateId::new("B"), &c2), Some(0.4));
    }

    #[test]
    fn column_bounds_cover_every_value() {
        assert_eq!(column_bounds(&[3.0, 1.0, 5.0, 2.0]), (1.0, 5.0));
        assert_eq!(column_bounds(&[4.0]), (4.0, 4.0));
    }

    #[test]
    fn zero_and_non_finite_scores_are_rejected() {
        let catalog = catalog(&[("C1", CriterionKind::Cost)]);
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let roster = vec![
                Candidate::new("A", "A").with_score("C1", 3.0),
                Candidate::new("B", "B").with_score("C1", bad),
            ];

            match normalize(&roster, &catalog) {
                Err(ScoringError::InvalidScore {
                    candidate,
                    criterion,
                    ..
                }) => {
                    assert_eq!(candidate.as_str(), "B");
                    assert_eq!(criterion.as_str(), "C1");
                }
                other => panic!("expected invalid score for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn all_zero_benefit_column_is_rejected_at_first_candidate() {
        let catalog = catalog(&[("C1", CriterionKind::Benefit)]);
        let roster = vec![
            Candidate::new("A", "A").with_score("C1", 0.0),
            Candidate::new("B", "B").with_score("C1", 0.0),
        ];

        match normalize(&roster, &catalog) {
            Err(ScoringError::InvalidScore {
                candidate,
                criterion,
                value,
            }) => {
                assert_eq!(candidate.as_str(), "A");
                assert_eq!(criterion.as_str(), "C1");
                assert_eq!(value, 0.0);
            }
            other => panic!("expected invalid score, got {other:?}"),
        }
    }

    #[test]
    fn wide_but_representable_columns_stay_positive() {
        let catalog = catalog(&[
            ("C1", CriterionKind::Benefit),
            ("C2", CriterionKind::Cost),
        ]);
        let roster = vec![
            Candidate::new("A", "A")
                .with_score("C1", 1e-150)
                .with_score("C2", 1e150),
            Candidate::new("B", "B")
                .with_score("C1", 1e150)
                .with_score("C2", 1e-150),
        ];

        let matrix = normalize(&roster, &catalog).expect("normalizes");
        let row = matrix.row(&CandidateId::new("A")).expect("row for A");

        assert!(row.values().all(|value| *value > 0.0 && *value < 1e-250));
        assert!(matrix
            .row(&CandidateId::new("B"))
            .expect("row for B")
            .values()
            .all(|value| *value == 1.0));
    }

    #[test]
    fn first_violation_follows_catalog_then_roster_order() {
        let catalog = catalog(&[
            ("C1", CriterionKind::Benefit),
            ("C2", CriterionKind::Benefit),
        ]);
        let roster = vec![
            Candidate::new("A", "A").with_score("C1", 3.0),
            Candidate::new("B", "B").with_score("C1", 0.0).with_score("C2", 2.0),
        ];

        let err = normalize(&roster, &catalog).expect_err("invalid input");
        assert!(matches!(err, ScoringError::InvalidScore { ref candidate, .. } if candidate.as_str() == "B"));
    }

    #[test]
    fn empty_catalog_yields_empty_rows() {
        let roster = vec![Candidate::new("A", "A")];
        let matrix = normalize(&roster, &CriteriaCatalog::empty()).expect("normalizes");

        assert_eq!(matrix.len(), 1);
        assert!(matrix
            .row(&CandidateId::new("A"))
            .expect("row present")
            .is_empty());
    }
}
