use crate::selection::domain::Candidate;

const DEFAULT_CANDIDATES: [(&str, &str, [f64; 5]); 10] = [
    ("S001", "Alice Johnson", [5.0, 4.0, 4.0, 5.0, 3.0]),
    ("S002", "Bob Smith", [4.0, 5.0, 3.0, 4.0, 4.0]),
    ("S003", "Carol Williams", [3.0, 3.0, 5.0, 3.0, 2.0]),
    ("S004", "David Brown", [5.0, 2.0, 4.0, 4.0, 5.0]),
    ("S005", "Eva Martinez", [4.0, 4.0, 3.0, 5.0, 3.0]),
    ("S006", "Frank Lee", [3.0, 5.0, 2.0, 3.0, 4.0]),
    ("S007", "Grace Kim", [5.0, 3.0, 5.0, 4.0, 2.0]),
    ("S008", "Henry Chen", [4.0, 4.0, 4.0, 3.0, 3.0]),
    ("S009", "Iris Patel", [2.0, 5.0, 3.0, 4.0, 5.0]),
    ("S010", "Jack Wilson", [5.0, 3.0, 4.0, 5.0, 4.0]),
];

/// Roster a store falls back to on first start and on reset.
pub fn default_roster() -> Vec<Candidate> {
    DEFAULT_CANDIDATES
        .iter()
        .map(|(id, name, scores)| {
            ["C1", "C2", "C3", "C4", "C5"]
                .into_iter()
                .zip(scores.iter().copied())
                .fold(Candidate::new(*id, *name), |candidate, (criterion, score)| {
                    candidate.with_score(criterion, score)
                })
        })
        .collect()
}
