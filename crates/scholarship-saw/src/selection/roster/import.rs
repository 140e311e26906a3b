use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::selection::domain::{Candidate, CandidateId, CriterionId};

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    MissingColumn(&'static str),
    InvalidScore {
        row: usize,
        column: String,
        value: String,
    },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster file: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::Json(err) => write!(f, "invalid roster JSON data: {}", err),
            RosterImportError::MissingColumn(column) => {
                write!(f, "roster CSV is missing the '{}' column", column)
            }
            RosterImportError::InvalidScore { row, column, value } => write!(
                f,
                "row {}: score '{}' for {} is not a number",
                row, value, column
            ),
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::Json(err) => Some(err),
            RosterImportError::MissingColumn(_) | RosterImportError::InvalidScore { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for RosterImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Loads roster snapshots from CSV exports or JSON candidate arrays.
pub struct RosterImporter;

impl RosterImporter {
    /// Pick the format from the file extension; anything but `.json` is read as CSV.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Candidate>, RosterImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json_reader(file)
        } else {
            Self::from_csv_reader(file)
        }
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<Candidate>, RosterImportError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Header is `id,name,<criterion ids...>`; every extra column is read as a score.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<Candidate>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let id_column = column_index(&headers, "id")?;
        let name_column = column_index(&headers, "name")?;
        let score_columns: Vec<(usize, CriterionId)> = headers
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != id_column && *index != name_column)
            .map(|(index, header)| (index, CriterionId::new(header)))
            .collect();

        let mut candidates = Vec::new();
        for (offset, record) in csv_reader.records().enumerate() {
            let record = record?;
            // Header is line 1.
            let row = offset + 2;
            let mut scores = BTreeMap::new();

            for (index, criterion) in &score_columns {
                let raw = record.get(*index).unwrap_or_default();
                if raw.is_empty() {
                    continue;
                }
                let value = raw
                    .parse::<f64>()
                    .map_err(|_| RosterImportError::InvalidScore {
                        row,
                        column: criterion.to_string(),
                        value: raw.to_string(),
                    })?;
                scores.insert(criterion.clone(), value);
            }

            candidates.push(Candidate {
                id: CandidateId::new(record.get(id_column).unwrap_or_default()),
                name: record.get(name_column).unwrap_or_default().to_string(),
                scores,
            });
        }

        Ok(candidates)
    }
}

fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize, RosterImportError> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
        .ok_or(RosterImportError::MissingColumn(name))
}
