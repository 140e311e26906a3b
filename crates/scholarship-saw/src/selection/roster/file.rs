use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::defaults::default_roster;
use super::repository::{
    apply_insert, apply_remove, apply_update, poisoned, RosterError, RosterRepository,
};
use crate::selection::domain::{Candidate, CandidateId};

/// On-disk layout of a persisted roster.
#[derive(Debug, Serialize, Deserialize)]
struct RosterDocument {
    saved_at: DateTime<Utc>,
    candidates: Vec<Candidate>,
}

/// Roster persisted to a JSON document after every mutation.
///
/// A missing file opens with the default roster; the document is written to a sibling
/// temp file and renamed into place so readers never observe a partial write.
#[derive(Debug)]
pub struct JsonFileRoster {
    path: PathBuf,
    candidates: Mutex<Vec<Candidate>>,
}

impl JsonFileRoster {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RosterError> {
        let path = path.into();
        let candidates = match fs::read(&path) {
            Ok(bytes) => {
                let document: RosterDocument =
                    serde_json::from_slice(&bytes).map_err(|source| RosterError::Corrupt {
                        path: path.clone(),
                        source,
                    })?;
                debug!(path = %path.display(), saved_at = %document.saved_at, "loaded roster");
                document.candidates
            }
            Err(err) if err.kind() == ErrorKind::NotFound => default_roster(),
            Err(source) => return Err(RosterError::Persistence { path, source }),
        };

        Ok(Self {
            path,
            candidates: Mutex::new(candidates),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, candidates: &[Candidate]) -> Result<(), RosterError> {
        let document = RosterDocument {
            saved_at: Utc::now(),
            candidates: candidates.to_vec(),
        };
        let bytes = serde_json::to_vec_pretty(&document).map_err(|source| RosterError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, bytes)
            .and_then(|_| fs::rename(&staging, &self.path))
            .map_err(|source| {
                // The staging file may never have been created.
                let _ = fs::remove_file(&staging);
                RosterError::Persistence {
                    path: self.path.clone(),
                    source,
                }
            })
    }

    /// Apply `edit` to a copy of the roster and commit it only once it is on disk.
    fn mutate<T>(
        &self,
        edit: impl FnOnce(&mut Vec<Candidate>) -> Result<T, RosterError>,
    ) -> Result<T, RosterError> {
        let mut guard = self.candidates.lock().map_err(|_| poisoned())?;
        let mut next = guard.clone();
        let outcome = edit(&mut next)?;
        self.persist(&next)?;
        *guard = next;
        Ok(outcome)
    }
}

impl RosterRepository for JsonFileRoster {
    fn snapshot(&self) -> Result<Vec<Candidate>, RosterError> {
        let guard = self.candidates.lock().map_err(|_| poisoned())?;
        Ok(guard.clone())
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<Candidate>, RosterError> {
        let guard = self.candidates.lock().map_err(|_| poisoned())?;
        Ok(guard.iter().find(|candidate| &candidate.id == id).cloned())
    }

    fn insert(&self, candidate: Candidate) -> Result<Candidate, RosterError> {
        self.mutate(|candidates| apply_insert(candidates, candidate))
    }

    fn update(&self, id: &CandidateId, candidate: Candidate) -> Result<Candidate, RosterError> {
        self.mutate(|candidates| apply_update(candidates, id, candidate))
    }

    fn remove(&self, id: &CandidateId) -> Result<Candidate, RosterError> {
        self.mutate(|candidates| apply_remove(candidates, id))
    }

    fn replace_all(&self, candidates: Vec<Candidate>) -> Result<(), RosterError> {
        self.mutate(|current| {
            *current = candidates;
            Ok(())
        })
    }
}
