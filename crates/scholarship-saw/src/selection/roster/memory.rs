use std::sync::{Arc, Mutex};

use super::defaults::default_roster;
use super::repository::{
    apply_insert, apply_remove, apply_update, poisoned, RosterError, RosterRepository,
};
use crate::selection::domain::{Candidate, CandidateId};

/// Process-local roster guarded by a mutex.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRoster {
    candidates: Arc<Mutex<Vec<Candidate>>>,
}

impl InMemoryRoster {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates: Arc::new(Mutex::new(candidates)),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(default_roster())
    }
}

impl RosterRepository for InMemoryRoster {
    fn snapshot(&self) -> Result<Vec<Candidate>, RosterError> {
        let guard = self.candidates.lock().map_err(|_| poisoned())?;
        Ok(guard.clone())
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<Candidate>, RosterError> {
        let guard = self.candidates.lock().map_err(|_| poisoned())?;
        Ok(guard.iter().find(|candidate| &candidate.id == id).cloned())
    }

    fn insert(&self, candidate: Candidate) -> Result<Candidate, RosterError> {
        let mut guard = self.candidates.lock().map_err(|_| poisoned())?;
        apply_insert(&mut guard, candidate)
    }

    fn update(&self, id: &CandidateId, candidate: Candidate) -> Result<Candidate, RosterError> {
        let mut guard = self.candidates.lock().map_err(|_| poisoned())?;
        apply_update(&mut guard, id, candidate)
    }

    fn remove(&self, id: &CandidateId) -> Result<Candidate, RosterError> {
        let mut guard = self.candidates.lock().map_err(|_| poisoned())?;
        apply_remove(&mut guard, id)
    }

    fn replace_all(&self, candidates: Vec<Candidate>) -> Result<(), RosterError> {
        let mut guard = self.candidates.lock().map_err(|_| poisoned())?;
        *guard = candidates;
        Ok(())
    }
}
