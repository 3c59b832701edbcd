use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{ApplicationId, ApplicationRecord, ApplicationStatus, JobId, JobPosting, ScoreId};
use super::repository::{
    ApplicationStore, PendingScore, RepositoryError, ScoreRecord, StoreTransaction,
};

#[derive(Debug, Clone, Default)]
struct StoreState {
    jobs: BTreeMap<JobId, JobPosting>,
    applications: BTreeMap<ApplicationId, ApplicationRecord>,
    scores: Vec<ScoreRecord>,
    last_score_id: u64,
}

/// Process-local store. Transactions are serialized: each one holds the lock until it is
/// committed or dropped and works on a private copy of the state.
#[derive(Debug, Default, Clone)]
pub struct InMemoryApplicationStore {
    state: Arc<Mutex<StoreState>>,
}

impl ApplicationStore for InMemoryApplicationStore {
    fn begin(&self) -> Result<Box<dyn StoreTransaction + '_>, RepositoryError> {
        let guard = self
            .state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))?;
        let working = guard.clone();
        Ok(Box::new(MemoryTransaction { guard, working }))
    }
}

struct MemoryTransaction<'a> {
    guard: MutexGuard<'a, StoreState>,
    working: StoreState,
}

impl StoreTransaction for MemoryTransaction<'_> {
    fn job(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        Ok(self.working.jobs.get(id).cloned())
    }

    fn jobs(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        Ok(self.working.jobs.values().cloned().collect())
    }

    fn insert_job(&mut self, job: JobPosting) -> Result<JobPosting, RepositoryError> {
        if self.working.jobs.contains_key(&job.id) {
            return Err(RepositoryError::Conflict);
        }
        self.working.jobs.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn application(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(self.working.applications.get(id).cloned())
    }

    fn applications(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(self.working.applications.values().cloned().collect())
    }

    fn insert_application(
        &mut self,
        record: ApplicationRecord,
    ) -> Result<ApplicationRecord, RepositoryError> {
        if self.working.applications.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        if !self.working.jobs.contains_key(&record.job_id) {
            return Err(RepositoryError::NotFound);
        }
        self.working
            .applications
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update_status(
        &mut self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), RepositoryError> {
        let record = self
            .working
            .applications
            .get_mut(id)
            .ok_or(RepositoryError::NotFound)?;
        record.status = status;
        Ok(())
    }

    fn delete_application(&mut self, id: &ApplicationId) -> Result<(), RepositoryError> {
        self.working
            .applications
            .remove(id)
            .ok_or(RepositoryError::NotFound)?;
        self.working
            .scores
            .retain(|score| &score.application_id != id);
        Ok(())
    }

    fn insert_score(&mut self, score: PendingScore) -> Result<ScoreRecord, RepositoryError> {
        if !self.working.applications.contains_key(&score.application_id) {
            return Err(RepositoryError::NotFound);
        }
        self.working.last_score_id += 1;
        let record = score.into_record(ScoreId(self.working.last_score_id));
        self.working.scores.push(record.clone());
        Ok(record)
    }

    fn scores(&self, id: &ApplicationId) -> Result<Vec<ScoreRecord>, RepositoryError> {
        Ok(self
            .working
            .scores
            .iter()
            .filter(|score| &score.application_id == id)
            .cloned()
            .collect())
    }

    fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        let MemoryTransaction { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}
