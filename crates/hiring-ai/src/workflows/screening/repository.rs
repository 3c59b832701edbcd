use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicationId, ApplicationRecord, ApplicationStatus, JobId, JobPosting, ScoreId};
use super::scoring::{CandidateDecision, ScoreBreakdown, ScoringOutcome};

/// Immutable result of one scoring pass. Rescoring appends a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: ScoreId,
    pub application_id: ApplicationId,
    pub match_score: f64,
    pub ats_score: f64,
    pub final_score: f64,
    #[serde(flatten)]
    pub breakdown: ScoreBreakdown,
    pub details: BTreeMap<String, f64>,
    pub feedback: String,
    pub decision: CandidateDecision,
    pub created_at: DateTime<Utc>,
}

/// Score awaiting an identifier from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingScore {
    pub application_id: ApplicationId,
    pub outcome: ScoringOutcome,
    pub created_at: DateTime<Utc>,
}

impl PendingScore {
    pub fn into_record(self, id: ScoreId) -> ScoreRecord {
        let outcome = self.outcome;
        ScoreRecord {
            id,
            application_id: self.application_id,
            match_score: outcome.match_score,
            ats_score: outcome.ats_score,
            final_score: outcome.final_score,
            details: outcome.breakdown.details(),
            breakdown: outcome.breakdown,
            feedback: outcome.feedback,
            decision: outcome.decision,
            created_at: self.created_at,
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ApplicationStore: Send + Sync {
    /// Open a unit of work. Its writes become visible to others only on commit.
    fn begin(&self) -> Result<Box<dyn StoreTransaction + '_>, RepositoryError>;
}

/// Unit of work over jobs, applications, and score history.
///
/// Reads observe the transaction's own staged writes. Dropping it without calling
/// [`StoreTransaction::commit`] discards every staged write.
pub trait StoreTransaction {
    fn job(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError>;
    fn jobs(&self) -> Result<Vec<JobPosting>, RepositoryError>;
    fn insert_job(&mut self, job: JobPosting) -> Result<JobPosting, RepositoryError>;

    fn application(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn applications(&self) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    fn insert_application(
        &mut self,
        record: ApplicationRecord,
    ) -> Result<ApplicationRecord, RepositoryError>;
    fn update_status(
        &mut self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), RepositoryError>;
    /// Removes the application together with its score history.
    fn delete_application(&mut self, id: &ApplicationId) -> Result<(), RepositoryError>;

    fn insert_score(&mut self, score: PendingScore) -> Result<ScoreRecord, RepositoryError>;
    /// Score history for one application, oldest first.
    fn scores(&self, id: &ApplicationId) -> Result<Vec<ScoreRecord>, RepositoryError>;

    fn commit(self: Box<Self>) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
