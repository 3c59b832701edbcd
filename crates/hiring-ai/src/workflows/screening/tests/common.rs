use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::screening::domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationSubmission, CandidateContact,
    EducationEntry, JobId, JobPosting, ParsedResume,
};
use crate::workflows::screening::repository::{
    ApplicationStore, PendingScore, RepositoryError, ScoreRecord, StoreTransaction,
};
use crate::workflows::screening::{
    screening_router, InMemoryApplicationStore, ScoringConfig, ScreeningService,
};

pub(super) const JOB_ID: &str = "job-data-eng";

pub(super) fn job() -> JobPosting {
    JobPosting {
        id: JobId(JOB_ID.to_string()),
        title: "Data Engineer".to_string(),
        description: "Own the warehouse pipelines".to_string(),
        skills: vec!["Python".to_string(), "SQL".to_string()],
        certifications: Vec::new(),
        is_active: true,
    }
}

pub(super) fn resume() -> ParsedResume {
    ParsedResume {
        skills: vec!["python".to_string(), "java".to_string()],
        experience: Some(vec![
            json!({"company": "Acme", "title": "Analyst"}),
            json!({"company": "Globex", "title": "Engineer"}),
        ]),
        education: vec![EducationEntry::with_degree("Bachelor of Science")],
        certifications: vec!["AWS Certified Developer".to_string()],
    }
}

pub(super) fn submission() -> ApplicationSubmission {
    ApplicationSubmission {
        job_id: JobId(JOB_ID.to_string()),
        candidate: CandidateContact {
            full_name: "Jordan Reyes".to_string(),
            email: "jordan@example.com".to_string(),
        },
        resume_filename: "resume.pdf".to_string(),
        parsed: resume(),
    }
}

/// Strong enough to clear the default shortlist threshold.
pub(super) fn strong_submission() -> ApplicationSubmission {
    let mut submission = submission();
    submission.parsed.skills = (0..8)
        .map(|i| format!("tool-{i}"))
        .chain(["Python".to_string(), "SQL".to_string()])
        .collect();
    submission
}

/// Nothing parsed and an unreadable format: lands below the requalify threshold.
pub(super) fn empty_submission() -> ApplicationSubmission {
    let mut submission = submission();
    submission.resume_filename = "resume.txt".to_string();
    submission.parsed = ParsedResume::default();
    submission
}

pub(super) fn build_service() -> (
    ScreeningService<InMemoryApplicationStore>,
    Arc<InMemoryApplicationStore>,
) {
    let store = Arc::new(InMemoryApplicationStore::default());
    let service = ScreeningService::new(store.clone(), ScoringConfig::default());
    service.register_job(job()).expect("job registers");
    (service, store)
}

pub(super) fn stored_application(
    store: &InMemoryApplicationStore,
    id: &ApplicationId,
) -> ApplicationRecord {
    store
        .begin()
        .expect("store opens")
        .application(id)
        .expect("read succeeds")
        .expect("application present")
}

pub(super) fn stored_scores(store: &InMemoryApplicationStore, id: &ApplicationId) -> Vec<ScoreRecord> {
    store
        .begin()
        .expect("store opens")
        .scores(id)
        .expect("read succeeds")
}

pub(super) fn screening_router_with_service<S>(service: ScreeningService<S>) -> axum::Router
where
    S: ApplicationStore + 'static,
{
    screening_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Fault injected into a wrapped in-memory transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Fault {
    /// Jobs vanish, as if deleted after the application was filed.
    MissingJobs,
    /// Status updates fail after the score row has been staged.
    StatusWrite,
}

/// In-memory store whose transactions misbehave in one specific way.
pub(super) struct FaultyStore {
    pub(super) inner: InMemoryApplicationStore,
    pub(super) fault: Option<Fault>,
}

impl FaultyStore {
    pub(super) fn new(inner: InMemoryApplicationStore) -> Self {
        Self { inner, fault: None }
    }
}

impl ApplicationStore for FaultyStore {
    fn begin(&self) -> Result<Box<dyn StoreTransaction + '_>, RepositoryError> {
        Ok(Box::new(FaultyTransaction {
            inner: self.inner.begin()?,
            fault: self.fault,
        }))
    }
}

struct FaultyTransaction<'a> {
    inner: Box<dyn StoreTransaction + 'a>,
    fault: Option<Fault>,
}

impl StoreTransaction for FaultyTransaction<'_> {
    fn job(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        if self.fault == Some(Fault::MissingJobs) {
            return Ok(None);
        }
        self.inner.job(id)
    }

    fn jobs(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        self.inner.jobs()
    }

    fn insert_job(&mut self, job: JobPosting) -> Result<JobPosting, RepositoryError> {
        self.inner.insert_job(job)
    }

    fn application(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        self.inner.application(id)
    }

    fn applications(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.inner.applications()
    }

    fn insert_application(
        &mut self,
        record: ApplicationRecord,
    ) -> Result<ApplicationRecord, RepositoryError> {
        self.inner.insert_application(record)
    }

    fn update_status(
        &mut self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), RepositoryError> {
        if self.fault == Some(Fault::StatusWrite) {
            return Err(RepositoryError::Unavailable("status column locked".to_string()));
        }
        self.inner.update_status(id, status)
    }

    fn delete_application(&mut self, id: &ApplicationId) -> Result<(), RepositoryError> {
        self.inner.delete_application(id)
    }

    fn insert_score(&mut self, score: PendingScore) -> Result<ScoreRecord, RepositoryError> {
        self.inner.insert_score(score)
    }

    fn scores(&self, id: &ApplicationId) -> Result<Vec<ScoreRecord>, RepositoryError> {
        self.inner.scores(id)
    }

    fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        self.inner.commit()
    }
}

pub(super) struct UnavailableStore;

impl ApplicationStore for UnavailableStore {
    fn begin(&self) -> Result<Box<dyn StoreTransaction + '_>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
