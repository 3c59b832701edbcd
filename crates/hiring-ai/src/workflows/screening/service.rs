use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationSubmission, JobId, JobPosting,
};
use super::repository::{ApplicationStore, PendingScore, RepositoryError, ScoreRecord};
use super::scoring::{ScoringConfig, ScoringEngine};

/// Service composing the store and the scoring engine.
pub struct ScreeningService<S> {
    store: Arc<S>,
    engine: Arc<ScoringEngine>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<S> ScreeningService<S>
where
    S: ApplicationStore + 'static,
{
    pub fn new(store: Arc<S>, config: ScoringConfig) -> Self {
        Self {
            store,
            engine: Arc::new(ScoringEngine::new(config)),
        }
    }

    pub fn register_job(&self, job: JobPosting) -> Result<JobPosting, ScreeningServiceError> {
        let mut tx = self.store.begin()?;
        let stored = tx.insert_job(job)?;
        tx.commit()?;
        info!(job_id = %stored.id, "job registered");
        Ok(stored)
    }

    pub fn jobs(&self) -> Result<Vec<JobPosting>, ScreeningServiceError> {
        let tx = self.store.begin()?;
        Ok(tx.jobs()?)
    }

    /// Record a parsed application against an active job, then score it.
    ///
    /// The application is committed before scoring starts. A scoring failure is logged and
    /// leaves the application in `submitted`; it does not fail the submission.
    pub fn submit(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<ApplicationView, ScreeningServiceError> {
        let application_id = {
            let mut tx = self.store.begin()?;
            let job_is_open = tx
                .job(&submission.job_id)?
                .map(|job| job.is_active)
                .unwrap_or(false);
            if !job_is_open {
                return Err(ScreeningServiceError::JobNotFound {
                    job_id: submission.job_id,
                });
            }

            let record = ApplicationRecord {
                id: next_application_id(),
                job_id: submission.job_id,
                candidate: submission.candidate,
                resume_filename: submission.resume_filename,
                parsed: submission.parsed,
                status: ApplicationStatus::Submitted,
                submitted_at: Utc::now(),
            };
            let stored = tx.insert_application(record)?;
            tx.commit()?;
            stored.id
        };

        info!(%application_id, "application submitted");

        if let Err(err) = self.score(&application_id) {
            warn!(%application_id, error = %err, "application stored without a score");
        }

        self.get(&application_id)
    }

    /// Score an application and persist the result as a new history entry.
    ///
    /// Loading, the score insert, and the status update share one transaction; on any
    /// failure nothing is written.
    pub fn score(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ScoreRecord, ScreeningServiceError> {
        self.score_within_transaction(application_id)
            .map_err(|err| {
                error!(%application_id, error = %err, "scoring failed, changes rolled back");
                err
            })
    }

    fn score_within_transaction(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ScoreRecord, ScreeningServiceError> {
        let mut tx = self.store.begin()?;

        let application = tx.application(application_id)?.ok_or_else(|| {
            ScreeningServiceError::ApplicationNotFound {
                application_id: application_id.clone(),
            }
        })?;
        let job = tx
            .job(&application.job_id)?
            .ok_or_else(|| ScreeningServiceError::JobNotFound {
                job_id: application.job_id.clone(),
            })?;

        let outcome = self
            .engine
            .score(job.requirements(), application.scoring_view());
        let status = outcome.status();

        let record = tx.insert_score(PendingScore {
            application_id: application_id.clone(),
            outcome,
            created_at: Utc::now(),
        })?;
        tx.update_status(application_id, status)?;
        tx.commit()?;

        info!(
            %application_id,
            final_score = record.final_score,
            decision = record.decision.label(),
            %status,
            "application scored"
        );
        Ok(record)
    }

    /// Fetch an application with its most recent score.
    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationView, ScreeningServiceError> {
        let tx = self.store.begin()?;
        let application = tx.application(application_id)?.ok_or_else(|| {
            ScreeningServiceError::ApplicationNotFound {
                application_id: application_id.clone(),
            }
        })?;
        let latest_score = tx.scores(application_id)?.pop();
        Ok(ApplicationView {
            application,
            latest_score,
        })
    }

    /// Every score recorded for an application, oldest first.
    pub fn score_history(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<ScoreRecord>, ScreeningServiceError> {
        let tx = self.store.begin()?;
        if tx.application(application_id)?.is_none() {
            return Err(ScreeningServiceError::ApplicationNotFound {
                application_id: application_id.clone(),
            });
        }
        Ok(tx.scores(application_id)?)
    }

    pub fn list(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<Vec<ApplicationView>, ScreeningServiceError> {
        let tx = self.store.begin()?;
        let mut views = Vec::new();
        for application in tx.applications()? {
            if !filter.matches(&application) {
                continue;
            }
            let latest_score = tx.scores(&application.id)?.pop();
            views.push(ApplicationView {
                application,
                latest_score,
            });
        }
        Ok(views)
    }

    /// Reviewer override of the persisted status. Score history is left untouched.
    pub fn update_status(
        &self,
        application_id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<ApplicationView, ScreeningServiceError> {
        {
            let mut tx = self.store.begin()?;
            if tx.application(application_id)?.is_none() {
                return Err(ScreeningServiceError::ApplicationNotFound {
                    application_id: application_id.clone(),
                });
            }
            tx.update_status(application_id, status)?;
            tx.commit()?;
        }
        info!(%application_id, %status, "application status overridden");
        self.get(application_id)
    }

    /// Remove an application and its score history.
    pub fn delete(&self, application_id: &ApplicationId) -> Result<(), ScreeningServiceError> {
        let mut tx = self.store.begin()?;
        match tx.delete_application(application_id) {
            Err(RepositoryError::NotFound) => {
                return Err(ScreeningServiceError::ApplicationNotFound {
                    application_id: application_id.clone(),
                })
            }
            other => other?,
        }
        tx.commit()?;
        info!(%application_id, "application deleted");
        Ok(())
    }

    pub fn stats(&self) -> Result<ApplicationStats, ScreeningServiceError> {
        let tx = self.store.begin()?;
        let applications = tx.applications()?;

        let mut by_status: BTreeMap<String, usize> = [
            ApplicationStatus::Submitted,
            ApplicationStatus::UnderReview,
            ApplicationStatus::Shortlisted,
            ApplicationStatus::Rejected,
        ]
        .into_iter()
        .map(|status| (status.label().to_string(), 0))
        .collect();
        let mut by_job: BTreeMap<String, usize> = tx
            .jobs()?
            .into_iter()
            .map(|job| (job.id.0, 0))
            .collect();

        for application in &applications {
            if let Some(count) = by_status.get_mut(application.status.label()) {
                *count += 1;
            }
            *by_job.entry(application.job_id.0.clone()).or_insert(0) += 1;
        }

        let count_of = |status: ApplicationStatus| {
            applications
                .iter()
                .filter(|application| application.status == status)
                .count()
        };

        Ok(ApplicationStats {
            total_applications: applications.len(),
            shortlisted_candidates: count_of(ApplicationStatus::Shortlisted),
            rejected_candidates: count_of(ApplicationStatus::Rejected),
            under_review: count_of(ApplicationStatus::UnderReview),
            by_job,
            by_status,
        })
    }
}

/// Application together with its latest score, as returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
    #[serde(flatten)]
    pub application: ApplicationRecord,
    pub latest_score: Option<ScoreRecord>,
}

/// Optional listing filters; unset fields match everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
    pub job_id: Option<JobId>,
}

impl ApplicationFilter {
    fn matches(&self, application: &ApplicationRecord) -> bool {
        self.status.map_or(true, |status| application.status == status)
            && self
                .job_id
                .as_ref()
                .map_or(true, |job_id| &application.job_id == job_id)
    }
}

/// Pipeline counters for dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationStats {
    pub total_applications: usize,
    pub shortlisted_candidates: usize,
    pub rejected_candidates: usize,
    pub under_review: usize,
    pub by_job: BTreeMap<String, usize>,
    pub by_status: BTreeMap<String, usize>,
}

/// Error raised by the screening service.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningServiceError {
    #[error("job {job_id} not found")]
    JobNotFound { job_id: JobId },
    #[error("application {application_id} not found")]
    ApplicationNotFound { application_id: ApplicationId },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ScreeningServiceError {
    /// True when the failure is a missing job or application rather than a storage fault.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            ScreeningServiceError::JobNotFound { .. }
                | ScreeningServiceError::ApplicationNotFound { .. }
                | ScreeningServiceError::Repository(RepositoryError::NotFound)
        )
    }
}
