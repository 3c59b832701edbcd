//! Application screening: résumé-to-posting fit scoring, hiring decisions, and the
//! transactional flow that records every scoring pass.

pub mod domain;
pub mod memory;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationSubmission, CandidateContact,
    CandidateProfile, EducationEntry, JobId, JobPosting, JobRequirements, ParsedResume, ScoreId,
};
pub use memory::InMemoryApplicationStore;
pub use repository::{
    ApplicationStore, PendingScore, RepositoryError, ScoreRecord, StoreTransaction,
};
pub use router::screening_router;
pub use scoring::{
    AtsScores, CandidateDecision, MatchScores, ScoreBreakdown, ScoringConfig, ScoringEngine,
    ScoringOutcome,
};
pub use service::{
    ApplicationFilter, ApplicationStats, ApplicationView, ScreeningService, ScreeningServiceError,
};
