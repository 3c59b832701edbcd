use serde::{Deserialize, Serialize};

use super::super::domain::ApplicationStatus;
use super::config::ScoringConfig;

/// Hiring decision derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateDecision {
    Shortlisted,
    RequalificationNeeded,
    Rejected,
}

impl CandidateDecision {
    /// Both thresholds are inclusive lower bounds.
    pub fn classify(final_score: f64, config: &ScoringConfig) -> Self {
        if final_score >= config.shortlist_threshold {
            CandidateDecision::Shortlisted
        } else if final_score >= config.requalify_threshold {
            CandidateDecision::RequalificationNeeded
        } else {
            CandidateDecision::Rejected
        }
    }

    /// Status written back to the application for this decision.
    pub const fn persisted_status(self) -> ApplicationStatus {
        match self {
            CandidateDecision::Shortlisted => ApplicationStatus::Shortlisted,
            CandidateDecision::RequalificationNeeded => ApplicationStatus::UnderReview,
            CandidateDecision::Rejected => ApplicationStatus::Rejected,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CandidateDecision::Shortlisted => "shortlisted",
            CandidateDecision::RequalificationNeeded => "requalification_needed",
            CandidateDecision::Rejected => "rejected",
        }
    }
}
