mod aggregate;
mod ats;
mod config;
pub mod feedback;
mod matching;
mod policy;

pub use aggregate::{ats_average, final_score, match_average};
pub use config::ScoringConfig;
pub use policy::CandidateDecision;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicationStatus, CandidateProfile, JobRequirements};

/// Stateless engine applying the configured weights and thresholds to one candidate.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, job: JobRequirements<'_>, candidate: CandidateProfile<'_>) -> ScoringOutcome {
        let breakdown = ScoreBreakdown {
            matching: matching::score_matches(job, candidate.resume),
            ats: ats::score_compatibility(candidate),
        };

        let final_score = final_score(&breakdown.matching, &breakdown.ats, &self.config);
        let decision = CandidateDecision::classify(final_score, &self.config);

        ScoringOutcome {
            match_score: match_average(&breakdown.matching),
            ats_score: ats_average(&breakdown.ats),
            final_score,
            decision,
            feedback: feedback::compose(&breakdown),
            breakdown,
        }
    }
}

/// Fit between posting requirements and the parsed résumé, each in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchScores {
    pub skills_match: f64,
    pub experience_match: f64,
    pub education_match: f64,
    pub certification_match: f64,
}

impl MatchScores {
    pub fn values(&self) -> [f64; 4] {
        [
            self.skills_match,
            self.experience_match,
            self.education_match,
            self.certification_match,
        ]
    }
}

/// Machine-readability heuristics for the résumé, each in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AtsScores {
    pub ats_format_score: f64,
    pub ats_keywords_score: f64,
    pub ats_structure_score: f64,
}

impl AtsScores {
    pub fn values(&self) -> [f64; 3] {
        [
            self.ats_format_score,
            self.ats_keywords_score,
            self.ats_structure_score,
        ]
    }
}

/// All seven sub-scores of one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(flatten)]
    pub matching: MatchScores,
    #[serde(flatten)]
    pub ats: AtsScores,
}

impl ScoreBreakdown {
    /// Sub-scores keyed by name, as exposed in the persisted `details` map.
    pub fn details(&self) -> BTreeMap<String, f64> {
        let matching = &self.matching;
        let ats = &self.ats;
        [
            ("skills_match", matching.skills_match),
            ("experience_match", matching.experience_match),
            ("education_match", matching.education_match),
            ("certification_match", matching.certification_match),
            ("ats_format_score", ats.ats_format_score),
            ("ats_keywords_score", ats.ats_keywords_score),
            ("ats_structure_score", ats.ats_structure_score),
        ]
        .into_iter()
        .map(|(name, score)| (name.to_string(), score))
        .collect()
    }
}

/// Everything one scoring pass produces, before it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringOutcome {
    pub breakdown: ScoreBreakdown,
    pub match_score: f64,
    pub ats_score: f64,
    pub final_score: f64,
    pub decision: CandidateDecision,
    pub feedback: String,
}

impl ScoringOutcome {
    pub fn status(&self) -> ApplicationStatus {
        self.decision.persisted_status()
    }
}
