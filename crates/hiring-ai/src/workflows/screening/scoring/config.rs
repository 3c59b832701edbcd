use serde::{Deserialize, Serialize};

/// Weights and decision thresholds applied by the scoring engine.
///
/// Values are taken as configured: weights need not sum to one and thresholds are not
/// range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub match_weight: f64,
    pub ats_weight: f64,
    pub shortlist_threshold: f64,
    pub requalify_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            match_weight: 0.5,
            ats_weight: 0.5,
            shortlist_threshold: 80.0,
            requalify_threshold: 60.0,
        }
    }
}
