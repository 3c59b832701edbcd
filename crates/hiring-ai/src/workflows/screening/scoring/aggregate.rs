use super::config::ScoringConfig;
use super::{AtsScores, MatchScores};

/// Mean of the match sub-scores above zero. Zero-valued sub-scores are left out of both the
/// sum and the count, unlike [`ats_average`].
pub fn match_average(scores: &MatchScores) -> f64 {
    let positive: Vec<f64> = scores
        .values()
        .into_iter()
        .filter(|score| *score > 0.0)
        .collect();

    if positive.is_empty() {
        0.0
    } else {
        positive.iter().sum::<f64>() / positive.len() as f64
    }
}

/// Mean of all three ATS sub-scores, zeros included.
pub fn ats_average(scores: &AtsScores) -> f64 {
    let values = scores.values();
    values.iter().sum::<f64>() / values.len() as f64
}

/// Weighted blend of both averages, rounded to two decimals with ties going to even.
pub fn final_score(matching: &MatchScores, ats: &AtsScores, config: &ScoringConfig) -> f64 {
    round_to_hundredths(
        match_average(matching) * config.match_weight + ats_average(ats) * config.ats_weight,
    )
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
