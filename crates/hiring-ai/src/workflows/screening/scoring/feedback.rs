use super::aggregate::ats_average;
use super::ScoreBreakdown;

/// Metric a feedback clause is selected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackMetric {
    Skills,
    Experience,
    AtsReadiness,
}

struct FeedbackRule {
    metric: FeedbackMetric,
    floor: f64,
    message: &'static str,
}

// Rules per metric are ordered by descending floor; the first floor the score reaches wins.
const FEEDBACK_RULES: [FeedbackRule; 8] = [
    FeedbackRule {
        metric: FeedbackMetric::Skills,
        floor: 70.0,
        message: "Strong skill match with job requirements.",
    },
    FeedbackRule {
        metric: FeedbackMetric::Skills,
        floor: 40.0,
        message: "Good skill alignment with some areas for improvement.",
    },
    FeedbackRule {
        metric: FeedbackMetric::Skills,
        floor: f64::NEG_INFINITY,
        message: "Limited skill match with job requirements.",
    },
    FeedbackRule {
        metric: FeedbackMetric::Experience,
        floor: 70.0,
        message: "Relevant work experience aligns well with the role.",
    },
    FeedbackRule {
        metric: FeedbackMetric::Experience,
        floor: 40.0,
        message: "Some relevant experience, but could benefit from more exposure.",
    },
    FeedbackRule {
        metric: FeedbackMetric::Experience,
        floor: f64::NEG_INFINITY,
        message: "Limited relevant work experience for this role.",
    },
    FeedbackRule {
        metric: FeedbackMetric::AtsReadiness,
        floor: 70.0,
        message: "Resume is well-formatted for ATS systems.",
    },
    FeedbackRule {
        metric: FeedbackMetric::AtsReadiness,
        floor: f64::NEG_INFINITY,
        message: "Resume could be better optimized for ATS systems.",
    },
];

/// Message for `score` within the bands of `metric`.
pub fn message_for(metric: FeedbackMetric, score: f64) -> &'static str {
    let mut lowest = "";
    for rule in FEEDBACK_RULES.iter().filter(|rule| rule.metric == metric) {
        if score >= rule.floor {
            return rule.message;
        }
        lowest = rule.message;
    }
    // NaN never reaches a floor.
    lowest
}

/// Skills, experience, and ATS clauses joined by single spaces.
pub fn compose(breakdown: &ScoreBreakdown) -> String {
    [
        message_for(FeedbackMetric::Skills, breakdown.matching.skills_match),
        message_for(FeedbackMetric::Experience, breakdown.matching.experience_match),
        message_for(FeedbackMetric::AtsReadiness, ats_average(&breakdown.ats)),
    ]
    .join(" ")
}
