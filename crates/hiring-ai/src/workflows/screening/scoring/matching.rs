use std::collections::HashSet;

use super::super::domain::{JobRequirements, ParsedResume};
use super::MatchScores;

pub(crate) fn score_matches(job: JobRequirements<'_>, resume: &ParsedResume) -> MatchScores {
    MatchScores {
        skills_match: overlap_percentage(job.skills, &resume.skills),
        experience_match: experience_score(resume.experience.as_deref()),
        education_match: education_score(resume),
        certification_match: overlap_percentage(job.certifications, &resume.certifications),
    }
}

/// Share of distinct required entries the candidate lists, compared case-insensitively.
/// Candidate extras never raise the score; no requirements means nothing to match.
fn overlap_percentage(required: &[String], offered: &[String]) -> f64 {
    let required: HashSet<String> = required.iter().map(|entry| entry.to_lowercase()).collect();
    if required.is_empty() || offered.is_empty() {
        return 0.0;
    }

    let offered: HashSet<String> = offered.iter().map(|entry| entry.to_lowercase()).collect();
    let matched = required.intersection(&offered).count();

    matched as f64 / required.len() as f64 * 100.0
}

fn experience_score(entries: Option<&[serde_json::Value]>) -> f64 {
    match entries {
        None => 0.0,
        Some([]) => 20.0,
        Some([_]) => 60.0,
        Some(_) => 80.0,
    }
}

// Bachelor is checked before master on purpose: a candidate listing both lands on 70.
fn education_score(resume: &ParsedResume) -> f64 {
    let mentions = |needle: &str| {
        resume
            .education
            .iter()
            .any(|entry| entry.degree.to_lowercase().contains(needle))
    };

    if mentions("bachelor") {
        70.0
    } else if mentions("master") {
        90.0
    } else if !resume.education.is_empty() {
        50.0
    } else {
        0.0
    }
}
