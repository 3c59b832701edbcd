use super::super::domain::CandidateProfile;
use super::AtsScores;

const MACHINE_READABLE_EXTENSIONS: [&str; 2] = ["pdf", "docx"];

pub(crate) fn score_compatibility(candidate: CandidateProfile<'_>) -> AtsScores {
    let resume = candidate.resume;

    let mut structure = 0.0;
    if resume
        .experience
        .as_ref()
        .is_some_and(|entries| !entries.is_empty())
    {
        structure += 40.0;
    }
    if !resume.education.is_empty() {
        structure += 30.0;
    }
    if !resume.skills.is_empty() {
        structure += 30.0;
    }

    AtsScores {
        ats_format_score: format_score(candidate.resume_filename),
        ats_keywords_score: (resume.skills.len() as f64 * 10.0).min(100.0),
        ats_structure_score: structure,
    }
}

fn format_score(filename: &str) -> f64 {
    let readable = filename
        .rsplit_once('.')
        .map(|(_, extension)| {
            MACHINE_READABLE_EXTENSIONS
                .iter()
                .any(|known| extension.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false);

    if readable {
        100.0
    } else {
        30.0
    }
}
