use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Store-assigned identifier of one score record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScoreId(pub u64);

/// Published job posting. Only `skills` and `certifications` take part in scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub certifications: Vec<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

/// Parser output may carry `null` for a section it could not read; treat it as empty.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl JobPosting {
    pub fn requirements(&self) -> JobRequirements<'_> {
        JobRequirements {
            skills: &self.skills,
            certifications: &self.certifications,
        }
    }
}

/// Read-only projection of a posting consumed by the scoring engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct JobRequirements<'a> {
    pub skills: &'a [String],
    pub certifications: &'a [String],
}

/// Structured fields supplied by the external résumé parser.
///
/// `experience` keeps `None` (section not found or `null`) apart from `Some(vec![])` (section
/// found but empty) because the two score differently. The other sections read `null` as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<EducationEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub certifications: Vec<String>,
}

/// One education entry. Everything besides `degree` is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl EducationEntry {
    pub fn with_degree(degree: impl Into<String>) -> Self {
        Self {
            degree: degree.into(),
            details: Map::new(),
        }
    }
}

/// Read-only projection of a candidate consumed by the scoring engine.
#[derive(Debug, Clone, Copy)]
pub struct CandidateProfile<'a> {
    pub resume: &'a ParsedResume,
    pub resume_filename: &'a str,
}

/// Contact details captured at intake; inert for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateContact {
    pub full_name: String,
    pub email: String,
}

/// Payload accepted by the intake flow once the résumé has been parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub job_id: JobId,
    pub candidate: CandidateContact,
    pub resume_filename: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parsed: ParsedResume,
}

/// Stored application, owner of its score history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub candidate: CandidateContact,
    pub resume_filename: String,
    pub parsed: ParsedResume,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn scoring_view(&self) -> CandidateProfile<'_> {
        CandidateProfile {
            resume: &self.parsed,
            resume_filename: &self.resume_filename,
        }
    }
}

/// Lifecycle status persisted on an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    Shortlisted,
    Rejected,
    InterviewScheduled,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::InterviewScheduled => "interview_scheduled",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
