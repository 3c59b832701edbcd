use clap::Args;
use hiring_ai::config::AppConfig;
use hiring_ai::error::AppError;
use hiring_ai::workflows::screening::{
    CandidateProfile, JobPosting, ParsedResume, ScoringConfig, ScoringEngine, ScoringOutcome,
};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON document holding `job`, `resume_filename`, and `parsed`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Override MATCH_SCORE_WEIGHT for this run
    #[arg(long)]
    pub(crate) match_weight: Option<f64>,
    /// Override ATS_SCORE_WEIGHT for this run
    #[arg(long)]
    pub(crate) ats_weight: Option<f64>,
}

/// Offline scoring request; nothing is persisted.
#[derive(Debug, Deserialize)]
struct ScoreDocument {
    job: JobPosting,
    resume_filename: String,
    #[serde(default)]
    parsed: ParsedResume,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let mut scoring = AppConfig::load()?.scoring;
    if let Some(weight) = args.match_weight {
        scoring.match_weight = weight;
    }
    if let Some(weight) = args.ats_weight {
        scoring.ats_weight = weight;
    }

    let raw = fs::read_to_string(&args.input)?;
    let outcome = score_document(&raw, scoring)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn score_document(raw: &str, config: ScoringConfig) -> Result<ScoringOutcome, AppError> {
    let document: ScoreDocument = serde_json::from_str(raw)?;
    let engine = ScoringEngine::new(config);
    let candidate = CandidateProfile {
        resume: &document.parsed,
        resume_filename: &document.resume_filename,
    };
    Ok(engine.score(document.job.requirements(), candidate))
}
