//! Candidate screening: scores submitted job applications against posting requirements,
//! classifies them into hiring decisions, and records an auditable score history.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
