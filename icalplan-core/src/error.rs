//! Error types for the icalplan ecosystem.

use thiserror::Error;

/// Errors that can occur in icalplan operations.
///
/// Per-candidate outcomes (validation failures, overlaps, fixed-commitment
/// conflicts) are not errors; they are reported through
/// [`crate::resolver::Resolution`].
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("An event with id '{0}' already exists")]
    DuplicateId(String),

    #[error("Draft generation failed: {0}")]
    GenerationFailed(String),

    #[error("Generator '{0}' not found in PATH")]
    GeneratorNotInstalled(String),

    #[error("Generator request timed out after {0}s")]
    GeneratorTimeout(u64),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for icalplan operations.
pub type PlanResult<T> = Result<T, PlanError>;
