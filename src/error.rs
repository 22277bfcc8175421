//! Tutor Error Types
//!
//! Centralized error handling for the tutor core.

use crate::catalog::ConceptKey;
use thiserror::Error;

/// Central error type for the tutor
#[derive(Error, Debug)]
pub enum TutorError {
    /// Stop words or lemma data could not be loaded
    #[error("Linguistic resources unavailable: {0}")]
    ResourceUnavailable(String),

    /// A session points at a concept the catalog does not know
    #[error("Unknown concept key: {0}")]
    UnknownConceptKey(ConceptKey),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for tutor operations
pub type TutorResult<T> = Result<T, TutorError>;
