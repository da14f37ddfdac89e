//! Error types for AEON
//!
//! Law answers never fail: unroutable, vetoed and non-finite answers are
//! values. Errors cover API misuse and the plumbing around the engine.

use std::time::Duration;

use thiserror::Error;

use crate::ComplexityLevel;

/// Core AEON errors
#[derive(Error, Debug)]
pub enum AeonError {
    // Pipeline errors
    #[error("Stage out of order: expected {expected}, got {requested}")]
    StageOutOfOrder { expected: String, requested: String },

    #[error("Synthesis pipeline already complete")]
    PipelineComplete,

    #[error("Complexity regression from {from} to {to}")]
    ComplexityRegression {
        from: ComplexityLevel,
        to: ComplexityLevel,
    },

    #[error("Checkpoint after {stage} timed out after {waited:?}")]
    CheckpointTimeout { stage: String, waited: Duration },

    #[error("Synthesis abandoned after {0}")]
    Abandoned(String),

    // State errors
    #[error("Invalid state: {0}")]
    InvalidState(String),

    // Agent errors
    #[error("Broker unavailable: {0}")]
    BrokerUnavailable(String),

    // Runtime errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging initialisation failed: {0}")]
    Logging(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for AEON operations
pub type AeonResult<T> = Result<T, AeonError>;
