//! Error types for the extraction pipeline.
//!
//! Per-granule problems are not errors: they are recorded as
//! [`AttemptFailure`](crate::result::AttemptFailure) values and the next
//! candidate is tried. Only malformed caller input or configuration surfaces
//! here.

use aq_common::CommonError;
use thiserror::Error;

/// Fatal extraction errors.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The target coordinate is outside valid latitude/longitude bounds.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(#[from] CommonError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ExtractError {
    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
