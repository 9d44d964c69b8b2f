//! Error types for malformed caller input.

use thiserror::Error;

/// Result type alias using CommonError.
pub type CommonResult<T> = Result<T, CommonError>;

/// Errors raised while validating values handed in by a caller.
///
/// These are the only fatal conditions of the extraction pipeline; they are
/// raised before any data file is touched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommonError {
    #[error("Latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),

    #[error("Longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),

    #[error("Invalid time range: start {start} is after end {end}")]
    InvalidTimeRange { start: String, end: String },

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },
}

impl CommonError {
    /// Get the HTTP status code an API layer should answer with.
    pub fn http_status_code(&self) -> u16 {
        400
    }
}

