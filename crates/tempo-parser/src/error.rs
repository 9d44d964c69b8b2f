//! Error types for data-file access.

use thiserror::Error;

/// Result type for data-file operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for reading structured granule files.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The file could not be opened as a structured array file
    #[error("Failed to open {path}: {message}")]
    OpenFailed { path: String, message: String },

    /// Missing required group, variable or attribute
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format (bad shape, index out of range)
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Reading a variable's values failed part-way
    #[error("Failed to read {variable}: {message}")]
    ReadFailed { variable: String, message: String },

    /// Malformed variable catalog document
    #[error("Invalid variable catalog: {0}")]
    Catalog(String),
}

impl NetCdfError {
    pub fn read_failed(variable: impl Into<String>, message: impl ToString) -> Self {
        Self::ReadFailed {
            variable: variable.into(),
            message: message.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for NetCdfError {
    fn from(err: serde_yaml::Error) -> Self {
        NetCdfError::Catalog(err.to_string())
    }
}
