//! Extraction outcomes.
//!
//! A single candidate either yields an [`ExtractedValue`] or an
//! [`AttemptFailure`]. The orchestrator folds these into one
//! [`ExtractionResult`]; "no data here" is an ordinary outcome, not an error.

use serde::Serialize;
use tempo_parser::{LayoutKind, LocateFailure, NetCdfError, ResolutionFailure};

use crate::convert::Rejected;
use crate::nearest::{GridGeometry, MatchError};

/// A validated value in the reporting unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedValue {
    pub value: f64,
    pub unit: String,
    /// Name of the variable actually read.
    pub variable: String,
    /// `units` attribute of that variable, when declared.
    pub native_units: Option<String>,
    pub raw_value: f64,
    /// Granule the value came from.
    pub source: String,
    pub layout: LayoutKind,
    pub row: usize,
    pub col: usize,
    pub geometry: GridGeometry,
    /// Degree-space distance from the target to the matched cell.
    pub distance_degrees: f64,
}

/// Why one candidate produced no value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AttemptFailure {
    /// The granule could not be fetched or opened.
    OpenFailed { message: String },

    /// No known layout matched.
    NoLayout {
        groups_inspected: Vec<String>,
        variables_inspected: Vec<String>,
        detail: String,
    },

    /// A measurement group exists but no container holds a latitude and
    /// longitude pair.
    NoCoordinates {
        measurement: String,
        containers: Vec<String>,
    },

    /// Layout recognized but no candidate variable exists.
    NoVariable {
        container: String,
        probed: Vec<String>,
        available: Vec<String>,
    },

    /// The variable exists but the value at the matched cell is unusable.
    InvalidValue {
        variable: String,
        raw: f64,
        rejected: Rejected,
    },

    /// Coordinates could not be matched or do not line up with the data.
    CoordinateMismatch { message: String },

    /// Reading from an opened granule failed.
    ReadFailed { message: String },
}

impl AttemptFailure {
    /// Stable label used in logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            AttemptFailure::OpenFailed { .. } => "open_failed",
            AttemptFailure::NoLayout { .. } => "no_layout",
            AttemptFailure::NoCoordinates { .. } => "no_coordinates",
            AttemptFailure::NoVariable { .. } => "no_variable",
            AttemptFailure::InvalidValue { .. } => "invalid_value",
            AttemptFailure::CoordinateMismatch { .. } => "coordinate_mismatch",
            AttemptFailure::ReadFailed { .. } => "read_failed",
        }
    }

    /// Candidate names probed without a match, if any.
    pub fn probed(&self) -> &[String] {
        match self {
            AttemptFailure::NoVariable { probed, .. } => probed,
            _ => &[],
        }
    }
}

impl std::fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptFailure::OpenFailed { message } => write!(f, "open failed: {}", message),
            AttemptFailure::NoLayout { detail, .. } => write!(f, "{}", detail),
            AttemptFailure::NoCoordinates {
                measurement,
                containers,
            } => write!(
                f,
                "measurement group {} has no latitude/longitude pair in {:?}",
                measurement, containers
            ),
            AttemptFailure::NoVariable {
                container,
                probed,
                available,
            } => write!(
                f,
                "none of {:?} in {} (available: {:?})",
                probed, container, available
            ),
            AttemptFailure::InvalidValue {
                variable, rejected, ..
            } => write!(f, "{}: {}", variable, rejected),
            AttemptFailure::CoordinateMismatch { message } => write!(f, "{}", message),
            AttemptFailure::ReadFailed { message } => write!(f, "read failed: {}", message),
        }
    }
}

impl From<ResolutionFailure> for AttemptFailure {
    fn from(err: ResolutionFailure) -> Self {
        match err {
            ResolutionFailure::Unrecognized {
                ref groups_inspected,
                ref variables_inspected,
            } => AttemptFailure::NoLayout {
                groups_inspected: groups_inspected.clone(),
                variables_inspected: variables_inspected.clone(),
                detail: err.to_string(),
            },
            ResolutionFailure::MissingCoordinates {
                measurement,
                coordinate_containers,
            } => AttemptFailure::NoCoordinates {
                measurement,
                containers: coordinate_containers,
            },
            ResolutionFailure::Read(e) => e.into(),
        }
    }
}

impl From<LocateFailure> for AttemptFailure {
    fn from(err: LocateFailure) -> Self {
        match err {
            LocateFailure::NotFound {
                container,
                probed,
                available,
            } => AttemptFailure::NoVariable {
                container,
                probed,
                available,
            },
            LocateFailure::Read(e) => e.into(),
        }
    }
}

impl From<NetCdfError> for AttemptFailure {
    fn from(err: NetCdfError) -> Self {
        AttemptFailure::ReadFailed {
            message: err.to_string(),
        }
    }
}

impl From<MatchError> for AttemptFailure {
    fn from(err: MatchError) -> Self {
        AttemptFailure::CoordinateMismatch {
            message: err.to_string(),
        }
    }
}

/// One failed candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptDiagnostic {
    pub source: String,
    #[serde(flatten)]
    pub failure: AttemptFailure,
}

/// Why no value was produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnavailableReason {
    /// Every attempted candidate failed.
    ExhaustedCandidates,
    /// The candidate list was empty.
    NoCandidates,
    /// Credentials are required and the capability reported them invalid.
    NotAuthenticated,
    /// The search collaborator failed.
    SearchFailed { message: String },
}

/// Aggregate outcome of one extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionResult {
    Success {
        #[serde(flatten)]
        value: ExtractedValue,
        /// Candidates that failed before the successful one.
        misses: Vec<AttemptDiagnostic>,
    },
    Unavailable {
        reason: UnavailableReason,
        attempts: Vec<AttemptDiagnostic>,
    },
}

impl ExtractionResult {
    pub fn unavailable(reason: UnavailableReason) -> Self {
        ExtractionResult::Unavailable {
            reason,
            attempts: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionResult::Success { .. })
    }

    pub fn value(&self) -> Option<&ExtractedValue> {
        match self {
            ExtractionResult::Success { value, .. } => Some(value),
            ExtractionResult::Unavailable { .. } => None,
        }
    }

    /// Failed attempts, in the order they were made.
    pub fn diagnostics(&self) -> &[AttemptDiagnostic] {
        match self {
            ExtractionResult::Success { misses, .. } => misses,
            ExtractionResult::Unavailable { attempts, .. } => attempts,
        }
    }

    /// Every candidate name probed without a match across all attempts.
    pub fn probed_names(&self) -> Vec<&str> {
        self.diagnostics()
            .iter()
            .flat_map(|d| d.failure.probed())
            .map(String::as_str)
            .collect()
    }
}
