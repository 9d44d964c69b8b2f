//! Point extraction of pollutant columns from satellite granules.
//!
//! Given an ordered list of candidate granules, a target point and a
//! pollutant, the [`Extractor`] returns the nearest valid value in the
//! pollutant's reporting unit, or an aggregate "unavailable" outcome with
//! per-file diagnostics.
//!
//! # Pipeline
//!
//! For each candidate, in order and up to the attempt cap:
//!
//! 1. open it through a [`GranuleOpener`]
//! 2. resolve the layout ([`tempo_parser::resolve`])
//! 3. locate the measurement variable ([`tempo_parser::locate`])
//! 4. match the nearest grid cell ([`nearest`])
//! 5. validate and convert the value ([`ConversionTable`])
//!
//! Any step failing records an [`AttemptFailure`] and moves on to the next
//! candidate.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use point_extractor::{Extractor, ExtractorConfig, GranuleRef, StaticCredential};
//!
//! let extractor = Extractor::new(opener, Arc::new(StaticCredential(true)), ExtractorConfig::default())?;
//! let result = extractor.extract_at(40.7, -74.0, &[GranuleRef::local("granule.nc")], &PollutantKind::No2)?;
//! ```

pub mod collaborators;
pub mod config;
pub mod convert;
pub mod error;
pub mod nearest;
pub mod orchestrator;
pub mod result;

pub use collaborators::{
    Credential, GranuleOpener, GranuleQuery, GranuleRef, GranuleSearch, StaticCredential,
};
pub use config::ExtractorConfig;
pub use convert::{Conversion, ConversionRule, ConversionTable, Converted, Rejected, SENTINEL_MAGNITUDE};
pub use error::{ExtractError, Result};
pub use nearest::{nearest, nearest_separable, nearest_swath, GridGeometry, GridMatch, MatchError};
pub use orchestrator::Extractor;
pub use result::{
    AttemptDiagnostic, AttemptFailure, ExtractedValue, ExtractionResult, UnavailableReason,
};
