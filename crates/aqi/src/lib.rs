//! Air-quality index calculation.
//!
//! Maps a pollutant concentration (in the reporting unit produced by the
//! extraction pipeline) onto the 0–500 index scale through pollutant-specific
//! piecewise-linear breakpoint tables.
//!
//! ```
//! use aq_common::PollutantKind;
//! use aqi::{index_for, AqiCategory};
//!
//! let result = index_for(&PollutantKind::No2, Some(53.0));
//! assert_eq!(result.aqi, Some(50));
//! assert_eq!(result.category, AqiCategory::Good);
//!
//! let missing = index_for(&PollutantKind::No2, None);
//! assert_eq!(missing.category, AqiCategory::NotAvailable);
//! ```

pub mod breakpoints;
pub mod category;

use aq_common::PollutantKind;
use serde::Serialize;

pub use breakpoints::{BreakpointTable, Segment};
pub use category::AqiCategory;

/// Absorbs binary rounding so a score landing exactly on a breakpoint index
/// is not truncated one below it.
const TRUNCATION_GUARD: f64 = 1e-9;

/// First score that no longer fits in the integer index (2^64).
const SCORE_LIMIT: f64 = u64::MAX as f64;

/// Index score and category, or the absent-value marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexResult {
    /// `None` when the input was absent or invalid.
    pub aqi: Option<u64>,
    pub category: AqiCategory,
}

impl IndexResult {
    pub fn not_available() -> Self {
        Self {
            aqi: None,
            category: AqiCategory::NotAvailable,
        }
    }

    pub fn is_available(&self) -> bool {
        self.aqi.is_some()
    }
}

/// Index for a pollutant value.
///
/// Absent, NaN, infinite and negative values yield the absent marker; every
/// other value gets a finite score, truncated toward zero. A score too large
/// for the integer index is also reported as absent rather than clamped.
pub fn index_for(pollutant: &PollutantKind, value: Option<f64>) -> IndexResult {
    let Some(value) = value.filter(|v| v.is_finite() && *v >= 0.0) else {
        return IndexResult::not_available();
    };

    match BreakpointTable::for_pollutant(pollutant).evaluate(value) {
        Some((score, category)) => {
            let truncated = (score + TRUNCATION_GUARD).trunc();
            if truncated >= SCORE_LIMIT {
                return IndexResult::not_available();
            }
            IndexResult {
                aqi: Some(truncated as u64),
                category,
            }
        }
        None => IndexResult::not_available(),
    }
}
