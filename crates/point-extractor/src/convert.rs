//! Value validation and unit conversion.
//!
//! Conversion factors are coarse empirical constants, not radiative-transfer
//! conversions. They are configuration data: override them through
//! [`ConversionTable`] rather than deriving new ones here.

use aq_common::PollutantKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Values at or beyond this magnitude are fill-value sentinels.
pub const SENTINEL_MAGNITUDE: f64 = 1.0e30;

/// Areal density (molecules/cm²) to ppb for NO2.
pub const DEFAULT_NO2_FACTOR: f64 = 5.0e-16;
/// Areal density (molecules/cm²) to ppb for HCHO.
pub const DEFAULT_HCHO_FACTOR: f64 = 1.0e-16;
/// Total-column Dobson units to the ppb-equivalent O3 scale.
pub const DEFAULT_O3_SCALE: f64 = 0.1;

/// How a raw value becomes a reporting value. Both variants take the
/// absolute value first: the sign of a retrieved column is an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conversion {
    /// Multiply an areal density by a fixed factor.
    ArealDensity { factor: f64 },
    /// Keep the native column unit, optionally rescaled.
    NativeColumn { scale: f64 },
}

impl Conversion {
    pub fn factor(&self) -> f64 {
        match self {
            Conversion::ArealDensity { factor } => *factor,
            Conversion::NativeColumn { scale } => *scale,
        }
    }

    pub fn apply(&self, value: f64) -> f64 {
        value.abs() * self.factor()
    }
}

/// Conversion plus the unit it reports in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRule {
    pub conversion: Conversion,
    pub unit: String,
}

impl ConversionRule {
    fn new(conversion: Conversion, unit: &str) -> Self {
        Self {
            conversion,
            unit: unit.to_string(),
        }
    }
}

/// Per-pollutant conversion rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionTable {
    pub no2: ConversionRule,
    pub hcho: ConversionRule,
    pub o3: ConversionRule,
    pub other: ConversionRule,
}

impl Default for ConversionTable {
    fn default() -> Self {
        Self {
            no2: ConversionRule::new(
                Conversion::ArealDensity {
                    factor: DEFAULT_NO2_FACTOR,
                },
                "ppb",
            ),
            hcho: ConversionRule::new(
                Conversion::ArealDensity {
                    factor: DEFAULT_HCHO_FACTOR,
                },
                "ppb",
            ),
            o3: ConversionRule::new(
                Conversion::NativeColumn {
                    scale: DEFAULT_O3_SCALE,
                },
                "ppb-equivalent",
            ),
            other: ConversionRule::new(Conversion::NativeColumn { scale: 1.0 }, "native"),
        }
    }
}

/// Why a raw value was not usable.
#[derive(Debug, Error, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejected {
    #[error("value is NaN")]
    NotANumber,

    #[error("value {value:e} is inside the fill sentinel band")]
    Sentinel { value: f64 },

    #[error("value {value:e} equals the declared fill value")]
    FillValue { value: f64 },

    #[error("converting {value:e} overflowed")]
    Overflow { value: f64 },
}

/// A validated, converted value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Converted {
    pub value: f64,
    pub unit: String,
}

impl ConversionTable {
    pub fn rule(&self, pollutant: &PollutantKind) -> &ConversionRule {
        match pollutant {
            PollutantKind::No2 => &self.no2,
            PollutantKind::Hcho => &self.hcho,
            PollutantKind::O3 => &self.o3,
            PollutantKind::Other(_) => &self.other,
        }
    }

    /// Apply `AQ_NO2_FACTOR`, `AQ_HCHO_FACTOR` and `AQ_O3_SCALE` overrides.
    pub fn apply_env(&mut self) {
        if let Some(factor) = env_f64("AQ_NO2_FACTOR") {
            self.no2.conversion = Conversion::ArealDensity { factor };
        }
        if let Some(factor) = env_f64("AQ_HCHO_FACTOR") {
            self.hcho.conversion = Conversion::ArealDensity { factor };
        }
        if let Some(scale) = env_f64("AQ_O3_SCALE") {
            self.o3.conversion = Conversion::NativeColumn { scale };
        }
    }

    /// Reject NaN and sentinel values, then convert to the reporting unit.
    pub fn validate_and_convert(
        &self,
        raw: f64,
        pollutant: &PollutantKind,
    ) -> Result<Converted, Rejected> {
        self.validate_and_convert_with_fill(raw, pollutant, None)
    }

    /// As [`validate_and_convert`](Self::validate_and_convert), also rejecting
    /// the variable's declared `_FillValue`.
    pub fn validate_and_convert_with_fill(
        &self,
        raw: f64,
        pollutant: &PollutantKind,
        fill_value: Option<f64>,
    ) -> Result<Converted, Rejected> {
        validate(raw, fill_value)?;
        let rule = self.rule(pollutant);
        let value = rule.conversion.apply(raw);
        if !value.is_finite() {
            return Err(Rejected::Overflow { value: raw });
        }
        Ok(Converted {
            value,
            unit: rule.unit.clone(),
        })
    }
}

/// Reject NaN, the sentinel band and the declared fill value.
pub fn validate(raw: f64, fill_value: Option<f64>) -> Result<f64, Rejected> {
    if raw.is_nan() {
        return Err(Rejected::NotANumber);
    }
    if raw.abs() >= SENTINEL_MAGNITUDE {
        return Err(Rejected::Sentinel { value: raw });
    }
    if fill_value == Some(raw) {
        return Err(Rejected::FillValue { value: raw });
    }
    Ok(raw)
}

fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
}
