//! Configuration for the extractor.

use serde::{Deserialize, Serialize};

use crate::convert::ConversionTable;

/// Configuration for the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum candidate files attempted per extraction.
    pub max_attempts: usize,

    /// Half-width in degrees of the search bounding box around the target.
    pub search_window_degrees: f64,

    /// Days back from the query end that granule search covers.
    pub search_days: u32,

    /// Refuse to extract when the credential capability is not valid.
    pub require_credentials: bool,

    /// Per-pollutant unit conversion.
    pub conversion: ConversionTable,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            search_window_degrees: 2.0,
            search_days: 7,
            require_credentials: true,
            conversion: ConversionTable::default(),
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("AQ_MAX_ATTEMPTS") {
            if let Ok(n) = val.parse() {
                config.max_attempts = n;
            }
        }

        if let Ok(val) = std::env::var("AQ_SEARCH_WINDOW_DEG") {
            if let Ok(deg) = val.parse() {
                config.search_window_degrees = deg;
            }
        }

        if let Ok(val) = std::env::var("AQ_SEARCH_DAYS") {
            if let Ok(days) = val.parse() {
                config.search_days = days;
            }
        }

        if let Ok(val) = std::env::var("AQ_REQUIRE_AUTH") {
            config.require_credentials = is_truthy(&val);
        }

        config.conversion.apply_env();

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be > 0".to_string());
        }

        if !(self.search_window_degrees.is_finite() && self.search_window_degrees > 0.0) {
            return Err("search_window_degrees must be a positive number".to_string());
        }

        if self.search_days == 0 {
            return Err("search_days must be > 0".to_string());
        }

        for (name, rule) in [
            ("no2", &self.conversion.no2),
            ("hcho", &self.conversion.hcho),
            ("o3", &self.conversion.o3),
            ("other", &self.conversion.other),
        ] {
            let factor = rule.conversion.factor();
            if !(factor.is_finite() && factor > 0.0) {
                return Err(format!("conversion factor for {} must be > 0", name));
            }
            if rule.unit.is_empty() {
                return Err(format!("conversion unit for {} must not be empty", name));
            }
        }

        Ok(())
    }
}

/// Same spellings the CLI accepts for boolean flags.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.trim().to_lowercase().as_str(),
        "1" | "true" | "t" | "yes" | "y" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Conversion;

    #[test]
    fn test_defaults_validate() {
        let config = ExtractorConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert!(config.require_credentials);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let config = ExtractorConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_factor() {
        let mut config = ExtractorConfig::default();
        config.conversion.hcho.conversion = Conversion::ArealDensity { factor: 0.0 };
        let err = config.validate().unwrap_err();
        assert!(err.contains("hcho"));
    }

    #[test]
    fn test_truthy_spellings() {
        for v in ["1", "true", "TRUE", "yes", "on", "y"] {
            assert!(is_truthy(v), "{}", v);
        }
        for v in ["0", "false", "no", "off", ""] {
            assert!(!is_truthy(v), "{}", v);
        }
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = serde_json::to_string(&ExtractorConfig::default()).unwrap();
        let back: ExtractorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ExtractorConfig::default());
    }
}
