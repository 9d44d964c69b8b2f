//! Pollutant identifiers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Pollutant identifier used as a lookup key throughout the pipeline.
///
/// Unknown identifiers are kept as `Other` (upper-cased) rather than rejected,
/// so that generic variable names and the generic index table still apply.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum PollutantKind {
    /// Nitrogen dioxide (tropospheric column).
    No2,
    /// Ozone (total column).
    O3,
    /// Formaldehyde (tropospheric column).
    Hcho,
    /// Any other product identifier.
    Other(String),
}

impl PollutantKind {
    /// Canonical identifier, e.g. `"NO2"`.
    pub fn as_str(&self) -> &str {
        match self {
            PollutantKind::No2 => "NO2",
            PollutantKind::O3 => "O3",
            PollutantKind::Hcho => "HCHO",
            PollutantKind::Other(name) => name,
        }
    }

    /// Static label for metrics; every `Other` collapses to `"OTHER"`.
    pub fn metric_label(&self) -> &'static str {
        match self {
            PollutantKind::No2 => "NO2",
            PollutantKind::O3 => "O3",
            PollutantKind::Hcho => "HCHO",
            PollutantKind::Other(_) => "OTHER",
        }
    }

    /// Provider collection short names, most preferred first.
    ///
    /// The regridded Level-3 collection is listed before the swath Level-2 one.
    pub fn collection_short_names(&self) -> Vec<String> {
        let product = match self {
            PollutantKind::No2 => "NO2",
            PollutantKind::O3 => "O3TOT",
            PollutantKind::Hcho => "HCHO",
            PollutantKind::Other(name) => name.as_str(),
        };
        vec![format!("TEMPO_{}_L3", product), format!("TEMPO_{}_L2", product)]
    }
}

impl FromStr for PollutantKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_uppercase().as_str() {
            "NO2" => PollutantKind::No2,
            "O3" | "O3TOT" => PollutantKind::O3,
            "HCHO" => PollutantKind::Hcho,
            other => PollutantKind::Other(other.to_string()),
        })
    }
}

impl From<String> for PollutantKind {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<PollutantKind> for String {
    fn from(kind: PollutantKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for PollutantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known() {
        assert_eq!("no2".parse::<PollutantKind>().unwrap(), PollutantKind::No2);
        assert_eq!("O3TOT".parse::<PollutantKind>().unwrap(), PollutantKind::O3);
        assert_eq!(" hcho ".parse::<PollutantKind>().unwrap(), PollutantKind::Hcho);
    }

    #[test]
    fn test_parse_other_is_uppercased() {
        assert_eq!(
            "so2".parse::<PollutantKind>().unwrap(),
            PollutantKind::Other("SO2".to_string())
        );
    }

    #[test]
    fn test_collection_short_names() {
        assert_eq!(
            PollutantKind::O3.collection_short_names(),
            vec!["TEMPO_O3TOT_L3".to_string(), "TEMPO_O3TOT_L2".to_string()]
        );
        assert_eq!(
            PollutantKind::No2.collection_short_names()[0],
            "TEMPO_NO2_L3"
        );
    }
}
