//! Seams to the outside world: granule search, download/open and
//! authentication. The pipeline only calls these traits; transport,
//! session caching and retries belong to the implementations.

use aq_common::{BoundingBox, GridPoint, PollutantKind, TimeRange};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempo_parser::{DataFile, NetCdfResult};

/// An opaque reference to one candidate granule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GranuleRef {
    /// Provider identifier, or the file name for local granules.
    pub id: String,
    /// Where the opener fetches it from (URL or local path).
    pub location: String,
    /// Collection the granule belongs to, if known.
    #[serde(default)]
    pub short_name: Option<String>,
    /// Observation start time, if known.
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

impl GranuleRef {
    /// Reference a local file; the id is its file name.
    pub fn local(path: impl Into<String>) -> Self {
        let location = path.into();
        let id = std::path::Path::new(&location)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| location.clone());
        Self {
            id,
            location,
            short_name: None,
            time: None,
        }
    }
}

/// A granule search request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GranuleQuery {
    pub pollutant: PollutantKind,
    /// Collections to try, in order.
    pub short_names: Vec<String>,
    pub bbox: BoundingBox,
    pub time_range: TimeRange,
}

impl GranuleQuery {
    /// Query a square window of `half_width` degrees around `point`.
    pub fn around(
        point: &GridPoint,
        pollutant: &PollutantKind,
        half_width: f64,
        time_range: TimeRange,
    ) -> Self {
        Self {
            pollutant: pollutant.clone(),
            short_names: pollutant.collection_short_names(),
            bbox: BoundingBox::around(point, half_width),
            time_range,
        }
    }
}

/// Turns a granule reference into a readable file.
///
/// The returned granule is dropped (and its handle closed) when the attempt
/// that opened it finishes, on every exit path.
pub trait GranuleOpener {
    type Granule: DataFile;

    fn open(&self, granule: &GranuleRef) -> NetCdfResult<Self::Granule>;
}

/// Finds candidate granules, ordered by preference (e.g. most recent first).
pub trait GranuleSearch {
    fn search(&self, query: &GranuleQuery) -> Result<Vec<GranuleRef>, String>;
}

/// Authentication capability handed to the extractor.
pub trait Credential: Send + Sync {
    fn is_valid(&self) -> bool;
}

/// A credential with a fixed validity flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticCredential(pub bool);

impl Credential for StaticCredential {
    fn is_valid(&self) -> bool {
        self.0
    }
}
