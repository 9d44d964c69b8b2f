//! Geographic target points.

use serde::{Deserialize, Serialize};

use crate::error::{CommonError, CommonResult};

/// A target location in decimal degrees.
///
/// Construction validates the ranges, so every `GridPoint` in circulation
/// satisfies `latitude ∈ [-90, 90]` and `longitude ∈ [-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct GridPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawPoint> for GridPoint {
    type Error = CommonError;

    fn try_from(raw: RawPoint) -> Result<Self, Self::Error> {
        GridPoint::new(raw.latitude, raw.longitude)
    }
}

impl GridPoint {
    /// Create a validated point. NaN coordinates are rejected.
    pub fn new(latitude: f64, longitude: f64) -> CommonResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CommonError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CommonError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Plain Euclidean distance in degree-space.
    ///
    /// No great-circle correction is applied: longitude degrees shrink toward
    /// the poles, so this over-weights longitude offsets at high latitudes.
    pub fn degree_distance(&self, latitude: f64, longitude: f64) -> f64 {
        (latitude - self.latitude).hypot(longitude - self.longitude)
    }
}

impl std::fmt::Display for GridPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}
