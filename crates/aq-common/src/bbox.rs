//! Bounding boxes for granule searches.

use serde::{Deserialize, Serialize};

use crate::point::GridPoint;

/// A geographic bounding box in degrees (x = longitude, y = latitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Square window of `half_width` degrees around a point, clamped to the
    /// valid coordinate ranges.
    pub fn around(point: &GridPoint, half_width: f64) -> Self {
        Self {
            min_x: (point.longitude() - half_width).max(-180.0),
            min_y: (point.latitude() - half_width).max(-90.0),
            max_x: (point.longitude() + half_width).min(180.0),
            max_y: (point.latitude() + half_width).min(90.0),
        }
    }

    /// Width of the bounding box in degrees.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in degrees.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if a point is contained within this bbox.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Provider search order: "west,south,east,north".
    pub fn to_search_string(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}
