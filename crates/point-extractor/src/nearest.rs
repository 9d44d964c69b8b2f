//! Nearest-cell matching.
//!
//! The strategy is chosen from the dimensionality of the coordinate arrays,
//! never from the layout type:
//!
//! - **1-D axes** (regular grid): latitude and longitude are separable, so
//!   each axis is minimized independently. O(rows + cols).
//! - **2-D arrays** (swath): every cell has its own coordinates, so the
//!   distance to every cell is computed. O(rows × cols).
//!
//! Distance is plain Euclidean distance in degree-space. No great-circle
//! correction is applied, so longitude offsets are over-weighted at high
//! latitudes where longitude degrees compress.
//!
//! Coordinate cells that are non-finite or outside the valid latitude or
//! longitude range never match. Fill values (the 1e30 sentinel band, -999
//! and the like) fall outside those ranges.

use aq_common::GridPoint;
use serde::Serialize;
use tempo_parser::ArrayData;
use thiserror::Error;

/// Which matching strategy produced a [`GridMatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GridGeometry {
    /// Independent 1-D latitude and longitude axes.
    Separable,
    /// Per-cell 2-D coordinates.
    Swath,
}

/// The matched cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridMatch {
    pub row: usize,
    pub col: usize,
    /// Grid extent the indices refer to.
    pub rows: usize,
    pub cols: usize,
    /// Degree-space distance from the target to the matched cell.
    pub distance: f64,
    pub geometry: GridGeometry,
}

/// Matching could not produce a cell.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("latitude shape {lat:?} and longitude shape {lon:?} are not a supported pair")]
    ShapeMismatch { lat: Vec<usize>, lon: Vec<usize> },

    #[error("coordinate arrays contain no valid cells")]
    NoValidCoordinates,
}

const MAX_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = 180.0;

fn within(v: f64, limit: f64) -> bool {
    v.is_finite() && v.abs() <= limit
}

/// Index of the axis value closest to `target`, skipping entries outside
/// `[-limit, limit]`.
fn nearest_on_axis(axis: &[f64], target: f64, limit: f64) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in axis.iter().enumerate() {
        if !within(v, limit) {
            continue;
        }
        let diff = (v - target).abs();
        if best.map_or(true, |(_, d)| diff < d) {
            best = Some((i, diff));
        }
    }
    best
}

/// Separable-axis match on a regular grid.
pub fn nearest_separable(
    latitudes: &[f64],
    longitudes: &[f64],
    target: &GridPoint,
) -> Result<GridMatch, MatchError> {
    let (row, dlat) =
        nearest_on_axis(latitudes, target.latitude(), MAX_LATITUDE).ok_or(MatchError::NoValidCoordinates)?;
    let (col, dlon) =
        nearest_on_axis(longitudes, target.longitude(), MAX_LONGITUDE).ok_or(MatchError::NoValidCoordinates)?;
    Ok(GridMatch {
        row,
        col,
        rows: latitudes.len(),
        cols: longitudes.len(),
        distance: dlat.hypot(dlon),
        geometry: GridGeometry::Separable,
    })
}

/// Exhaustive match on a `rows × cols` swath stored row-major.
pub fn nearest_swath(
    latitudes: &[f64],
    longitudes: &[f64],
    rows: usize,
    cols: usize,
    target: &GridPoint,
) -> Result<GridMatch, MatchError> {
    let cells = rows * cols;
    if latitudes.len() < cells || longitudes.len() < cells {
        return Err(MatchError::ShapeMismatch {
            lat: vec![latitudes.len()],
            lon: vec![longitudes.len()],
        });
    }

    let mut best: Option<(usize, f64)> = None;
    for (i, (&lat, &lon)) in latitudes[..cells].iter().zip(&longitudes[..cells]).enumerate() {
        if !within(lat, MAX_LATITUDE) || !within(lon, MAX_LONGITUDE) {
            continue;
        }
        let d = target.degree_distance(lat, lon);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }

    let (flat, distance) = best.ok_or(MatchError::NoValidCoordinates)?;
    Ok(GridMatch {
        row: flat / cols,
        col: flat % cols,
        rows,
        cols,
        distance,
        geometry: GridGeometry::Swath,
    })
}

/// Match `target` against a pair of coordinate arrays.
///
/// Two 1-D arrays are treated as separable axes. Two arrays of identical
/// shape with two or more dimensions are treated as a swath; leading
/// dimensions (e.g. time) are reduced to their first slice.
pub fn nearest(
    latitude: &ArrayData,
    longitude: &ArrayData,
    target: &GridPoint,
) -> Result<GridMatch, MatchError> {
    match (latitude.ndim(), longitude.ndim()) {
        (1, 1) => nearest_separable(&latitude.values, &longitude.values, target),
        (a, b) if a >= 2 && a == b && latitude.shape == longitude.shape => {
            let rows = latitude.shape[a - 2];
            let cols = latitude.shape[a - 1];
            nearest_swath(&latitude.values, &longitude.values, rows, cols, target)
        }
        _ => Err(MatchError::ShapeMismatch {
            lat: latitude.shape.clone(),
            lon: longitude.shape.clone(),
        }),
    }
}
