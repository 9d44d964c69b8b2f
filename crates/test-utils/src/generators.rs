//! Coordinate and value generators for synthetic granules.

/// Evenly spaced axis from `start` with `count` points `step` apart.
///
/// ```
/// use test_utils::axis;
///
/// assert_eq!(axis(30.0, 0.5, 3), vec![30.0, 30.5, 31.0]);
/// ```
pub fn axis(start: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// A curved swath: `rows × cols` cells whose latitude and longitude both vary
/// along each axis, so the axes are not separable.
///
/// Returns `(latitudes, longitudes)` in row-major order.
pub fn swath(
    rows: usize,
    cols: usize,
    origin: (f64, f64),
    step: f64,
    skew: f64,
) -> (Vec<f64>, Vec<f64>) {
    let mut lats = Vec::with_capacity(rows * cols);
    let mut lons = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let (r, c) = (r as f64, c as f64);
            lats.push(origin.0 + r * step + c * skew);
            lons.push(origin.1 + c * step - r * skew + 0.01 * c * c);
        }
    }
    (lats, lons)
}

/// Row-major grid with `value(row, col)` at each cell.
pub fn grid_values(rows: usize, cols: usize, value: impl Fn(usize, usize) -> f64) -> Vec<f64> {
    let mut data = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            data.push(value(r, c));
        }
    }
    data
}

/// NO2-like areal densities: `(row * cols + col + 1) × 1e15` molecules/cm².
pub fn areal_density_grid(rows: usize, cols: usize) -> Vec<f64> {
    grid_values(rows, cols, |r, c| (r * cols + c + 1) as f64 * 1e15)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swath_is_not_separable() {
        let (lats, lons) = swath(3, 3, (30.0, -100.0), 0.1, 0.02);
        // Latitude changes along a row, longitude changes down a column.
        assert_ne!(lats[0], lats[1]);
        assert_ne!(lons[0], lons[3]);
        assert_eq!(lats.len(), 9);
    }

    #[test]
    fn test_areal_density_grid() {
        let g = areal_density_grid(2, 3);
        assert_eq!(g[0], 1e15);
        assert_eq!(g[5], 6e15);
    }
}
