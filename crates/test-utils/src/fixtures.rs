//! Synthetic granules covering every schema layout.
//!
//! The regular grid used by the level-3 fixtures:
//!
//! ```text
//! latitude  = [30, 31, 32]                 (rows)
//! longitude = [-100, -99, -98, -97]        (cols)
//! data      = shape [1, 3, 4]              (time, row, col)
//! ```

use tempo_parser::{ContainerPath, MemoryGranule, MemoryVariable};

use crate::generators::axis;

/// Rows of the level-3 fixture grid.
pub const L3_ROWS: usize = 3;
/// Columns of the level-3 fixture grid.
pub const L3_COLS: usize = 4;

/// Native unit of areal-density fixtures.
pub const AREAL_DENSITY_UNITS: &str = "molecules/cm^2";

/// Fill value declared on measurement fixtures.
pub const FIXTURE_FILL_VALUE: f64 = -1.0e30;

/// Latitude axis of the level-3 fixture grid.
pub fn l3_latitudes() -> Vec<f64> {
    axis(30.0, 1.0, L3_ROWS)
}

/// Longitude axis of the level-3 fixture grid.
pub fn l3_longitudes() -> Vec<f64> {
    axis(-100.0, 1.0, L3_COLS)
}

fn measurement(shape: Vec<usize>, values: Vec<f64>) -> MemoryVariable {
    MemoryVariable::new(shape, values)
        .expect("fixture values must match shape")
        .with_units(AREAL_DENSITY_UNITS)
        .with_fill_value(FIXTURE_FILL_VALUE)
}

fn matrix(rows: usize, cols: usize, values: Vec<f64>) -> MemoryVariable {
    MemoryVariable::new(vec![rows, cols], values).expect("fixture values must match shape")
}

/// Newer level-3 revision: root coordinate axes, `product` group measurements.
///
/// `values` holds `L3_ROWS * L3_COLS` cells for the single time step.
pub fn level3_granule(source: &str, variable: &str, values: Vec<f64>) -> MemoryGranule {
    MemoryGranule::new(source)
        .with_variable(ContainerPath::Root, "latitude", MemoryVariable::vector(l3_latitudes()))
        .with_variable(ContainerPath::Root, "longitude", MemoryVariable::vector(l3_longitudes()))
        .with_variable(
            ContainerPath::group("product"),
            variable,
            measurement(vec![1, L3_ROWS, L3_COLS], values),
        )
        .with_group("support_data")
}

/// Older revision: `product` measurements with 2-D coordinates in a
/// `geolocation` group (swath geometry).
pub fn level3_geolocation_granule(
    source: &str,
    variable: &str,
    (rows, cols): (usize, usize),
    lats: Vec<f64>,
    lons: Vec<f64>,
    values: Vec<f64>,
) -> MemoryGranule {
    MemoryGranule::new(source)
        .with_variable(
            ContainerPath::group("product"),
            variable,
            measurement(vec![rows, cols], values),
        )
        .with_variable(ContainerPath::group("geolocation"), "latitude", matrix(rows, cols, lats))
        .with_variable(ContainerPath::group("geolocation"), "longitude", matrix(rows, cols, lons))
}

/// Level-2 flat: measurements and 2-D coordinates at the root.
pub fn level2_flat_granule(
    source: &str,
    variable: &str,
    (rows, cols): (usize, usize),
    lats: Vec<f64>,
    lons: Vec<f64>,
    values: Vec<f64>,
) -> MemoryGranule {
    MemoryGranule::new(source)
        .with_variable(ContainerPath::Root, variable, measurement(vec![rows, cols], values))
        .with_variable(ContainerPath::Root, "lat", matrix(rows, cols, lats))
        .with_variable(ContainerPath::Root, "lon", matrix(rows, cols, lons))
}

/// Level-2 alternate: `geophysical_data` measurements, `navigation_data`
/// coordinates.
pub fn alternate_granule(
    source: &str,
    variable: &str,
    (rows, cols): (usize, usize),
    lats: Vec<f64>,
    lons: Vec<f64>,
    values: Vec<f64>,
) -> MemoryGranule {
    MemoryGranule::new(source)
        .with_variable(
            ContainerPath::group("geophysical_data"),
            variable,
            measurement(vec![rows, cols], values),
        )
        .with_variable(ContainerPath::group("navigation_data"), "latitude", matrix(rows, cols, lats))
        .with_variable(ContainerPath::group("navigation_data"), "longitude", matrix(rows, cols, lons))
}

/// Level-3 layout whose product group has no known measurement variable.
pub fn missing_variable_granule(source: &str) -> MemoryGranule {
    MemoryGranule::new(source)
        .with_variable(ContainerPath::Root, "latitude", MemoryVariable::vector(l3_latitudes()))
        .with_variable(ContainerPath::Root, "longitude", MemoryVariable::vector(l3_longitudes()))
        .with_variable(
            ContainerPath::group("product"),
            "main_data_quality_flag",
            matrix(L3_ROWS, L3_COLS, vec![0.0; L3_ROWS * L3_COLS]),
        )
}

/// A file matching no known layout.
pub fn unrecognized_granule(source: &str) -> MemoryGranule {
    MemoryGranule::new(source)
        .with_group("METADATA")
        .with_variable(ContainerPath::Root, "time", MemoryVariable::vector(vec![0.0]))
}
