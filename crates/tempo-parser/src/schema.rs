//! Schema resolution: decide once per granule where the measurement group
//! and the coordinate arrays live.
//!
//! Product revisions disagree on layout:
//!
//! ```text
//! level-3 nested (new)   level-3 nested (old)   level-2 flat        level-2 alternate
//! /latitude              /product/...           /latitude           /geophysical_data/...
//! /longitude             /geolocation/latitude  /longitude          /navigation_data/latitude
//! /product/...           /geolocation/longitude /<measurements>     /navigation_data/longitude
//! ```
//!
//! Resolution either yields a fully populated [`SchemaLayout`] or fails with
//! the list of what was inspected. Downstream stages work only from the
//! descriptor and never re-probe the file on their own.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::NetCdfError;
use crate::file::{ContainerPath, DataFile};

/// Accepted latitude variable names, most common first.
pub const LATITUDE_NAMES: &[&str] = &["latitude", "lat", "Latitude"];
/// Accepted longitude variable names, most common first.
pub const LONGITUDE_NAMES: &[&str] = &["longitude", "lon", "Longitude"];

/// Measurement containers tried when no product group exists, in priority order.
pub const ALTERNATE_MEASUREMENT_GROUPS: &[&str] =
    &["geophysical_data", "science_data", "data_fields"];

/// Coordinate containers tried for the alternate layout after the root.
pub const ALTERNATE_COORDINATE_GROUPS: &[&str] =
    &["navigation_data", "geolocation_data", "geolocation"];

/// Layout discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// A `product` group holds the measurements.
    Level3Nested,
    /// Measurements and coordinates are declared at the root.
    Level2Flat,
    /// Measurements live in a geophysical-data style group.
    Level2NestedAlternate,
}

impl LayoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::Level3Nested => "level3_nested",
            LayoutKind::Level2Flat => "level2_flat",
            LayoutKind::Level2NestedAlternate => "level2_nested_alternate",
        }
    }
}

impl std::fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the coordinate arrays were found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoordinateLocation {
    pub container: ContainerPath,
    pub latitude: String,
    pub longitude: String,
}

impl CoordinateLocation {
    /// True when the arrays came from a nested group (older revisions).
    pub fn is_nested(&self) -> bool {
        !self.container.is_root()
    }
}

/// Resolved layout for one opened granule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaLayout {
    pub kind: LayoutKind,
    pub measurement: ContainerPath,
    pub coordinates: CoordinateLocation,
}

/// Resolution failed.
#[derive(Debug, Error)]
pub enum ResolutionFailure {
    #[error("no known layout matched (groups inspected: {groups_inspected:?}, root variables: {variables_inspected:?})")]
    Unrecognized {
        groups_inspected: Vec<String>,
        variables_inspected: Vec<String>,
    },

    #[error("measurement group {measurement} found but no latitude/longitude pair in {coordinate_containers:?}")]
    MissingCoordinates {
        measurement: String,
        coordinate_containers: Vec<String>,
    },

    #[error(transparent)]
    Read(#[from] NetCdfError),
}

/// Classify the layout of an opened granule.
pub fn resolve(file: &dyn DataFile) -> Result<SchemaLayout, ResolutionFailure> {
    let groups = file.group_names()?;

    if let Some(product) = find_product_group(&groups) {
        let measurement = ContainerPath::group(product);
        // Root first: coordinates at the root belong to the newer revision.
        let mut searched = vec![ContainerPath::Root];
        searched.extend(
            groups
                .iter()
                .filter(|g| g.to_lowercase().contains("geolocation"))
                .map(|g| ContainerPath::group(g.as_str())),
        );
        let coordinates = find_coordinates(file, &searched)?.ok_or_else(|| {
            ResolutionFailure::MissingCoordinates {
                measurement: measurement.to_string(),
                coordinate_containers: searched.iter().map(|c| c.to_string()).collect(),
            }
        })?;
        return Ok(finish(file, LayoutKind::Level3Nested, measurement, coordinates));
    }

    if let Some(coordinates) = find_coordinates(file, &[ContainerPath::Root])? {
        return Ok(finish(
            file,
            LayoutKind::Level2Flat,
            ContainerPath::Root,
            coordinates,
        ));
    }

    for candidate in ALTERNATE_MEASUREMENT_GROUPS {
        let Some(group) = groups.iter().find(|g| g.eq_ignore_ascii_case(candidate)) else {
            continue;
        };
        let measurement = ContainerPath::group(group.as_str());
        let mut searched = vec![ContainerPath::Root];
        for coord_group in ALTERNATE_COORDINATE_GROUPS {
            if let Some(found) = groups.iter().find(|g| g.eq_ignore_ascii_case(coord_group)) {
                searched.push(ContainerPath::group(found.as_str()));
            }
        }
        // The measurement group itself sometimes carries the coordinates.
        searched.push(measurement.clone());

        let coordinates = find_coordinates(file, &searched)?.ok_or_else(|| {
            ResolutionFailure::MissingCoordinates {
                measurement: measurement.to_string(),
                coordinate_containers: searched.iter().map(|c| c.to_string()).collect(),
            }
        })?;
        return Ok(finish(
            file,
            LayoutKind::Level2NestedAlternate,
            measurement,
            coordinates,
        ));
    }

    Err(ResolutionFailure::Unrecognized {
        groups_inspected: groups,
        variables_inspected: file.variable_names(&ContainerPath::Root)?,
    })
}

fn finish(
    file: &dyn DataFile,
    kind: LayoutKind,
    measurement: ContainerPath,
    coordinates: CoordinateLocation,
) -> SchemaLayout {
    debug!(
        file = %file.source(),
        layout = %kind,
        measurement = %measurement,
        coordinates = %coordinates.container,
        "Resolved granule layout"
    );
    SchemaLayout {
        kind,
        measurement,
        coordinates,
    }
}

fn find_product_group(groups: &[String]) -> Option<&str> {
    groups
        .iter()
        .find(|g| g.eq_ignore_ascii_case("product"))
        .or_else(|| groups.iter().find(|g| g.to_lowercase().contains("product")))
        .map(String::as_str)
}

/// First container declaring both a latitude and a longitude variable.
fn find_coordinates(
    file: &dyn DataFile,
    containers: &[ContainerPath],
) -> Result<Option<CoordinateLocation>, NetCdfError> {
    for container in containers {
        let names = file.variable_names(container)?;
        let lat = LATITUDE_NAMES.iter().find(|n| names.iter().any(|v| v == *n));
        let lon = LONGITUDE_NAMES.iter().find(|n| names.iter().any(|v| v == *n));
        if let (Some(lat), Some(lon)) = (lat, lon) {
            return Ok(Some(CoordinateLocation {
                container: container.clone(),
                latitude: lat.to_string(),
                longitude: lon.to_string(),
            }));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryGranule, MemoryVariable};

    fn coords(granule: MemoryGranule, container: ContainerPath) -> MemoryGranule {
        granule
            .with_variable(container.clone(), "latitude", MemoryVariable::vector(vec![0.0]))
            .with_variable(container, "longitude", MemoryVariable::vector(vec![0.0]))
    }

    #[test]
    fn test_level3_root_coordinates() {
        let g = coords(MemoryGranule::new("l3").with_group("product"), ContainerPath::Root);
        let layout = resolve(&g).unwrap();
        assert_eq!(layout.kind, LayoutKind::Level3Nested);
        assert_eq!(layout.measurement, ContainerPath::group("product"));
        assert!(!layout.coordinates.is_nested());
    }

    #[test]
    fn test_level3_prefers_root_over_geolocation() {
        let g = coords(
            coords(MemoryGranule::new("both").with_group("product"), ContainerPath::Root),
            ContainerPath::group("geolocation"),
        );
        let layout = resolve(&g).unwrap();
        assert_eq!(layout.coordinates.container, ContainerPath::Root);
    }

    #[test]
    fn test_level3_nested_geolocation() {
        let g = coords(
            MemoryGranule::new("old").with_group("product"),
            ContainerPath::group("geolocation"),
        );
        let layout = resolve(&g).unwrap();
        assert_eq!(layout.kind, LayoutKind::Level3Nested);
        assert_eq!(layout.coordinates.container, ContainerPath::group("geolocation"));
        assert!(layout.coordinates.is_nested());
    }

    #[test]
    fn test_product_without_coordinates_fails_outright() {
        let g = MemoryGranule::new("partial").with_group("product");
        assert!(matches!(
            resolve(&g),
            Err(ResolutionFailure::MissingCoordinates { .. })
        ));
    }

    #[test]
    fn test_level2_flat() {
        let g = MemoryGranule::new("flat")
            .with_variable(ContainerPath::Root, "lat", MemoryVariable::vector(vec![0.0]))
            .with_variable(ContainerPath::Root, "lon", MemoryVariable::vector(vec![0.0]));
        let layout = resolve(&g).unwrap();
        assert_eq!(layout.kind, LayoutKind::Level2Flat);
        assert_eq!(layout.measurement, ContainerPath::Root);
        assert_eq!(layout.coordinates.latitude, "lat");
    }

    #[test]
    fn test_alternate_group_priority() {
        let g = coords(
            MemoryGranule::new("alt")
                .with_group("science_data")
                .with_group("geophysical_data"),
            ContainerPath::group("navigation_data"),
        );
        let layout = resolve(&g).unwrap();
        assert_eq!(layout.kind, LayoutKind::Level2NestedAlternate);
        assert_eq!(layout.measurement, ContainerPath::group("geophysical_data"));
        assert_eq!(layout.coordinates.container, ContainerPath::group("navigation_data"));
    }

    #[test]
    fn test_unrecognized_lists_inspected() {
        let g = MemoryGranule::new("odd")
            .with_group("METADATA")
            .with_variable(ContainerPath::Root, "time", MemoryVariable::vector(vec![0.0]));
        match resolve(&g) {
            Err(ResolutionFailure::Unrecognized {
                groups_inspected,
                variables_inspected,
            }) => {
                assert_eq!(groups_inspected, vec!["METADATA"]);
                assert_eq!(variables_inspected, vec!["time"]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
