//! Write a small level-3 style granule with the netcdf crate and read it back
//! through `NetCdfGranule`.

use std::path::Path;

use aq_common::PollutantKind;
use tempo_parser::{
    describe, locate, resolve, ContainerPath, DataFile, LayoutKind, NetCdfError, NetCdfGranule,
    VariableCatalog,
};

const FILL: f32 = -1.0e30;
const UNITS: &str = "molecules/cm^2";

/// Root `latitude[3]` / `longitude[4]` axes (f32), `product` group holding
/// `vertical_column_troposphere[time, latitude, longitude]`.
fn write_level3(path: &Path) -> Result<(), netcdf::Error> {
    let mut file = netcdf::create(path)?;

    file.add_dimension("time", 1)?;
    file.add_dimension("latitude", 3)?;
    file.add_dimension("longitude", 4)?;

    {
        let mut lat = file.add_variable::<f32>("latitude", &["latitude"])?;
        lat.put_attribute("units", "degrees_north")?;
        lat.put_values(&[30.0f32, 30.5, 31.0], ..)?;
    }
    {
        let mut lon = file.add_variable::<f32>("longitude", &["longitude"])?;
        lon.put_attribute("units", "degrees_east")?;
        lon.put_values(&[-100.0f32, -99.5, -99.0, -98.5], ..)?;
    }

    let mut product = file.add_group("product")?;
    let mut var = product.add_variable::<f32>(
        "vertical_column_troposphere",
        &["time", "latitude", "longitude"],
    )?;
    var.put_attribute("units", UNITS)?;
    var.put_attribute("_FillValue", FILL)?;
    let values: Vec<f32> = (0..12).map(|i| (i + 1) as f32 * 1.0e15).collect();
    var.put_values(&values, ..)?;

    Ok(())
}

fn granule() -> (tempfile::TempDir, NetCdfGranule) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("TEMPO_NO2_L3_synthetic.nc");
    write_level3(&path).expect("write netCDF fixture");
    let granule = NetCdfGranule::open(&path).expect("open netCDF fixture");
    (dir, granule)
}

#[test]
fn test_resolve_and_locate_written_granule() {
    let (_dir, g) = granule();

    assert_eq!(g.group_names().unwrap(), vec!["product"]);

    let layout = resolve(&g).unwrap();
    assert_eq!(layout.kind, LayoutKind::Level3Nested);
    assert_eq!(layout.measurement, ContainerPath::group("product"));
    assert_eq!(layout.coordinates.container, ContainerPath::Root);
    assert_eq!(layout.coordinates.latitude, "latitude");

    let found = locate(&g, &layout, &PollutantKind::No2, &VariableCatalog::builtin()).unwrap();
    assert_eq!(found.name(), "vertical_column_troposphere");
    assert_eq!(found.info.shape, vec![1, 3, 4]);
    assert_eq!(found.info.units.as_deref(), Some(UNITS));
    assert_eq!(found.info.fill_value, Some(FILL as f64));
}

#[test]
fn test_f32_axes_widen_to_f64() {
    let (_dir, g) = granule();

    let lat = g.read_array(&ContainerPath::Root, "latitude").unwrap();
    assert_eq!(lat.shape, vec![3]);
    assert_eq!(lat.values, vec![30.0, 30.5, 31.0]);

    let lon = g.read_array(&ContainerPath::Root, "longitude").unwrap();
    assert_eq!(lon.values, vec![-100.0, -99.5, -99.0, -98.5]);
}

#[test]
fn test_read_value_and_bounds() {
    let (_dir, g) = granule();
    let product = ContainerPath::group("product");

    // row 1, col 2 -> flat cell 6 -> 7e15
    let v = g
        .read_value(&product, "vertical_column_troposphere", &[0, 1, 2])
        .unwrap();
    assert_eq!(v, 7.0e15f32 as f64);

    let full = g.read_array(&product, "vertical_column_troposphere").unwrap();
    assert_eq!(full.values.len(), 12);
    assert_eq!(full.values[6], v);

    assert!(matches!(
        g.read_value(&product, "vertical_column_troposphere", &[0, 3, 0]),
        Err(NetCdfError::InvalidFormat(_))
    ));
    assert!(matches!(
        g.read_value(&product, "no_such_variable", &[0, 0, 0]),
        Err(NetCdfError::MissingData(_))
    ));
}

#[test]
fn test_missing_group_and_variable_are_absent() {
    let (_dir, g) = granule();
    let support = ContainerPath::group("support_data");

    assert!(g.variable_names(&support).unwrap().is_empty());
    assert!(g.variable_info(&support, "latitude").unwrap().is_none());
    assert!(!g.has_group("support_data").unwrap());

    let root = g.variable_info(&ContainerPath::Root, "latitude").unwrap().unwrap();
    assert_eq!(root.units.as_deref(), Some("degrees_north"));
    assert_eq!(root.fill_value, None);
}

#[test]
fn test_describe_written_granule() {
    let (_dir, g) = granule();
    let tree = describe(&g).unwrap();
    assert!(tree.containers.iter().any(|c| c.path == "/product"));
    assert!(tree.to_string().contains("vertical_column_troposphere"));
}
