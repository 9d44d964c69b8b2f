//! Layout resolution and variable location over every fixture layout.

use aq_common::PollutantKind;
use tempo_parser::{
    describe, locate, resolve, ContainerPath, DataFile, LayoutKind, LocateFailure,
    ResolutionFailure, VariableCatalog,
};
use test_utils::{
    alternate_granule, areal_density_grid, level2_flat_granule, level3_geolocation_granule,
    level3_granule, missing_variable_granule, swath, unrecognized_granule, L3_COLS, L3_ROWS,
};

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn test_level3_granule_resolves_with_root_axes() {
    let g = level3_granule(
        "TEMPO_NO2_L3_V03.nc",
        "vertical_column_troposphere",
        areal_density_grid(L3_ROWS, L3_COLS),
    );
    let layout = resolve(&g).unwrap();
    assert_eq!(layout.kind, LayoutKind::Level3Nested);
    assert_eq!(layout.measurement, ContainerPath::group("product"));
    assert_eq!(layout.coordinates.container, ContainerPath::Root);
}

#[test]
fn test_old_revision_resolves_with_geolocation_group() {
    let (lats, lons) = swath(3, 3, (30.0, -100.0), 0.1, 0.02);
    let g = level3_geolocation_granule(
        "TEMPO_NO2_L2_V01.nc",
        "vertical_column_troposphere",
        (3, 3),
        lats,
        lons,
        areal_density_grid(3, 3),
    );
    let layout = resolve(&g).unwrap();
    assert_eq!(layout.kind, LayoutKind::Level3Nested);
    assert!(layout.coordinates.is_nested());
}

#[test]
fn test_flat_and_alternate_layouts() {
    let (lats, lons) = swath(2, 2, (40.0, -74.0), 0.1, 0.0);
    let flat = level2_flat_granule(
        "flat.nc",
        "NO2_column",
        (2, 2),
        lats.clone(),
        lons.clone(),
        areal_density_grid(2, 2),
    );
    assert_eq!(resolve(&flat).unwrap().kind, LayoutKind::Level2Flat);

    let alt = alternate_granule(
        "alt.nc",
        "total_column_ozone",
        (2, 2),
        lats,
        lons,
        vec![300.0; 4],
    );
    let layout = resolve(&alt).unwrap();
    assert_eq!(layout.kind, LayoutKind::Level2NestedAlternate);
    assert_eq!(layout.coordinates.container, ContainerPath::group("navigation_data"));
}

#[test]
fn test_unrecognized_granule() {
    let g = unrecognized_granule("junk.nc");
    assert!(matches!(
        resolve(&g),
        Err(ResolutionFailure::Unrecognized { .. })
    ));
}

// =============================================================================
// Location
// =============================================================================

#[test]
fn test_locate_in_each_layout() {
    let catalog = VariableCatalog::builtin();
    let (lats, lons) = swath(2, 2, (40.0, -74.0), 0.1, 0.0);

    let flat = level2_flat_granule(
        "flat.nc",
        "NO2_column",
        (2, 2),
        lats.clone(),
        lons.clone(),
        areal_density_grid(2, 2),
    );
    let layout = resolve(&flat).unwrap();
    let found = locate(&flat, &layout, &PollutantKind::No2, &catalog).unwrap();
    assert_eq!(found.name(), "NO2_column");
    assert_eq!(found.container, ContainerPath::Root);

    let alt = alternate_granule("alt.nc", "total_column_ozone", (2, 2), lats, lons, vec![300.0; 4]);
    let layout = resolve(&alt).unwrap();
    let found = locate(&alt, &layout, &PollutantKind::O3, &catalog).unwrap();
    assert_eq!(found.name(), "total_column_ozone");
    assert_eq!(found.info.units.as_deref(), Some("molecules/cm^2"));
}

#[test]
fn test_missing_variable_diagnostics() {
    let g = missing_variable_granule("empty_product.nc");
    let layout = resolve(&g).unwrap();
    let err = locate(&g, &layout, &PollutantKind::No2, &VariableCatalog::builtin()).unwrap_err();
    match err {
        LocateFailure::NotFound {
            probed, available, ..
        } => {
            assert_eq!(probed.len(), 3);
            assert_eq!(available, vec!["main_data_quality_flag"]);
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_yaml_catalog_adds_new_revision_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.yaml");
    std::fs::write(
        &path,
        "entries:\n  - layout: level3_nested\n    pollutant: HCHO\n    names: [hcho_column_v4]\n",
    )
    .unwrap();

    let catalog = VariableCatalog::from_yaml_file(&path).unwrap();
    let g = level3_granule("hcho.nc", "hcho_column_v4", areal_density_grid(L3_ROWS, L3_COLS));
    let layout = resolve(&g).unwrap();
    let found = locate(&g, &layout, &PollutantKind::Hcho, &catalog).unwrap();
    assert_eq!(found.name(), "hcho_column_v4");
}

// =============================================================================
// Inspection
// =============================================================================

#[test]
fn test_describe_fixture() {
    let g = level3_granule("l3.nc", "vertical_column_troposphere", areal_density_grid(L3_ROWS, L3_COLS));
    let tree = describe(&g).unwrap();
    assert_eq!(tree.source, g.source());
    let product = tree
        .containers
        .iter()
        .find(|c| c.path == "/product")
        .unwrap();
    assert_eq!(product.variables[0].shape, vec![1, L3_ROWS, L3_COLS]);
    assert!(tree.containers.iter().any(|c| c.path == "/support_data"));
}
