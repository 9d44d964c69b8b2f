//! Native granule access using the netcdf library.
//!
//! TEMPO products are NetCDF-4 (HDF5) files. The netcdf library requires a
//! file path, so granules are opened from the local copy produced by the
//! download collaborator. The handle is closed when `NetCdfGranule` drops.

use std::path::Path;
use std::sync::Once;

use tracing::debug;

use crate::error::{NetCdfError, NetCdfResult};
use crate::file::{flat_offset, ArrayData, ContainerPath, DataFile, VariableInfo};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g. when probing for groups or
/// attributes that don't exist, which schema resolution does constantly).
///
/// Call early in program startup, before any HDF5/NetCDF operations occur.
/// Safe to call multiple times.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// A read-only granule backed by a netcdf file handle.
pub struct NetCdfGranule {
    source: String,
    file: netcdf::File,
}

impl NetCdfGranule {
    /// Open a local granule for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> NetCdfResult<Self> {
        silence_hdf5_errors();

        let path = path.as_ref();
        let source = path.display().to_string();
        let file = netcdf::open(path).map_err(|e| NetCdfError::OpenFailed {
            path: source.clone(),
            message: e.to_string(),
        })?;

        debug!(file = %source, "Opened granule");
        Ok(Self { source, file })
    }

    /// Run `f` on a variable if it is declared in `container`.
    fn with_variable<R>(
        &self,
        container: &ContainerPath,
        name: &str,
        f: impl FnOnce(&netcdf::Variable) -> NetCdfResult<R>,
    ) -> NetCdfResult<Option<R>> {
        match container {
            ContainerPath::Root => match self.file.variable(name) {
                Some(var) => f(&var).map(Some),
                None => Ok(None),
            },
            ContainerPath::Group(group) => {
                let Some(g) = self
                    .file
                    .group(group)
                    .map_err(|e| NetCdfError::read_failed(group.as_str(), e))?
                else {
                    return Ok(None);
                };
                match g.variable(name) {
                    Some(var) => f(&var).map(Some),
                    None => Ok(None),
                }
            }
        }
    }

    fn missing(container: &ContainerPath, name: &str) -> NetCdfError {
        NetCdfError::MissingData(format!("variable {} in {}", name, container))
    }
}

impl DataFile for NetCdfGranule {
    fn source(&self) -> &str {
        &self.source
    }

    fn group_names(&self) -> NetCdfResult<Vec<String>> {
        let groups = self
            .file
            .groups()
            .map_err(|e| NetCdfError::read_failed("groups", e))?;
        Ok(groups.map(|g| g.name()).collect())
    }

    fn variable_names(&self, container: &ContainerPath) -> NetCdfResult<Vec<String>> {
        match container {
            ContainerPath::Root => Ok(self.file.variables().map(|v| v.name()).collect()),
            ContainerPath::Group(group) => {
                let group = self
                    .file
                    .group(group)
                    .map_err(|e| NetCdfError::read_failed(group.as_str(), e))?;
                Ok(group
                    .map(|g| g.variables().map(|v| v.name()).collect())
                    .unwrap_or_default())
            }
        }
    }

    fn variable_info(
        &self,
        container: &ContainerPath,
        name: &str,
    ) -> NetCdfResult<Option<VariableInfo>> {
        self.with_variable(container, name, |var| {
            Ok(VariableInfo {
                name: name.to_string(),
                shape: var.dimensions().iter().map(|d| d.len()).collect(),
                units: get_str_attr(var, "units"),
                fill_value: get_f64_attr(var, "_FillValue"),
            })
        })
    }

    fn read_array(&self, container: &ContainerPath, name: &str) -> NetCdfResult<ArrayData> {
        self.with_variable(container, name, |var| {
            let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
            let values: Vec<f64> = var
                .get_values::<f64, _>(..)
                .map_err(|e| NetCdfError::read_failed(name, e))?;
            Ok(ArrayData::new(shape, values))
        })?
        .ok_or_else(|| Self::missing(container, name))
    }

    fn read_value(
        &self,
        container: &ContainerPath,
        name: &str,
        index: &[usize],
    ) -> NetCdfResult<f64> {
        self.with_variable(container, name, |var| {
            let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
            if flat_offset(&shape, index).is_none() {
                return Err(NetCdfError::InvalidFormat(format!(
                    "index {:?} outside shape {:?} of {}",
                    index, shape, name
                )));
            }
            var.get_value::<f64, _>(index)
                .map_err(|e| NetCdfError::read_failed(name, e))
        })?
        .ok_or_else(|| Self::missing(container, name))
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get a numeric attribute widened to f64.
fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    use netcdf::AttributeValue::*;

    if !has_attr(var, name) {
        return None;
    }
    match var.attribute_value(name)?.ok()? {
        Uchar(v) => Some(v as f64),
        Schar(v) => Some(v as f64),
        Ushort(v) => Some(v as f64),
        Short(v) => Some(v as f64),
        Uint(v) => Some(v as f64),
        Int(v) => Some(v as f64),
        Ulonglong(v) => Some(v as f64),
        Longlong(v) => Some(v as f64),
        Float(v) => Some(v as f64),
        Double(v) => Some(v),
        Floats(v) => v.first().map(|x| *x as f64),
        Doubles(v) => v.first().copied(),
        _ => None,
    }
}

/// Helper to get a string attribute.
fn get_str_attr(var: &netcdf::Variable, name: &str) -> Option<String> {
    if !has_attr(var, name) {
        return None;
    }
    match var.attribute_value(name)?.ok()? {
        netcdf::AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}
