//! In-memory granules.
//!
//! Used for synthetic data and as the fixture backend in tests. Behaves like
//! `NetCdfGranule`: missing containers have no variables, out-of-range
//! indices are format errors, and a variable can be marked unreadable to
//! simulate a file that breaks mid-read.

use std::collections::BTreeMap;

use crate::error::{NetCdfError, NetCdfResult};
use crate::file::{flat_offset, ArrayData, ContainerPath, DataFile, VariableInfo};

/// One variable held in memory.
#[derive(Debug, Clone)]
pub struct MemoryVariable {
    shape: Vec<usize>,
    values: Vec<f64>,
    units: Option<String>,
    fill_value: Option<f64>,
    unreadable: bool,
}

impl MemoryVariable {
    /// Create a variable; `values` must hold `shape.product()` elements.
    pub fn new(shape: Vec<usize>, values: Vec<f64>) -> NetCdfResult<Self> {
        let expected: usize = shape.iter().product();
        if values.len() != expected {
            return Err(NetCdfError::InvalidFormat(format!(
                "shape {:?} needs {} values, got {}",
                shape,
                expected,
                values.len()
            )));
        }
        Ok(Self {
            shape,
            values,
            units: None,
            fill_value: None,
            unreadable: false,
        })
    }

    /// Convenience for 1-D variables.
    pub fn vector(values: Vec<f64>) -> Self {
        Self {
            shape: vec![values.len()],
            values,
            units: None,
            fill_value: None,
            unreadable: false,
        }
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn with_fill_value(mut self, fill_value: f64) -> Self {
        self.fill_value = Some(fill_value);
        self
    }

    /// Metadata stays visible but every read fails.
    pub fn unreadable(mut self) -> Self {
        self.unreadable = true;
        self
    }
}

/// An in-memory granule.
#[derive(Debug, Clone, Default)]
pub struct MemoryGranule {
    source: String,
    groups: Vec<String>,
    variables: BTreeMap<ContainerPath, BTreeMap<String, MemoryVariable>>,
}

impl MemoryGranule {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    /// Declare an (initially empty) top-level group.
    pub fn with_group(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.groups.contains(&name) {
            self.groups.push(name);
        }
        self
    }

    /// Add a variable, declaring its group if needed.
    pub fn with_variable(
        mut self,
        container: ContainerPath,
        name: impl Into<String>,
        variable: MemoryVariable,
    ) -> Self {
        if let ContainerPath::Group(group) = &container {
            if !self.groups.contains(group) {
                self.groups.push(group.clone());
            }
        }
        self.variables
            .entry(container)
            .or_default()
            .insert(name.into(), variable);
        self
    }

    fn variable(&self, container: &ContainerPath, name: &str) -> NetCdfResult<&MemoryVariable> {
        let var = self
            .variables
            .get(container)
            .and_then(|vars| vars.get(name))
            .ok_or_else(|| {
                NetCdfError::MissingData(format!("variable {} in {}", name, container))
            })?;
        if var.unreadable {
            return Err(NetCdfError::read_failed(name, "HDF error while reading data"));
        }
        Ok(var)
    }
}

impl DataFile for MemoryGranule {
    fn source(&self) -> &str {
        &self.source
    }

    fn group_names(&self) -> NetCdfResult<Vec<String>> {
        Ok(self.groups.clone())
    }

    fn variable_names(&self, container: &ContainerPath) -> NetCdfResult<Vec<String>> {
        Ok(self
            .variables
            .get(container)
            .map(|vars| vars.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn variable_info(
        &self,
        container: &ContainerPath,
        name: &str,
    ) -> NetCdfResult<Option<VariableInfo>> {
        Ok(self
            .variables
            .get(container)
            .and_then(|vars| vars.get(name))
            .map(|var| VariableInfo {
                name: name.to_string(),
                shape: var.shape.clone(),
                units: var.units.clone(),
                fill_value: var.fill_value,
            }))
    }

    fn read_array(&self, container: &ContainerPath, name: &str) -> NetCdfResult<ArrayData> {
        let var = self.variable(container, name)?;
        Ok(ArrayData::new(var.shape.clone(), var.values.clone()))
    }

    fn read_value(
        &self,
        container: &ContainerPath,
        name: &str,
        index: &[usize],
    ) -> NetCdfResult<f64> {
        let var = self.variable(container, name)?;
        let offset = flat_offset(&var.shape, index).ok_or_else(|| {
            NetCdfError::InvalidFormat(format!(
                "index {:?} outside shape {:?} of {}",
                index, var.shape, name
            ))
        })?;
        Ok(var.values[offset])
    }
}
