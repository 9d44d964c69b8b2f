//! The structured-array file abstraction every pipeline stage reads through.
//!
//! A granule exposes top-level groups and variables, each variable carrying a
//! shape and optional `units` / `_FillValue` attributes. Only one level of
//! grouping is modelled, which covers every product layout we resolve.

use serde::Serialize;

use crate::error::NetCdfResult;

/// Where a variable lives inside a granule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ContainerPath {
    /// Variables declared at the file root.
    Root,
    /// Variables inside a named top-level group.
    Group(String),
}

impl ContainerPath {
    pub fn group(name: impl Into<String>) -> Self {
        ContainerPath::Group(name.into())
    }

    pub fn is_root(&self) -> bool {
        matches!(self, ContainerPath::Root)
    }
}

impl std::fmt::Display for ContainerPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerPath::Root => write!(f, "/"),
            ContainerPath::Group(name) => write!(f, "/{}", name),
        }
    }
}

/// Metadata of a single variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableInfo {
    pub name: String,
    /// Dimension lengths, outermost first.
    pub shape: Vec<usize>,
    pub units: Option<String>,
    pub fill_value: Option<f64>,
}

impl VariableInfo {
    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A fully read variable in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayData {
    pub shape: Vec<usize>,
    pub values: Vec<f64>,
}

impl ArrayData {
    pub fn new(shape: Vec<usize>, values: Vec<f64>) -> Self {
        Self { shape, values }
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }
}

/// Read-only access to one opened granule.
///
/// Implementations release their underlying handle on drop, so a granule
/// scoped to one attempt is closed on every exit path.
pub trait DataFile {
    /// Identifier used in diagnostics (usually the file path).
    fn source(&self) -> &str;

    /// Names of the top-level groups.
    fn group_names(&self) -> NetCdfResult<Vec<String>>;

    /// Names of the variables declared directly in `container`.
    ///
    /// A container that does not exist has no variables.
    fn variable_names(&self, container: &ContainerPath) -> NetCdfResult<Vec<String>>;

    /// Metadata for one variable, `None` when it is not declared there.
    fn variable_info(
        &self,
        container: &ContainerPath,
        name: &str,
    ) -> NetCdfResult<Option<VariableInfo>>;

    /// Read every value of a variable as `f64`.
    fn read_array(&self, container: &ContainerPath, name: &str) -> NetCdfResult<ArrayData>;

    /// Read the single value at a full multi-dimensional index.
    fn read_value(&self, container: &ContainerPath, name: &str, index: &[usize])
        -> NetCdfResult<f64>;

    fn has_group(&self, name: &str) -> NetCdfResult<bool> {
        Ok(self.group_names()?.iter().any(|g| g == name))
    }

    fn has_variable(&self, container: &ContainerPath, name: &str) -> NetCdfResult<bool> {
        Ok(self.variable_names(container)?.iter().any(|v| v == name))
    }
}

/// Row-major flat offset of `index` within `shape`, `None` when out of bounds.
pub fn flat_offset(shape: &[usize], index: &[usize]) -> Option<usize> {
    if shape.len() != index.len() {
        return None;
    }
    let mut offset = 0usize;
    for (&dim, &i) in shape.iter().zip(index) {
        if i >= dim {
            return None;
        }
        offset = offset * dim + i;
    }
    Some(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_offset() {
        assert_eq!(flat_offset(&[2, 3, 4], &[0, 0, 0]), Some(0));
        assert_eq!(flat_offset(&[2, 3, 4], &[1, 2, 3]), Some(23));
        assert_eq!(flat_offset(&[3, 3], &[1, 1]), Some(4));
        assert_eq!(flat_offset(&[3, 3], &[3, 0]), None);
        assert_eq!(flat_offset(&[3, 3], &[1]), None);
    }

    #[test]
    fn test_container_display() {
        assert_eq!(ContainerPath::Root.to_string(), "/");
        assert_eq!(ContainerPath::group("product").to_string(), "/product");
    }
}
