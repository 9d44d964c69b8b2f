//! Structure listing for diagnostics.

use serde::Serialize;

use crate::error::NetCdfResult;
use crate::file::{ContainerPath, DataFile, VariableInfo};

/// Variables of one container.
#[derive(Debug, Clone, Serialize)]
pub struct ContainerSummary {
    pub path: String,
    pub variables: Vec<VariableInfo>,
}

/// Groups and variables of a granule, root first.
#[derive(Debug, Clone, Serialize)]
pub struct StructureTree {
    pub source: String,
    pub containers: Vec<ContainerSummary>,
}

/// List the root and every top-level group with their variables.
pub fn describe(file: &dyn DataFile) -> NetCdfResult<StructureTree> {
    let mut paths = vec![ContainerPath::Root];
    paths.extend(file.group_names()?.into_iter().map(ContainerPath::Group));

    let mut containers = Vec::with_capacity(paths.len());
    for path in paths {
        let mut variables = Vec::new();
        for name in file.variable_names(&path)? {
            if let Some(info) = file.variable_info(&path, &name)? {
                variables.push(info);
            }
        }
        containers.push(ContainerSummary {
            path: path.to_string(),
            variables,
        });
    }

    Ok(StructureTree {
        source: file.source().to_string(),
        containers,
    })
}

impl std::fmt::Display for StructureTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.source)?;
        for container in &self.containers {
            writeln!(f, "  {}", container.path)?;
            for var in &container.variables {
                write!(f, "    {} {:?}", var.name, var.shape)?;
                if let Some(units) = &var.units {
                    write!(f, " [{}]", units)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
