//! Variable location: pick the measurement variable for a pollutant from the
//! resolved layout's measurement container.

use aq_common::PollutantKind;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::catalog::VariableCatalog;
use crate::error::NetCdfError;
use crate::file::{ContainerPath, DataFile, VariableInfo};
use crate::schema::SchemaLayout;

/// The variable chosen for extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocatedVariable {
    pub container: ContainerPath,
    pub info: VariableInfo,
    /// Candidates tried before (and including) the match.
    pub probed: Vec<String>,
}

impl LocatedVariable {
    pub fn name(&self) -> &str {
        &self.info.name
    }
}

/// No candidate matched, or the container could not be listed.
#[derive(Debug, Error)]
pub enum LocateFailure {
    #[error("none of {probed:?} found in {container} (available: {available:?})")]
    NotFound {
        container: String,
        probed: Vec<String>,
        available: Vec<String>,
    },

    #[error(transparent)]
    Read(#[from] NetCdfError),
}

/// Return the first catalog candidate declared in the measurement container.
pub fn locate(
    file: &dyn DataFile,
    layout: &SchemaLayout,
    pollutant: &PollutantKind,
    catalog: &VariableCatalog,
) -> Result<LocatedVariable, LocateFailure> {
    let container = &layout.measurement;
    let mut probed = Vec::new();

    for name in catalog.candidates(layout.kind, pollutant) {
        probed.push(name.clone());
        if let Some(info) = file.variable_info(container, name)? {
            debug!(
                file = %file.source(),
                pollutant = %pollutant,
                variable = %name,
                "Located measurement variable"
            );
            return Ok(LocatedVariable {
                container: container.clone(),
                info,
                probed,
            });
        }
    }

    Err(LocateFailure::NotFound {
        container: container.to_string(),
        probed,
        available: file.variable_names(container)?,
    })
}
