//! Candidate variable names per (layout, pollutant).
//!
//! Product revisions rename their measurement variables and some reuse a
//! generic name across pollutants, so each entry is an ordered list with the
//! most specific, most recently observed name first. Adding a revision is a
//! data change: extend the built-in table from a YAML document.
//!
//! ```yaml
//! entries:
//!   - layout: level3_nested
//!     pollutant: NO2
//!     names: [vertical_column_troposphere_v2]
//!     mode: prepend        # or "replace"
//! ```

use std::collections::HashMap;
use std::path::Path;

use aq_common::PollutantKind;
use serde::Deserialize;
use tracing::info;

use crate::error::{NetCdfError, NetCdfResult};
use crate::schema::LayoutKind;

/// Key used for pollutants without a dedicated entry.
pub const GENERIC_KEY: &str = "*";

const BUILTIN: &[(LayoutKind, &str, &[&str])] = &[
    (
        LayoutKind::Level3Nested,
        "NO2",
        &[
            "vertical_column_troposphere",
            "vertical_column_total",
            "nitrogen_dioxide_tropospheric_column",
        ],
    ),
    (
        LayoutKind::Level3Nested,
        "HCHO",
        &["formaldehyde_tropospheric_vertical_column", "vertical_column"],
    ),
    (
        LayoutKind::Level3Nested,
        "O3",
        &["column_amount_o3", "ozone_total_vertical_column", "vertical_column"],
    ),
    (LayoutKind::Level3Nested, GENERIC_KEY, &["vertical_column"]),
    (
        LayoutKind::Level2Flat,
        "NO2",
        &[
            "nitrogen_dioxide_tropospheric_column",
            "vertical_column_troposphere",
            "NO2_column",
        ],
    ),
    (
        LayoutKind::Level2Flat,
        "HCHO",
        &["formaldehyde_tropospheric_vertical_column", "HCHO_column", "vertical_column"],
    ),
    (
        LayoutKind::Level2Flat,
        "O3",
        &["ozone_total_vertical_column", "column_amount_o3", "O3_column"],
    ),
    (LayoutKind::Level2Flat, GENERIC_KEY, &["vertical_column"]),
    (
        LayoutKind::Level2NestedAlternate,
        "NO2",
        &["nitrogen_dioxide_tropospheric_column", "NO2_trop_column", "vertical_column"],
    ),
    (
        LayoutKind::Level2NestedAlternate,
        "HCHO",
        &["formaldehyde_tropospheric_vertical_column", "HCHO_column", "vertical_column"],
    ),
    (
        LayoutKind::Level2NestedAlternate,
        "O3",
        &["ozone_total_vertical_column", "total_column_ozone", "column_amount"],
    ),
    (
        LayoutKind::Level2NestedAlternate,
        GENERIC_KEY,
        &["vertical_column", "column_amount"],
    ),
];

/// How a YAML entry combines with the existing list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    #[default]
    Prepend,
    Replace,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    entries: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    layout: LayoutKind,
    pollutant: String,
    names: Vec<String>,
    #[serde(default)]
    mode: MergeMode,
}

/// Lookup table (layout × pollutant → ordered candidate names).
#[derive(Debug, Clone)]
pub struct VariableCatalog {
    entries: HashMap<(LayoutKind, String), Vec<String>>,
}

impl Default for VariableCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl VariableCatalog {
    /// The table of names observed in published product revisions.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(layout, pollutant, names)| {
                (
                    (*layout, pollutant.to_string()),
                    names.iter().map(|n| n.to_string()).collect(),
                )
            })
            .collect();
        Self { entries }
    }

    /// Ordered candidates; pollutants without an entry use the generic list.
    pub fn candidates(&self, layout: LayoutKind, pollutant: &PollutantKind) -> &[String] {
        self.entries
            .get(&(layout, pollutant.as_str().to_string()))
            .or_else(|| self.entries.get(&(layout, GENERIC_KEY.to_string())))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Merge entries from a YAML document into this catalog.
    pub fn merge_yaml(&mut self, yaml: &str) -> NetCdfResult<()> {
        let doc: CatalogDocument = serde_yaml::from_str(yaml)?;
        for entry in doc.entries {
            if entry.names.is_empty() {
                return Err(NetCdfError::Catalog(format!(
                    "entry for {} / {} has no names",
                    entry.layout, entry.pollutant
                )));
            }
            let pollutant = if entry.pollutant == GENERIC_KEY {
                GENERIC_KEY.to_string()
            } else {
                PollutantKind::from(entry.pollutant).as_str().to_string()
            };
            let list = self.entries.entry((entry.layout, pollutant)).or_default();
            match entry.mode {
                MergeMode::Replace => *list = entry.names,
                MergeMode::Prepend => {
                    let mut merged = entry.names;
                    let rest: Vec<String> =
                        list.drain(..).filter(|n| !merged.contains(n)).collect();
                    merged.extend(rest);
                    *list = merged;
                }
            }
        }
        Ok(())
    }

    /// Built-in table extended by a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> NetCdfResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        let mut catalog = Self::builtin();
        catalog.merge_yaml(&yaml)?;
        info!(path = %path.display(), "Loaded variable catalog overrides");
        Ok(catalog)
    }
}
