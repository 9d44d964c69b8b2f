//! Granule access and schema handling for TEMPO-style satellite products.
//!
//! This crate reads NetCDF-4 (HDF5) granules whose layout varies across
//! product revisions and processing levels. It resolves each opened granule
//! into a typed [`SchemaLayout`] and locates the measurement variable for a
//! pollutant through a declarative [`VariableCatalog`].
//!
//! # Layouts
//!
//! - **Level-3 nested**: a `product` group holds the measurements; the
//!   latitude/longitude axes sit at the root (newer revisions) or in a
//!   `geolocation` group (older revisions).
//! - **Level-2 flat**: everything is declared at the root.
//! - **Level-2 nested alternate**: a geophysical-data style group holds the
//!   measurements, coordinates live in a navigation group.
//!
//! Every stage reads through the [`DataFile`] trait, implemented by
//! [`NetCdfGranule`] for real files and [`MemoryGranule`] for synthetic data.

pub mod catalog;
pub mod error;
pub mod file;
pub mod inspect;
pub mod locator;
pub mod memory;
pub mod native;
pub mod schema;

pub use catalog::{MergeMode, VariableCatalog};
pub use error::{NetCdfError, NetCdfResult};
pub use file::{flat_offset, ArrayData, ContainerPath, DataFile, VariableInfo};
pub use inspect::{describe, StructureTree};
pub use locator::{locate, LocateFailure, LocatedVariable};
pub use memory::{MemoryGranule, MemoryVariable};
pub use native::{silence_hdf5_errors, NetCdfGranule};
pub use schema::{resolve, CoordinateLocation, LayoutKind, ResolutionFailure, SchemaLayout};
