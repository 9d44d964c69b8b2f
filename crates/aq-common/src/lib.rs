//! Common types shared across the air-quality extraction crates.

pub mod bbox;
pub mod error;
pub mod point;
pub mod pollutant;
pub mod time;

pub use bbox::BoundingBox;
pub use error::{CommonError, CommonResult};
pub use point::GridPoint;
pub use pollutant::PollutantKind;
pub use time::TimeRange;
