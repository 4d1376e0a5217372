//! Common types shared across the ISG geoid-grid tooling.

pub mod bounds;
pub mod ordering;
pub mod sentinel;

pub use bounds::{normalize_longitude_360, Extent, ExtentParseError, GridBounds};
pub use ordering::DataOrdering;
pub use sentinel::{is_nodata, NODATA, NODATA_THRESHOLD};
