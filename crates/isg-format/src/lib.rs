//! Versioned codec for ISG geoid-model grids.
//!
//! Reads and writes ISG 1.0, 1.01 and 2.0 documents. Each version has its
//! own header schema; a parsed file becomes a [`GridModel`] with canonical
//! bounds (decimal degrees, cell centers) and data in north-to-south,
//! west-to-east order, which can then be rendered against any version.
//!
//! # Data flow
//!
//! ```text
//! ISG text
//!      │
//!      ▼
//! header::parse          (schema of the declared version)
//!      │
//!      ▼
//! GridModel::from_document
//!      │
//!      ├─► bounds: DMS → degrees, legacy edges → centers
//!      │
//!      └─► orientation::normalize (2.0 only)
//!               │
//!               ▼
//!          header::write(model, target version)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use isg_format::{GridModel, IsgVersion};
//!
//! let model = GridModel::from_path("geoid.isg")?;
//! let text = model.to_isg_string(IsgVersion::V2_0, "my-tool");
//! ```

pub mod dms;
pub mod error;
pub mod header;
pub mod model;
pub mod orientation;
pub mod pattern;
pub mod schema;
pub mod version;

// Re-export commonly used types at crate root
pub use dms::{deg_to_dms, dms_to_deg, Dms};
pub use error::{IsgError, Result};
pub use header::{HeaderField, ParsedDocument, DEFAULT_GENERATOR};
pub use model::{GridModel, MainHeaderValues};
pub use pattern::{CoordUnit, FormatSpec, NumberPattern};
pub use schema::{FieldSlug, FieldSpec, FormatSchema, Keyword, ValueKind};
pub use version::IsgVersion;
