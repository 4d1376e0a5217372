//! Exporters for ISG geoid grids.
//!
//! Takes a normalized [`GridModel`](isg_format::GridModel) and writes it as
//! ISG text of any supported version, CSV, the legacy text grid (GSF), the
//! packed binary grid (GEM) or the tab grid (GRI). Output files are staged
//! in the target directory and renamed into place on success.
//!
//! Clipping, interpolation and raster output are delegated to backends
//! implementing the traits in [`collaborators`].

pub mod atomic;
pub mod collaborators;
pub mod config;
pub mod convert;
pub mod error;
pub mod exporters;
pub mod format;
pub mod pad;

pub use collaborators::{
    clip_model, extent_polygon, interpolate_model, GridClipper, GridInterpolator, GridView,
    InterpolationMethod, RasterWriter, ResampledGrid,
};
pub use config::ExportConfig;
pub use convert::{convert_to, convert_to_raster, output_file_name};
pub use error::{ExportError, Result};
pub use exporters::{exporter_for, export_to_vec, Exporter};
pub use format::OutputFormat;
pub use pad::pad_to_bounds;
