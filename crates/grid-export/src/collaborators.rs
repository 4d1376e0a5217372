//! Interfaces to geometry, interpolation and raster backends.
//!
//! The algorithms live outside this workspace. Backends see a borrowed
//! [`GridView`] and hand back a [`ResampledGrid`], which is committed to the
//! model in one step through [`GridModel::resize`].

use std::path::Path;
use std::str::FromStr;

use isg_common::{is_nodata, Extent, GridBounds};
use isg_format::GridModel;
use tracing::info;

use crate::error::{ExportError, Result};

/// Read-only view of a model handed to backends.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    pub data: &'a [Vec<f64>],
    pub bounds: &'a GridBounds,
    pub is_nodata: fn(f64) -> bool,
}

impl<'a> GridView<'a> {
    pub fn of(model: &'a GridModel) -> Self {
        Self {
            data: model.data(),
            bounds: model.bounds(),
            is_nodata,
        }
    }
}

/// Data and cell-center bounds produced by a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledGrid {
    pub data: Vec<Vec<f64>>,
    pub bounds: GridBounds,
}

/// Resampling method for interpolation backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMethod {
    /// Nearest neighbor.
    Nearest,
    /// Bilinear.
    #[default]
    Linear,
    /// Bicubic.
    Cubic,
}

impl InterpolationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Linear => "linear",
            Self::Cubic => "cubic",
        }
    }
}

impl FromStr for InterpolationMethod {
    type Err = ExportError;

    /// Parse a method name, including the short forms `nn`, `bl` and `bc`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "nearest" | "nn" => Ok(Self::Nearest),
            "linear" | "bl" => Ok(Self::Linear),
            "cubic" | "bc" => Ok(Self::Cubic),
            other => Err(ExportError::config(format!(
                "unknown interpolation method: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Clips a grid to a polygon of `(lon, lat)` vertices.
pub trait GridClipper {
    fn clip(&self, grid: GridView<'_>, polygon: &[(f64, f64)]) -> Result<ResampledGrid>;
}

/// Resamples a grid to new spacing.
pub trait GridInterpolator {
    fn interpolate(
        &self,
        grid: GridView<'_>,
        method: InterpolationMethod,
        delta_lat: f64,
        delta_lon: f64,
    ) -> Result<ResampledGrid>;
}

/// Writes a georeferenced raster image.
pub trait RasterWriter {
    fn write_raster(&self, grid: GridView<'_>, path: &Path) -> Result<()>;
}

/// Closed ring around an extent, `(lon, lat)` counter-clockwise from the
/// south-west corner.
pub fn extent_polygon(extent: &Extent) -> Vec<(f64, f64)> {
    vec![
        (extent.lon_min, extent.lat_min),
        (extent.lon_max, extent.lat_min),
        (extent.lon_max, extent.lat_max),
        (extent.lon_min, extent.lat_max),
        (extent.lon_min, extent.lat_min),
    ]
}

/// Clip a copy of `model`, returning it flagged as a subset.
pub fn clip_model(
    model: &GridModel,
    clipper: &dyn GridClipper,
    polygon: &[(f64, f64)],
) -> Result<GridModel> {
    let grid = clipper.clip(GridView::of(model), polygon)?;
    let mut subset = model.clone();
    subset.resize(grid.data, grid.bounds);
    subset.mark_subset();
    subset.check_dimensions()?;
    info!(
        vertices = polygon.len(),
        nrows = subset.data().len(),
        "Clipped grid model"
    );
    Ok(subset)
}

/// Resample `model` in place.
pub fn interpolate_model(
    model: &mut GridModel,
    interpolator: &dyn GridInterpolator,
    method: InterpolationMethod,
    delta_lat: f64,
    delta_lon: f64,
) -> Result<()> {
    if delta_lat <= 0.0 || delta_lon <= 0.0 {
        return Err(ExportError::config(format!(
            "interpolation steps must be positive (got {}, {})",
            delta_lat, delta_lon
        )));
    }
    let grid = interpolator.interpolate(GridView::of(model), method, delta_lat, delta_lon)?;
    model.resize(grid.data, grid.bounds);
    model.check_dimensions()?;
    info!(%method, delta_lat, delta_lon, "Interpolated grid model");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use isg_format::IsgVersion;

    /// Keeps every other row and column.
    struct Decimate;

    impl GridClipper for Decimate {
        fn clip(&self, grid: GridView<'_>, _polygon: &[(f64, f64)]) -> Result<ResampledGrid> {
            let data: Vec<Vec<f64>> = grid
                .data
                .iter()
                .step_by(2)
                .map(|row| row.iter().copied().step_by(2).collect())
                .collect();
            let mut bounds = *grid.bounds;
            bounds.delta_lat *= 2.0;
            bounds.delta_lon *= 2.0;
            Ok(ResampledGrid { data, bounds })
        }
    }

    struct Failing;

    impl GridInterpolator for Failing {
        fn interpolate(
            &self,
            _grid: GridView<'_>,
            _method: InterpolationMethod,
            _delta_lat: f64,
            _delta_lon: f64,
        ) -> Result<ResampledGrid> {
            Err(ExportError::backend("interpolator", "no coverage"))
        }
    }

    fn model() -> GridModel {
        let bounds = GridBounds::new(40.0, 41.0, 10.0, 11.0, 0.5, 0.5);
        let data = vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, -9999.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ];
        GridModel::from_grid(IsgVersion::V2_0, "CLIP", bounds, data)
    }

    #[test]
    fn test_method_names() {
        for (name, method) in [
            ("nearest", InterpolationMethod::Nearest),
            ("nn", InterpolationMethod::Nearest),
            ("Linear", InterpolationMethod::Linear),
            ("bl", InterpolationMethod::Linear),
            ("cubic", InterpolationMethod::Cubic),
            ("BC", InterpolationMethod::Cubic),
        ] {
            assert_eq!(name.parse::<InterpolationMethod>().unwrap(), method);
        }
        assert!("spline".parse::<InterpolationMethod>().is_err());
        assert_eq!(InterpolationMethod::default().to_string(), "linear");
    }

    #[test]
    fn test_view_sentinel_predicate() {
        let model = model();
        let view = GridView::of(&model);
        assert!((view.is_nodata)(view.data[1][1]));
        assert!(!(view.is_nodata)(view.data[0][0]));
    }

    #[test]
    fn test_clip_model_commits_and_flags_subset() {
        let model = model();
        let polygon = extent_polygon(&model.bounds().extent());
        let subset = clip_model(&model, &Decimate, &polygon).unwrap();

        assert!(subset.is_subset());
        assert!(!model.is_subset());
        assert_eq!(subset.data(), &[vec![1.0, 3.0], vec![7.0, 9.0]]);
        assert_eq!(subset.nrows().unwrap(), 2);
        assert_eq!(subset.ncols().unwrap(), 2);
        assert!((subset.bounds().delta_lat - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_backend_failure_leaves_model_untouched() {
        let mut model = model();
        let before = model.clone();
        let result = interpolate_model(&mut model, &Failing, InterpolationMethod::Cubic, 0.1, 0.1);

        assert!(matches!(result, Err(ExportError::Backend { .. })));
        assert_eq!(model, before);
    }

    #[test]
    fn test_non_positive_step_rejected() {
        let mut model = model();
        assert!(matches!(
            interpolate_model(&mut model, &Failing, InterpolationMethod::Nearest, 0.0, 0.1),
            Err(ExportError::Config(_))
        ));
    }

    #[test]
    fn test_extent_polygon_is_closed() {
        let polygon = extent_polygon(&Extent::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(polygon.len(), 5);
        assert_eq!(polygon.first(), polygon.last());
        assert_eq!(polygon[1], (4.0, 1.0));
    }
}
