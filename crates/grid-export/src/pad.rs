//! Growing a grid to cover a requested extent.

use isg_common::{Extent, NODATA};
use isg_format::GridModel;
use tracing::debug;

use crate::error::{ExportError, Result};

/// Tolerance in grid steps before another row or column is added.
const STEP_TOLERANCE: f64 = 1e-9;

/// Most rows or columns added on one side: a full circle at one arc-second.
const MAX_PAD_STEPS: usize = 360 * 3600;

/// Upper bound on the padded grid size, in cells.
const MAX_PADDED_CELLS: usize = 1 << 30;

/// Whole grid steps needed to move an edge across `gap` degrees.
fn steps(gap: f64, delta: f64) -> Result<usize> {
    if gap <= 0.0 {
        return Ok(0);
    }
    let count = (gap / delta - STEP_TOLERANCE).ceil().max(0.0);
    if !count.is_finite() || count > MAX_PAD_STEPS as f64 {
        return Err(ExportError::config(format!(
            "padding {} degrees at spacing {} needs {} steps, limit is {}",
            gap, delta, count, MAX_PAD_STEPS
        )));
    }
    Ok(count as usize)
}

/// Pad `model` with sentinel rows and columns, one grid step at a time on
/// each side, until its bounds cover `target`.
///
/// Bounds, data and dimension fields are updated together. Returns whether
/// anything was added.
pub fn pad_to_bounds(model: &mut GridModel, target: &Extent) -> Result<bool> {
    if !target.is_finite() {
        return Err(ExportError::config(format!(
            "cannot pad to a non-finite extent {:?}",
            target
        )));
    }
    let mut bounds = *model.bounds();
    if bounds.delta_lat <= 0.0 || bounds.delta_lon <= 0.0 {
        return Err(ExportError::config(format!(
            "cannot pad a grid with non-positive spacing ({}, {})",
            bounds.delta_lat, bounds.delta_lon
        )));
    }
    if bounds.covers(target) {
        return Ok(false);
    }

    let south = steps(bounds.lat_min - target.lat_min, bounds.delta_lat)?;
    let north = steps(target.lat_max - bounds.lat_max, bounds.delta_lat)?;
    let west = steps(bounds.lon_min - target.lon_min, bounds.delta_lon)?;
    let east = steps(target.lon_max - bounds.lon_max, bounds.delta_lon)?;

    if south + north + west + east == 0 {
        return Ok(false);
    }

    let nrows = model.data().len() + north + south;
    let ncols = model.data().first().map(Vec::len).unwrap_or(0) + west + east;
    match nrows.checked_mul(ncols) {
        Some(cells) if cells <= MAX_PADDED_CELLS => {}
        _ => {
            return Err(ExportError::config(format!(
                "padded grid of {} x {} cells exceeds the limit of {} cells",
                nrows, ncols, MAX_PADDED_CELLS
            )))
        }
    }

    let mut data = Vec::with_capacity(nrows);
    data.extend(std::iter::repeat_with(|| vec![NODATA; ncols]).take(north));
    for row in model.data() {
        let mut padded = Vec::with_capacity(ncols);
        padded.extend(std::iter::repeat(NODATA).take(west));
        padded.extend_from_slice(row);
        padded.extend(std::iter::repeat(NODATA).take(east));
        data.push(padded);
    }
    data.extend(std::iter::repeat_with(|| vec![NODATA; ncols]).take(south));

    bounds.lat_min -= bounds.delta_lat * south as f64;
    bounds.lat_max += bounds.delta_lat * north as f64;
    bounds.lon_min -= bounds.delta_lon * west as f64;
    bounds.lon_max += bounds.delta_lon * east as f64;

    debug!(north, south, west, east, "Padded grid to target extent");
    model.resize(data, bounds);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use isg_common::GridBounds;
    use isg_format::IsgVersion;

    fn model() -> GridModel {
        let bounds = GridBounds::new(40.0, 41.0, 10.0, 11.0, 0.5, 1.0);
        let data = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        GridModel::from_grid(IsgVersion::V2_0, "PAD", bounds, data)
    }

    #[test]
    fn test_already_covered() {
        let mut model = model();
        let before = model.clone();
        assert!(!pad_to_bounds(&mut model, &Extent::new(40.2, 40.8, 10.0, 11.0)).unwrap());
        assert_eq!(model, before);
    }

    #[test]
    fn test_pads_each_side() {
        let mut model = model();
        let padded = pad_to_bounds(&mut model, &Extent::new(39.6, 41.5, 9.5, 12.0)).unwrap();
        assert!(padded);

        let b = model.bounds();
        assert!((b.lat_min - 39.5).abs() < 1e-12);
        assert!((b.lat_max - 41.5).abs() < 1e-12);
        assert!((b.lon_min - 9.0).abs() < 1e-12);
        assert!((b.lon_max - 12.0).abs() < 1e-12);

        // one row north, one south; one column west, one east
        assert_eq!(model.data().len(), 5);
        assert_eq!(model.ncols().unwrap(), 4);
        assert!(model.check_dimensions().is_ok());
        assert!(model.data()[0].iter().all(|v| *v == NODATA));
        assert_eq!(model.data()[1], vec![NODATA, 1.0, 2.0, NODATA]);
        assert!(model.data()[4].iter().all(|v| *v == NODATA));
    }

    #[test]
    fn test_covered_within_tolerance() {
        let mut model = model();
        let target = Extent::new(40.0 - 1e-12, 41.0, 10.0, 11.0);
        assert!(!pad_to_bounds(&mut model, &target).unwrap());
        assert_eq!(model.data().len(), 3);
    }

    #[test]
    fn test_non_finite_target_rejected() {
        let targets = [
            Extent::new(f64::NEG_INFINITY, f64::INFINITY, 0.0, 1.0),
            Extent::new(40.0, 41.0, f64::NAN, 11.0),
        ];
        for target in targets {
            let mut model = model();
            let before = model.clone();
            let result = pad_to_bounds(&mut model, &target);
            assert!(matches!(result, Err(ExportError::Config(_))), "{:?}", result);
            assert_eq!(model, before);
        }
    }

    #[test]
    fn test_implausible_padding_rejected() {
        let mut model = model();
        let result = pad_to_bounds(&mut model, &Extent::new(-1e12, 41.0, 10.0, 11.0));
        assert!(matches!(result, Err(ExportError::Config(_))));

        // each side within the step limit, but too many cells overall
        let huge = Extent::new(-600_000.0, 600_041.0, -600_000.0, 600_011.0);
        let result = pad_to_bounds(&mut model, &huge);
        assert!(matches!(result, Err(ExportError::Config(_))));
        assert_eq!(model.data().len(), 3);
    }

    #[test]
    fn test_exact_multiple_adds_no_extra_step() {
        let mut model = model();
        pad_to_bounds(&mut model, &Extent::new(39.0, 41.0, 10.0, 11.0)).unwrap();
        assert_eq!(model.data().len(), 5);
        assert!((model.bounds().lat_min - 39.0).abs() < 1e-12);
    }
}
