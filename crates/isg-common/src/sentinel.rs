//! No-data sentinel handling.

/// Canonical no-data value written into padded or unreachable cells.
pub const NODATA: f64 = -9999.0;

/// Any sample at or below this value is treated as missing.
pub const NODATA_THRESHOLD: f64 = -9000.0;

/// Check whether a grid sample marks a missing value.
#[inline]
pub fn is_nodata(value: f64) -> bool {
    value.is_nan() || value <= NODATA_THRESHOLD
}
