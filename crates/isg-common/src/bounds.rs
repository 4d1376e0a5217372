//! Grid extent types and operations.

use serde::{Deserialize, Serialize};

/// Geographic extent of a grid, without spacing.
///
/// Used for manual bound overrides and for padding targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl Extent {
    /// Create a new extent.
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// Parse an extent string: "lat_min,lat_max,lon_min,lon_max"
    pub fn from_extent_string(s: &str) -> Result<Self, ExtentParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(ExtentParseError::InvalidFormat(s.to_string()));
        }

        let parse = |part: &str| {
            part.parse::<f64>()
                .map_err(|_| ExtentParseError::InvalidNumber(part.to_string()))
        };

        let extent = Self {
            lat_min: parse(parts[0])?,
            lat_max: parse(parts[1])?,
            lon_min: parse(parts[2])?,
            lon_max: parse(parts[3])?,
        };

        if !extent.is_finite() {
            return Err(ExtentParseError::NonFinite(s.to_string()));
        }
        if extent.lat_min > extent.lat_max || extent.lon_min > extent.lon_max {
            return Err(ExtentParseError::Inverted(s.to_string()));
        }

        Ok(extent)
    }

    /// True when no coordinate is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        [self.lat_min, self.lat_max, self.lon_min, self.lon_max]
            .iter()
            .all(|v| v.is_finite())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtentParseError {
    #[error("Invalid extent format: {0}. Expected 'lat_min,lat_max,lon_min,lon_max'")]
    InvalidFormat(String),

    #[error("Invalid number in extent: {0}")]
    InvalidNumber(String),

    #[error("Extent has min greater than max: {0}")]
    Inverted(String),

    #[error("Extent values must be finite: {0}")]
    NonFinite(String),
}

/// Extent and spacing of a regular latitude/longitude grid.
///
/// Always in decimal degrees, and min/max denote the centers of the outermost
/// sample rows and columns. Legacy ISG headers store outer cell edges instead;
/// use [`GridBounds::edges_to_centers`] and [`GridBounds::centers_to_edges`]
/// when crossing that boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
    pub delta_lat: f64,
    pub delta_lon: f64,
}

impl GridBounds {
    /// Create new grid bounds.
    pub fn new(
        lat_min: f64,
        lat_max: f64,
        lon_min: f64,
        lon_max: f64,
        delta_lat: f64,
        delta_lon: f64,
    ) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
            delta_lat,
            delta_lon,
        }
    }

    /// The four extent values without spacing.
    pub fn extent(&self) -> Extent {
        Extent::new(self.lat_min, self.lat_max, self.lon_min, self.lon_max)
    }

    /// Replace the extent, keeping the spacing.
    pub fn with_extent(&self, extent: Extent) -> Self {
        Self {
            lat_min: extent.lat_min,
            lat_max: extent.lat_max,
            lon_min: extent.lon_min,
            lon_max: extent.lon_max,
            ..*self
        }
    }

    /// Shift outer-edge bounds inward by half a cell.
    pub fn edges_to_centers(&self) -> Self {
        Self {
            lat_min: self.lat_min + self.delta_lat / 2.0,
            lat_max: self.lat_max - self.delta_lat / 2.0,
            lon_min: self.lon_min + self.delta_lon / 2.0,
            lon_max: self.lon_max - self.delta_lon / 2.0,
            ..*self
        }
    }

    /// Shift cell-center bounds outward by half a cell. Exact inverse of
    /// [`GridBounds::edges_to_centers`].
    pub fn centers_to_edges(&self) -> Self {
        Self {
            lat_min: self.lat_min - self.delta_lat / 2.0,
            lat_max: self.lat_max + self.delta_lat / 2.0,
            lon_min: self.lon_min - self.delta_lon / 2.0,
            lon_max: self.lon_max + self.delta_lon / 2.0,
            ..*self
        }
    }

    /// Latitude span in degrees.
    pub fn height(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// Longitude span in degrees.
    pub fn width(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    /// Spacing actually realised by `nrows` x `ncols` samples across the extent.
    ///
    /// Falls back to the declared delta along an axis with a single sample.
    pub fn effective_spacing(&self, nrows: usize, ncols: usize) -> (f64, f64) {
        let dlat = if nrows > 1 {
            self.height() / (nrows - 1) as f64
        } else {
            self.delta_lat
        };
        let dlon = if ncols > 1 {
            self.width() / (ncols - 1) as f64
        } else {
            self.delta_lon
        };
        (dlat, dlon)
    }

    /// Check if this grid covers the given extent entirely.
    pub fn covers(&self, extent: &Extent) -> bool {
        self.lat_min <= extent.lat_min
            && self.lat_max >= extent.lat_max
            && self.lon_min <= extent.lon_min
            && self.lon_max >= extent.lon_max
    }
}

/// Map a longitude in [-180, 0) onto [180, 360).
pub fn normalize_longitude_360(lon: f64) -> f64 {
    if lon < 0.0 {
        lon + 360.0
    } else {
        lon
    }
}
