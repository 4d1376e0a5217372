//! Output format names.

use std::str::FromStr;

use isg_format::IsgVersion;

use crate::error::ExportError;

/// A target file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// ISG text of the given version.
    Isg(IsgVersion),
    /// `LAT,LON,N` rows of valid samples.
    Csv,
    /// Legacy text grid: six header lines then one value per line.
    Gsf,
    /// Packed little-endian binary grid.
    Gem,
    /// Tab-separated bounds line then fixed-width rows.
    Gri,
    /// Georeferenced raster, written by an external backend.
    Tif,
}

impl OutputFormat {
    /// Every format, ISG versions oldest first.
    pub const ALL: [OutputFormat; 8] = [
        OutputFormat::Isg(IsgVersion::V1_0),
        OutputFormat::Isg(IsgVersion::V1_01),
        OutputFormat::Isg(IsgVersion::V2_0),
        OutputFormat::Csv,
        OutputFormat::Gsf,
        OutputFormat::Gem,
        OutputFormat::Gri,
        OutputFormat::Tif,
    ];

    /// Export name, e.g. `isg1.01` or `gsf`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Isg(IsgVersion::V1_0) => "isg1.0",
            Self::Isg(IsgVersion::V1_01) => "isg1.01",
            Self::Isg(IsgVersion::V2_0) => "isg2.00",
            Self::Csv => "csv",
            Self::Gsf => "gsf",
            Self::Gem => "gem",
            Self::Gri => "gri",
            Self::Tif => "tif",
        }
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Isg(_) => "isg",
            Self::Csv => "csv",
            Self::Gsf => "gsf",
            Self::Gem => "gem",
            Self::Gri => "gri",
            Self::Tif => "tif",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ExportError;

    /// Parse an export name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "isg1.0" | "isg1.00" => Ok(Self::Isg(IsgVersion::V1_0)),
            "isg1.01" => Ok(Self::Isg(IsgVersion::V1_01)),
            "isg2.0" | "isg2.00" => Ok(Self::Isg(IsgVersion::V2_0)),
            "csv" => Ok(Self::Csv),
            "gsf" => Ok(Self::Gsf),
            "gem" => Ok(Self::Gem),
            "gri" => Ok(Self::Gri),
            "tif" | "tiff" => Ok(Self::Tif),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
