//! ISG format versions.

use serde::{Deserialize, Serialize};

use crate::error::{IsgError, Result};

/// A supported ISG format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IsgVersion {
    V1_0,
    V1_01,
    V2_0,
}

impl IsgVersion {
    /// All supported versions, oldest first.
    pub const ALL: [IsgVersion; 3] = [IsgVersion::V1_0, IsgVersion::V1_01, IsgVersion::V2_0];

    /// Canonical version string (`"1.0"`, `"1.01"`, `"2.0"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1_0 => "1.0",
            Self::V1_01 => "1.01",
            Self::V2_0 => "2.0",
        }
    }

    /// Parse a declared version.
    ///
    /// The text is read as a decimal number so `1.00`, `2` and `2.00` resolve
    /// to their canonical versions.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| IsgError::UnknownVersion(trimmed.to_string()))?;

        Self::ALL
            .into_iter()
            .find(|v| {
                v.as_str()
                    .parse::<f64>()
                    .map(|known| (known - value).abs() < 1e-9)
                    .unwrap_or(false)
            })
            .ok_or_else(|| IsgError::UnknownVersion(trimmed.to_string()))
    }

    /// Legacy versions store outer cell edges as min/max bounds.
    pub fn stores_cell_edges(&self) -> bool {
        matches!(self, Self::V1_0 | Self::V1_01)
    }

    /// Only version 2.0 declares a data ordering and coordinate units.
    pub fn has_ordering_field(&self) -> bool {
        matches!(self, Self::V2_0)
    }
}

impl std::fmt::Display for IsgVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
