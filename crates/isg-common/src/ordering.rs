//! Row/column traversal conventions for grid data.

use serde::{Deserialize, Serialize};

/// Order in which samples are laid out in a grid's data block.
///
/// The canonical in-memory convention is [`DataOrdering::NorthToSouthWestToEast`]:
/// the first row is the northernmost and each row runs west to east.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DataOrdering {
    #[default]
    NorthToSouthWestToEast,
    NorthToSouthEastToWest,
    SouthToNorthWestToEast,
    SouthToNorthEastToWest,
}

impl DataOrdering {
    /// All conventions, canonical first.
    pub const ALL: [DataOrdering; 4] = [
        DataOrdering::NorthToSouthWestToEast,
        DataOrdering::NorthToSouthEastToWest,
        DataOrdering::SouthToNorthWestToEast,
        DataOrdering::SouthToNorthEastToWest,
    ];

    /// Header phrase for this convention, e.g. `N-to-S, W-to-E`.
    pub fn as_phrase(&self) -> &'static str {
        match self {
            Self::NorthToSouthWestToEast => "N-to-S, W-to-E",
            Self::NorthToSouthEastToWest => "N-to-S, E-to-W",
            Self::SouthToNorthWestToEast => "S-to-N, W-to-E",
            Self::SouthToNorthEastToWest => "S-to-N, E-to-W",
        }
    }

    /// Parse a header phrase. Whitespace and case are ignored.
    pub fn from_phrase(phrase: &str) -> Option<Self> {
        let compact: String = phrase
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();

        Self::ALL.into_iter().find(|ordering| {
            ordering
                .as_phrase()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_ascii_uppercase()
                == compact
        })
    }

    /// Rows are stored south first and must be reversed to reach canonical order.
    pub fn reverse_rows(&self) -> bool {
        matches!(
            self,
            Self::SouthToNorthWestToEast | Self::SouthToNorthEastToWest
        )
    }

    /// Columns are stored east first and must be reversed to reach canonical order.
    pub fn reverse_cols(&self) -> bool {
        matches!(
            self,
            Self::NorthToSouthEastToWest | Self::SouthToNorthEastToWest
        )
    }

    /// Check if this is the canonical in-memory convention.
    pub fn is_canonical(&self) -> bool {
        *self == Self::NorthToSouthWestToEast
    }
}

impl std::fmt::Display for DataOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_phrase())
    }
}
