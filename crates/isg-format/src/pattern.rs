//! Numeric rendering patterns for header fields.
//!
//! Every numeric header field carries a fixed-width pattern (for example a
//! width of 18 with 12 decimals in ISG 1.01). Version 2.0 bound fields pick
//! their pattern from the header's coordinate units, and the DMS variant
//! renders three components with one pattern each.

use serde::{Deserialize, Serialize};

use crate::error::{IsgError, Result};

/// Fixed-width rendering of a single number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberPattern {
    /// Minimum field width; values are right-aligned.
    pub width: usize,
    /// Pad with zeros instead of spaces.
    pub zero_pad: bool,
    /// Decimal places. `None` renders an integer.
    pub precision: Option<usize>,
}

impl NumberPattern {
    /// A right-aligned float with `precision` decimals.
    pub const fn fixed(width: usize, precision: usize) -> Self {
        Self {
            width,
            zero_pad: false,
            precision: Some(precision),
        }
    }

    /// A right-aligned integer.
    pub const fn integer(width: usize) -> Self {
        Self {
            width,
            zero_pad: false,
            precision: None,
        }
    }

    /// A zero-padded integer.
    pub const fn zero_padded(width: usize) -> Self {
        Self {
            width,
            zero_pad: true,
            precision: None,
        }
    }

    /// Whether the pattern renders decimals.
    pub fn is_fractional(&self) -> bool {
        self.precision.is_some()
    }

    /// Render a float. Integer patterns truncate toward zero.
    pub fn render_float(&self, value: f64) -> String {
        let width = self.width;
        match (self.precision, self.zero_pad) {
            (Some(precision), false) => format!("{:>width$.precision$}", value),
            (Some(precision), true) => format!("{:0width$.precision$}", value),
            (None, _) => self.render_int(value.trunc() as i64),
        }
    }

    /// Render an integer.
    pub fn render_int(&self, value: i64) -> String {
        let width = self.width;
        match self.precision {
            Some(_) => self.render_float(value as f64),
            None if self.zero_pad => format!("{:0width$}", value),
            None => format!("{:>width$}", value),
        }
    }

    /// Coerce stored header text and render it.
    ///
    /// Fractional patterns accept any float; integer patterns require an
    /// integer literal.
    pub fn render_text(&self, slug: &'static str, text: &str) -> Result<String> {
        let trimmed = text.trim();
        if self.is_fractional() {
            trimmed
                .parse::<f64>()
                .map(|v| self.render_float(v))
                .map_err(|_| IsgError::numeric_format(slug, trimmed))
        } else {
            trimmed
                .parse::<i64>()
                .map(|v| self.render_int(v))
                .map_err(|_| IsgError::numeric_format(slug, trimmed))
        }
    }
}

/// Coordinate units a version 2.0 header may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordUnit {
    Deg,
    Dms,
    Meters,
    Feet,
}

impl CoordUnit {
    /// Parse the `coord units` header value.
    pub fn from_header(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "deg" => Some(Self::Deg),
            "dms" => Some(Self::Dms),
            "meters" => Some(Self::Meters),
            "feet" => Some(Self::Feet),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deg => "deg",
            Self::Dms => "dms",
            Self::Meters => "meters",
            Self::Feet => "feet",
        }
    }
}

/// How a header field value is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormatSpec {
    /// Written exactly as stored.
    Verbatim,
    /// One numeric pattern.
    Fixed(NumberPattern),
    /// Degrees, minutes and seconds, each with its own pattern.
    Sexagesimal([NumberPattern; 3]),
    /// Pattern selected by the header's coordinate units.
    ByUnit(&'static [(CoordUnit, FormatSpec)]),
}

impl FormatSpec {
    /// Resolve unit-dependent formats against the declared units.
    ///
    /// Returns `None` when the format depends on units and none of its keys
    /// match.
    pub fn resolve(&self, unit: Option<CoordUnit>) -> Option<FormatSpec> {
        match self {
            FormatSpec::ByUnit(table) => {
                let unit = unit?;
                table
                    .iter()
                    .find(|(key, _)| *key == unit)
                    .and_then(|(_, spec)| spec.resolve(Some(unit)))
            }
            other => Some(*other),
        }
    }
}
