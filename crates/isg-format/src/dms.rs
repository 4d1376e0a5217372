//! Degrees/minutes/seconds conversion.
//!
//! Headers using `coord units : dms` write angles as `D°M'S"`, `M'S"` or
//! `S"`, with whole-number components. Conversion to decimal degrees rounds
//! to six places; conversion back truncates to whole seconds.

use crate::error::{IsgError, Result};
use crate::pattern::NumberPattern;

const DEGREE_MARK: char = '°';
const MINUTE_MARK: char = '\'';
const SECOND_MARK: char = '"';

/// Half a unit in the sixth decimal of a degree, in arc-seconds.
///
/// Decimal values produced by [`dms_to_deg`] may sit just below the whole
/// second they came from; this much slack keeps truncation on that second.
const ROUNDING_SLACK_SECONDS: f64 = 0.5e-6 * 3600.0;

/// An angle split into whole degrees, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dms {
    pub negative: bool,
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Dms {
    /// Parse `D°M'S"`, `M'S"` or `S"`. Omitted leading components are zero.
    ///
    /// A sign is only recognised on the degrees component.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let body = trimmed
            .strip_suffix(SECOND_MARK)
            .ok_or_else(|| IsgError::invalid_dms(trimmed))?;

        let (degrees_text, rest) = match body.split_once(DEGREE_MARK) {
            Some((d, rest)) => (Some(d.trim()), rest),
            None => (None, body),
        };
        let (minutes_text, seconds_text) = match rest.split_once(MINUTE_MARK) {
            Some((m, s)) => (Some(m.trim()), s.trim()),
            None => (None, rest.trim()),
        };

        let component = |part: &str| {
            part.parse::<u32>()
                .map_err(|_| IsgError::invalid_dms(trimmed))
        };

        let (negative, degrees) = match degrees_text {
            Some(d) => match d.strip_prefix('-') {
                Some(magnitude) => (true, component(magnitude.trim())?),
                None => (false, component(d.strip_prefix('+').unwrap_or(d))?),
            },
            None => (false, 0),
        };
        let minutes = match minutes_text {
            Some(m) => component(m)?,
            None => 0,
        };
        let seconds = component(seconds_text)?;

        Ok(Self {
            negative,
            degrees,
            minutes,
            seconds,
        })
    }

    /// Split decimal degrees, truncating fractional seconds.
    pub fn from_degrees(decimal_degrees: f64) -> Self {
        let negative = decimal_degrees < 0.0;
        let total_seconds = decimal_degrees.abs() * 3600.0 + ROUNDING_SLACK_SECONDS;

        let seconds = total_seconds % 60.0;
        let total_minutes = ((total_seconds - seconds) / 60.0).round();
        let minutes = total_minutes % 60.0;
        let degrees = ((total_minutes - minutes) / 60.0).round();

        Self {
            negative,
            degrees: degrees as u32,
            minutes: minutes as u32,
            seconds: seconds.trunc() as u32,
        }
    }

    /// Decimal degrees rounded to six places.
    pub fn to_degrees(&self) -> f64 {
        let magnitude =
            self.degrees as f64 + self.minutes as f64 / 60.0 + self.seconds as f64 / 3600.0;
        let signed = if self.negative { -magnitude } else { magnitude };
        (signed * 1e6).round() / 1e6
    }

    /// Render with one pattern per component, e.g. `  45°30'07"`.
    pub fn render(&self, patterns: &[NumberPattern; 3]) -> String {
        let [degrees_pattern, minutes_pattern, seconds_pattern] = patterns;

        let degrees = if self.negative {
            let width = degrees_pattern.width;
            format!("{:>width$}", format!("-{}", self.degrees))
        } else {
            degrees_pattern.render_int(self.degrees as i64)
        };

        format!(
            "{}{}{}{}{}{}",
            degrees,
            DEGREE_MARK,
            minutes_pattern.render_int(self.minutes as i64),
            MINUTE_MARK,
            seconds_pattern.render_int(self.seconds as i64),
            SECOND_MARK
        )
    }
}

impl std::fmt::Display for Dms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}{:02}{}{:02}{}",
            if self.negative { "-" } else { "" },
            self.degrees,
            DEGREE_MARK,
            self.minutes,
            MINUTE_MARK,
            self.seconds,
            SECOND_MARK
        )
    }
}

/// Convert DMS text to decimal degrees rounded to six places.
pub fn dms_to_deg(text: &str) -> Result<f64> {
    Dms::parse(text).map(|dms| dms.to_degrees())
}

/// Convert decimal degrees to whole degrees, minutes and seconds.
pub fn deg_to_dms(decimal_degrees: f64) -> Dms {
    Dms::from_degrees(decimal_degrees)
}
