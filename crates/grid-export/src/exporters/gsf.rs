use std::io::{BufWriter, Write};

use isg_common::normalize_longitude_360;
use isg_format::GridModel;

use super::Exporter;
use crate::error::Result;
use crate::format::OutputFormat;

/// Legacy text grid: extent and size lines, then one sample per line.
///
/// Sentinel samples pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct GsfExporter;

/// Shortest round-trip text of a float, always with a fractional part.
fn render_value(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') && !text.contains('e') {
        format!("{}.0", text)
    } else {
        text
    }
}

impl Exporter for GsfExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Gsf
    }

    fn export(&self, model: &GridModel, out: &mut dyn Write) -> Result<()> {
        let bounds = model.bounds();
        let mut out = BufWriter::new(out);

        writeln!(out, "{}", render_value(bounds.lat_min))?;
        writeln!(out, "{}", render_value(normalize_longitude_360(bounds.lon_min)))?;
        writeln!(out, "{}", render_value(bounds.lat_max))?;
        writeln!(out, "{}", render_value(normalize_longitude_360(bounds.lon_max)))?;
        writeln!(out, "{}", model.ncols()?)?;
        writeln!(out, "{}", model.nrows()?)?;

        for value in model.data().iter().flatten() {
            writeln!(out, "{}", render_value(*value))?;
        }
        out.flush()?;
        Ok(())
    }
}
