use std::io::{BufWriter, Write};

use isg_format::header::render_data_row;
use isg_format::GridModel;

use super::Exporter;
use crate::error::Result;
use crate::format::OutputFormat;

const SEPARATOR: &str = "\t\t";

/// Tab grid: one bounds line, then fixed-width data rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct GriExporter;

impl Exporter for GriExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Gri
    }

    fn export(&self, model: &GridModel, out: &mut dyn Write) -> Result<()> {
        let b = model.bounds();
        let header = [
            b.lat_min,
            b.lat_max,
            b.lon_min,
            b.lon_max,
            b.delta_lat,
            b.delta_lon,
        ]
        .iter()
        .map(|v| format!("{:10.4}", v))
        .collect::<Vec<_>>()
        .join(SEPARATOR);

        let mut out = BufWriter::new(out);
        writeln!(out, "{}", header)?;
        for row in model.data() {
            writeln!(out, "{}", render_data_row(row))?;
        }
        out.flush()?;
        Ok(())
    }
}
