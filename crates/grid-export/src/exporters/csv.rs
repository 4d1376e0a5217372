use std::io::Write;

use ::csv::{Terminator, WriterBuilder};
use isg_common::is_nodata;
use isg_format::GridModel;

use super::Exporter;
use crate::error::{ExportError, Result};
use crate::format::OutputFormat;

const HEADER: [&str; 3] = ["LAT", "LON", "N"];

/// One `LAT,LON,N` record per valid sample, rows top to bottom.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    delimiter: u8,
}

impl CsvExporter {
    pub fn new(delimiter: char) -> Result<Self> {
        if !delimiter.is_ascii() {
            return Err(ExportError::config(format!(
                "CSV delimiter must be ASCII (got {:?})",
                delimiter
            )));
        }
        Ok(Self {
            delimiter: delimiter as u8,
        })
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl Exporter for CsvExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Csv
    }

    fn export(&self, model: &GridModel, out: &mut dyn Write) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(out);

        writer.write_record(HEADER)?;
        for (row, values) in model.data().iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                if is_nodata(*value) {
                    continue;
                }
                let (lat, lon) = model.coord_at(row, col);
                writer.write_record([
                    format!("{:.8}", lat),
                    format!("{:.8}", lon),
                    format!("{:.4}", value),
                ])?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}
