//! Per-format serializers.
//!
//! Every exporter consumes a canonical [`GridModel`] (cell-center bounds,
//! north-to-south west-to-east data) and streams its encoding into a writer.
//! Callers check dimensions before exporting; see [`crate::convert_to`].

mod csv;
mod gem;
mod gri;
mod gsf;
mod isg;

use std::io::Write;

use isg_format::GridModel;

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::format::OutputFormat;

pub use self::csv::CsvExporter;
pub use self::gem::{GemExporter, GemHeader, GEM_HEADER_LEN};
pub use self::gri::GriExporter;
pub use self::gsf::GsfExporter;
pub use self::isg::IsgExporter;

/// A serializer for one output format.
pub trait Exporter {
    /// Format this exporter produces.
    fn format(&self) -> OutputFormat;

    /// Write the encoded model to `out`.
    fn export(&self, model: &GridModel, out: &mut dyn Write) -> Result<()>;
}

/// Build the exporter for `format`.
///
/// Raster output has no in-process exporter and is routed to a
/// [`RasterWriter`](crate::collaborators::RasterWriter) instead.
pub fn exporter_for(format: OutputFormat, config: &ExportConfig) -> Result<Box<dyn Exporter>> {
    let exporter: Box<dyn Exporter> = match format {
        OutputFormat::Isg(version) => Box::new(IsgExporter::new(version, &config.generator)),
        OutputFormat::Csv => Box::new(CsvExporter::new(config.csv_delimiter)?),
        OutputFormat::Gsf => Box::new(GsfExporter),
        OutputFormat::Gem => Box::new(GemExporter),
        OutputFormat::Gri => Box::new(GriExporter),
        OutputFormat::Tif => return Err(ExportError::MissingBackend("raster")),
    };
    Ok(exporter)
}

/// Export `model` into an in-memory buffer.
pub fn export_to_vec(model: &GridModel, format: OutputFormat, config: &ExportConfig) -> Result<Vec<u8>> {
    let exporter = exporter_for(format, config)?;
    model.check_dimensions()?;
    let mut buf = Vec::new();
    exporter.export(model, &mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use isg_format::IsgVersion;

    #[test]
    fn test_exporter_for_every_in_process_format() {
        let config = ExportConfig::default();
        for format in OutputFormat::ALL {
            match exporter_for(format, &config) {
                Ok(exporter) => assert_eq!(exporter.format(), format),
                Err(ExportError::MissingBackend(_)) => assert_eq!(format, OutputFormat::Tif),
                Err(e) => panic!("unexpected error for {}: {}", format, e),
            }
        }
    }

    #[test]
    fn test_isg_exporter_uses_requested_version() {
        let config = ExportConfig::default();
        let exporter = exporter_for(OutputFormat::Isg(IsgVersion::V1_01), &config).unwrap();
        assert_eq!(exporter.format(), OutputFormat::Isg(IsgVersion::V1_01));
    }
}
