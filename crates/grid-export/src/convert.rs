//! Converting a model into an output file.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use isg_format::{FieldSlug, GridModel};
use tracing::info;

use crate::atomic::{write_atomically, write_path_atomically};
use crate::collaborators::{GridView, RasterWriter};
use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::exporters::exporter_for;
use crate::format::OutputFormat;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_";
const FALLBACK_STEM: &str = "model";

/// File name for `model` in `format`, e.g. `20240201_120000_EGG97.gsf`.
pub fn output_file_name(
    model: &GridModel,
    format: OutputFormat,
    config: &ExportConfig,
    now: DateTime<Local>,
) -> String {
    let mut stem: String = model
        .field_value(FieldSlug::ModelName)
        .unwrap_or("")
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() || stem == "---" {
        stem = FALLBACK_STEM.to_string();
    }
    if model.is_subset() {
        stem.push_str("_subset");
    }

    let prefix = if config.timestamp_prefix {
        now.format(TIMESTAMP_FORMAT).to_string()
    } else {
        String::new()
    };
    format!("{}{}.{}", prefix, stem, format.extension())
}

/// Write `model` as `format` into the configured output directory.
///
/// The file appears under its final name only once fully written.
pub fn convert_to(model: &GridModel, format: OutputFormat, config: &ExportConfig) -> Result<PathBuf> {
    config.validate().map_err(ExportError::Config)?;
    let exporter = exporter_for(format, config)?;
    model.check_dimensions()?;

    let file_name = output_file_name(model, format, config, Local::now());
    let (path, bytes) = write_atomically(&config.output_dir, &file_name, |out| {
        exporter.export(model, out)
    })?;

    info!(path = %path.display(), %format, bytes, "Exported grid model");
    Ok(path)
}

/// Write `model` as a georeferenced raster through `writer`.
pub fn convert_to_raster(
    model: &GridModel,
    writer: &dyn RasterWriter,
    config: &ExportConfig,
) -> Result<PathBuf> {
    config.validate().map_err(ExportError::Config)?;
    model.check_dimensions()?;

    let format = OutputFormat::Tif;
    let file_name = output_file_name(model, format, config, Local::now());
    let (path, bytes) = write_path_atomically(&config.output_dir, &file_name, |staging| {
        writer.write_raster(GridView::of(model), staging)
    })?;

    info!(path = %path.display(), %format, bytes, "Exported grid model");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use isg_common::GridBounds;
    use isg_format::IsgVersion;

    fn model(name: &str) -> GridModel {
        let bounds = GridBounds::new(40.0, 41.0, 10.0, 11.0, 1.0, 1.0);
        GridModel::from_grid(IsgVersion::V2_0, name, bounds, vec![vec![1.0, 2.0], vec![3.0, 4.0]])
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 2, 1, 12, 30, 5).unwrap()
    }

    #[test]
    fn test_file_name_with_prefix() {
        let config = ExportConfig::default();
        let name = output_file_name(&model("EGG97"), OutputFormat::Gsf, &config, now());
        assert_eq!(name, "20240201_123005_EGG97.gsf");
    }

    #[test]
    fn test_file_name_without_prefix() {
        let config = ExportConfig {
            timestamp_prefix: false,
            ..Default::default()
        };
        let mut model = model("Geoid model/2020");
        model.mark_subset();
        let name = output_file_name(&model, OutputFormat::Isg(IsgVersion::V1_01), &config, now());
        assert_eq!(name, "Geoid_model_2020_subset.isg");
    }

    #[test]
    fn test_file_name_placeholder() {
        let config = ExportConfig {
            timestamp_prefix: false,
            ..Default::default()
        };
        let name = output_file_name(&model("---"), OutputFormat::Csv, &config, now());
        assert_eq!(name, "model.csv");
    }
}
