//! ISG geoid grid converter.
//!
//! Reads one ISG file, or every `.isg` file under a directory, and writes
//! each as ISG (any version), CSV, GSF, GEM or GRI. `--info` prints the
//! parsed header as JSON.

mod info;
mod inputs;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use grid_export::{convert_to, pad_to_bounds, ExportConfig, OutputFormat};
use isg_common::Extent;
use isg_format::GridModel;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use info::HeaderInfo;
use inputs::collect_inputs;

#[derive(Parser, Debug)]
#[command(name = "isg-convert")]
#[command(about = "Convert ISG geoid grids between formats")]
struct Args {
    /// ISG file, or a directory searched for .isg files
    input: PathBuf,

    /// Output format: isg (configured default version), isg1.0, isg1.01,
    /// isg2.00, csv, gsf, gem or gri
    #[arg(short, long)]
    format: Option<String>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// YAML export configuration
    #[arg(short, long, env = "ISG_CONFIG")]
    config: Option<PathBuf>,

    /// Do not prefix output file names with a timestamp
    #[arg(long)]
    no_timestamp: bool,

    /// Override the grid extent: "lat_min,lat_max,lon_min,lon_max"
    #[arg(long)]
    bounds: Option<String>,

    /// Pad with no-data cells to cover "lat_min,lat_max,lon_min,lon_max"
    #[arg(long)]
    pad_to: Option<String>,

    /// Print the parsed header as JSON
    #[arg(long)]
    info: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(args: &Args) -> Result<()> {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if args.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Defaults, then environment, then the YAML file, then flags.
fn load_config(args: &Args) -> Result<ExportConfig> {
    let mut config = ExportConfig::from_env();
    if let Some(path) = &args.config {
        config
            .merge_yaml_file(path)
            .with_context(|| format!("Failed to load export config from {:?}", path))?;
    }

    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if args.no_timestamp {
        config.timestamp_prefix = false;
    }

    if let Err(e) = config.validate() {
        bail!("invalid export configuration: {}", e);
    }
    Ok(config)
}

/// `isg` alone selects the configured default version.
fn resolve_format(name: &str, config: &ExportConfig) -> Result<OutputFormat> {
    if name.trim().eq_ignore_ascii_case("isg") {
        return Ok(OutputFormat::Isg(config.isg_version()?));
    }
    Ok(name.parse::<OutputFormat>()?)
}

fn parse_extent(flag: &str, text: &str) -> Result<Extent> {
    Extent::from_extent_string(text).with_context(|| format!("Invalid --{} value {:?}", flag, text))
}

struct Job {
    format: Option<OutputFormat>,
    bounds: Option<Extent>,
    pad_to: Option<Extent>,
    info: bool,
}

fn process_file(path: &Path, job: &Job, config: &ExportConfig) -> Result<Option<PathBuf>> {
    let mut model =
        GridModel::from_path(path).with_context(|| format!("Failed to read ISG file {:?}", path))?;

    let header = model.main_header_values();
    info!(
        path = %path.display(),
        version = %model.version(),
        model_name = header.model_name.as_deref().unwrap_or("---"),
        nrows = model.data().len(),
        lat_min = header.lat_min,
        lat_max = header.lat_max,
        lon_min = header.lon_min,
        lon_max = header.lon_max,
        "Parsed ISG file"
    );
    if !model.unmatched_lines().is_empty() {
        warn!(
            path = %path.display(),
            count = model.unmatched_lines().len(),
            "Header lines matched no known field"
        );
    }

    if let Some(extent) = job.bounds {
        model.set_bounds(extent);
    }
    if let Some(target) = &job.pad_to {
        pad_to_bounds(&mut model, target)
            .with_context(|| format!("Failed to pad {:?}", path))?;
    }

    if job.info {
        println!("{}", HeaderInfo::new(path, &model).to_json()?);
    }

    match job.format {
        Some(format) => {
            let output = convert_to(&model, format, config)
                .with_context(|| format!("Failed to convert {:?} to {}", path, format))?;
            Ok(Some(output))
        }
        None => Ok(None),
    }
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args)?;

    let config = load_config(&args)?;

    let format = match (&args.format, args.info) {
        (Some(name), _) => Some(resolve_format(name, &config)?),
        (None, true) => None,
        (None, false) => Some(OutputFormat::Isg(config.isg_version()?)),
    };
    let job = Job {
        format,
        bounds: args.bounds.as_deref().map(|s| parse_extent("bounds", s)).transpose()?,
        pad_to: args.pad_to.as_deref().map(|s| parse_extent("pad-to", s)).transpose()?,
        info: args.info,
    };

    let files = collect_inputs(&args.input)?;
    info!(
        files = files.len(),
        format = job.format.map(|f| f.name()).unwrap_or("none"),
        output_dir = %config.output_dir.display(),
        "Starting conversion"
    );

    let mut failed = 0usize;
    for path in &files {
        match process_file(path, &job, &config) {
            Ok(Some(output)) => info!(input = %path.display(), output = %output.display(), "Converted"),
            Ok(None) => {}
            Err(e) => {
                failed += 1;
                let message = format!("{:#}", e);
                error!(input = %path.display(), error = %message, "Conversion failed");
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} files failed", failed, files.len());
    }
    Ok(())
}
