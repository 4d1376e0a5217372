//! Configuration for grid export.

use std::path::{Path, PathBuf};

use isg_format::{IsgVersion, DEFAULT_GENERATOR};
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};

/// Configuration for writing export files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory receiving output files.
    pub output_dir: PathBuf,

    /// Prefix file names with the export time (`%Y%m%d_%H%M%S_`).
    pub timestamp_prefix: bool,

    /// ISG version used when a caller asks for plain `isg`.
    pub default_version: String,

    /// Generator name written in the ISG banner line.
    pub generator: String,

    /// Field delimiter for CSV output.
    pub csv_delimiter: char,
}

/// [`ExportConfig`] keys as read from YAML, absent keys left `None`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExportConfigOverrides {
    output_dir: Option<PathBuf>,
    timestamp_prefix: Option<bool>,
    default_version: Option<String>,
    generator: Option<String>,
    csv_delimiter: Option<char>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            timestamp_prefix: true,
            default_version: IsgVersion::V2_0.as_str().to_string(),
            generator: DEFAULT_GENERATOR.to_string(),
            csv_delimiter: ',',
        }
    }
}

impl ExportConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override fields from environment variables that are set.
    pub fn apply_env(&mut self) {
        if let Ok(val) = std::env::var("ISG_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("ISG_TIMESTAMP_PREFIX") {
            self.timestamp_prefix = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("ISG_DEFAULT_VERSION") {
            self.default_version = val;
        }

        if let Ok(val) = std::env::var("ISG_GENERATOR") {
            self.generator = val;
        }

        if let Ok(val) = std::env::var("ISG_CSV_DELIMITER") {
            if let Some(c) = val.chars().next() {
                self.csv_delimiter = c;
            }
        }
    }

    /// Load configuration from a YAML file. Missing keys keep their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::default();
        config.merge_yaml_file(path)?;
        Ok(config)
    }

    /// Override fields with the keys present in a YAML file.
    ///
    /// Keys the file leaves out keep their current value, so YAML can be
    /// layered over [`ExportConfig::from_env`].
    pub fn merge_yaml_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let overrides: ExportConfigOverrides = serde_yaml::from_str(&text)
            .map_err(|e| ExportError::config(format!("{}: {}", path.display(), e)))?;

        if let Some(output_dir) = overrides.output_dir {
            self.output_dir = output_dir;
        }
        if let Some(timestamp_prefix) = overrides.timestamp_prefix {
            self.timestamp_prefix = timestamp_prefix;
        }
        if let Some(default_version) = overrides.default_version {
            self.default_version = default_version;
        }
        if let Some(generator) = overrides.generator {
            self.generator = generator;
        }
        if let Some(csv_delimiter) = overrides.csv_delimiter {
            self.csv_delimiter = csv_delimiter;
        }
        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.output_dir.as_os_str().is_empty() {
            return Err("output_dir must not be empty".to_string());
        }

        if IsgVersion::parse(&self.default_version).is_err() {
            return Err(format!(
                "default_version must be one of 1.0, 1.01, 2.0 (got {})",
                self.default_version
            ));
        }

        if !self.csv_delimiter.is_ascii() || self.csv_delimiter.is_ascii_alphanumeric() {
            return Err(format!(
                "csv_delimiter must be an ASCII punctuation or whitespace character (got {:?})",
                self.csv_delimiter
            ));
        }

        if self.generator.contains('\n') {
            return Err("generator must be a single line".to_string());
        }

        Ok(())
    }

    /// The configured default ISG version.
    pub fn isg_version(&self) -> Result<IsgVersion> {
        Ok(IsgVersion::parse(&self.default_version)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ExportConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.isg_version().unwrap(), IsgVersion::V2_0);
    }

    #[test]
    fn test_validate_rejects_bad_version() {
        let config = ExportConfig {
            default_version: "1.5".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(config.isg_version().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_delimiter() {
        let config = ExportConfig {
            csv_delimiter: 'x',
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ExportConfig {
            csv_delimiter: ';',
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.yaml");
        std::fs::write(&path, "output_dir: /tmp/out\ncsv_delimiter: \";\"\n").unwrap();

        let config = ExportConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.csv_delimiter, ';');
        assert!(config.timestamp_prefix);
    }

    #[test]
    fn test_merge_yaml_keeps_unset_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.yaml");
        std::fs::write(&path, "default_version: \"1.01\"\ntimestamp_prefix: false\n").unwrap();

        // stands in for values taken from the environment
        let mut config = ExportConfig {
            output_dir: PathBuf::from("/data/from-env"),
            generator: "env-generator".to_string(),
            default_version: "1.0".to_string(),
            ..Default::default()
        };
        config.merge_yaml_file(&path).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/data/from-env"));
        assert_eq!(config.generator, "env-generator");
        assert_eq!(config.default_version, "1.01");
        assert!(!config.timestamp_prefix);
        assert_eq!(config.csv_delimiter, ',');
    }

    #[test]
    fn test_merge_yaml_invalid_leaves_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.yaml");
        std::fs::write(&path, "csv_delimiter: [1]\n").unwrap();

        let mut config = ExportConfig {
            generator: "kept".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.merge_yaml_file(&path),
            Err(ExportError::Config(_))
        ));
        assert_eq!(config.generator, "kept");
    }

    #[test]
    fn test_from_yaml_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.yaml");
        std::fs::write(&path, "timestamp_prefix: [1, 2]\n").unwrap();

        assert!(matches!(
            ExportConfig::from_yaml_file(&path),
            Err(ExportError::Config(_))
        ));
    }
}
