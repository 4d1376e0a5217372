//! Error types for grid export.

use isg_format::IsgError;
use thiserror::Error;

/// Errors that can occur while exporting a grid model.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Model could not be read or rendered.
    #[error(transparent)]
    Format(#[from] IsgError),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A packed deviation does not fit in 16 bits.
    #[error("packed value {value} at row {row}, column {col} overflows i16")]
    PackedOverflow { row: usize, col: usize, value: f64 },

    /// No valid samples to compute a mean from.
    #[error("grid has no valid samples")]
    EmptyGrid,

    /// Unknown output format name.
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// A format needs an external backend that was not supplied.
    #[error("no {0} backend configured")]
    MissingBackend(&'static str),

    /// An external collaborator reported failure.
    #[error("{backend} failed: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ExportError {
    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a Backend error.
    pub fn backend(backend: &'static str, message: impl Into<String>) -> Self {
        Self::Backend {
            backend,
            message: message.into(),
        }
    }
}

impl From<tempfile::PersistError> for ExportError {
    fn from(err: tempfile::PersistError) -> Self {
        Self::Io(err.error)
    }
}

impl From<serde_yaml::Error> for ExportError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
