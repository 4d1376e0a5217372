//! Error types for ISG parsing and writing.

use thiserror::Error;

/// Errors that can occur while reading or rendering an ISG model.
#[derive(Error, Debug)]
pub enum IsgError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No `ISG format` declaration anywhere in the input.
    #[error("missing ISG format version declaration")]
    MissingVersion,

    /// Declared version has no schema.
    #[error("unknown ISG format version: {0}")]
    UnknownVersion(String),

    /// A header field required to build the model is absent.
    #[error("missing required header field: {0}")]
    MissingField(&'static str),

    /// A required header field holds a value that cannot be interpreted.
    #[error("invalid value for header field '{slug}': {value}")]
    InvalidField { slug: &'static str, value: String },

    /// A field value cannot be coerced to the numeric type its format implies.
    #[error("value for '{slug}' is not numeric: {value}")]
    NumericFormat { slug: &'static str, value: String },

    /// Data matrix dimensions disagree with the header.
    #[error(
        "data matrix is {rows}x{cols} but header declares {expected_rows}x{expected_cols}"
    )]
    DimensionMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    /// Malformed degrees/minutes/seconds text.
    #[error("invalid DMS coordinate: {0}")]
    InvalidDms(String),
}

impl IsgError {
    /// Create an InvalidField error.
    pub fn invalid_field(slug: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidField {
            slug,
            value: value.into(),
        }
    }

    /// Create a NumericFormat error.
    pub fn numeric_format(slug: &'static str, value: impl Into<String>) -> Self {
        Self::NumericFormat {
            slug,
            value: value.into(),
        }
    }

    /// Create an InvalidDms error.
    pub fn invalid_dms(text: impl Into<String>) -> Self {
        Self::InvalidDms(text.into())
    }
}

/// Result type for ISG codec operations.
pub type Result<T> = std::result::Result<T, IsgError>;
