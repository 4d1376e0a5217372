//! ISG document header codec.
//!
//! An ISG document is free-form comment lines, a header block delimited by
//! `begin_of_head` / `end_of_head`, then a whitespace-separated data block.

mod parse;
mod write;

pub use parse::{detect_version, parse, ParsedDocument};
pub use write::{render_data_row, write, write_with_date};

use crate::pattern::FormatSpec;
use crate::schema::ValueKind;

/// Marker line opening the header block.
pub const BEGIN_OF_HEAD: &str =
    "begin_of_head ================================================";

/// Marker line closing the header block.
pub const END_OF_HEAD: &str =
    "end_of_head ==================================================";

/// Leading text of the generator banner written before the header.
///
/// The writer skips its own banner when the comments already end with a
/// banner line followed by a blank line.
pub const BANNER_PREFIX: &str = "Created by ";

/// Generator name used when the caller does not supply one.
pub const DEFAULT_GENERATOR: &str = concat!("isg-format v", env!("CARGO_PKG_VERSION"));

/// One header value bound during parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderField {
    /// Keyword spelling seen in the source (sticky alias).
    pub keyword: String,
    pub kind: ValueKind,
    pub format: FormatSpec,
    /// Raw text right of the delimiter, trimmed.
    pub value: String,
}
