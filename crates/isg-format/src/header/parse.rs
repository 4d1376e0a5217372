use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::HeaderField;
use crate::error::{IsgError, Result};
use crate::schema::{FieldSlug, FormatSchema, ValueKind};
use crate::version::IsgVersion;

const VERSION_KEYWORD: &str = "ISG format";

/// Raw result of reading an ISG document, before bounds are derived.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub version: IsgVersion,
    pub comment_lines: Vec<String>,
    pub fields: BTreeMap<FieldSlug, HeaderField>,
    /// Rows in file order.
    pub data: Vec<Vec<f64>>,
    /// Header lines that matched no field of the declared version.
    pub unmatched_lines: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Comments,
    Header,
    Data,
}

/// Split a header line at its delimiter.
///
/// A `:` before any `=` marks a textual field. The keyword is right-trimmed,
/// the value trimmed on both sides.
fn split_header_line(line: &str) -> Option<(ValueKind, &str, &str)> {
    let colon = line.find(':');
    let equals = line.find('=');

    let (kind, position) = match (colon, equals) {
        (Some(c), Some(e)) if c < e => (ValueKind::Textual, c),
        (Some(c), None) => (ValueKind::Textual, c),
        (_, Some(e)) => (ValueKind::Numeric, e),
        (None, None) => return None,
    };

    let keyword = line[..position].trim_end();
    let value = line[position + 1..].trim();
    Some((kind, keyword, value))
}

/// Find the declared format version.
///
/// Only a line whose keyword is exactly `ISG format` counts, so prose in the
/// comment section mentioning the format is ignored.
pub fn detect_version(lines: &[&str]) -> Result<IsgVersion> {
    let declared = lines
        .iter()
        .filter_map(|line| split_header_line(line))
        .find(|(_, keyword, _)| *keyword == VERSION_KEYWORD)
        .map(|(_, _, value)| value)
        .ok_or(IsgError::MissingVersion)?;

    IsgVersion::parse(declared)
}

/// Parse an ISG document.
pub fn parse(text: &str) -> Result<ParsedDocument> {
    let lines: Vec<&str> = text.lines().collect();
    let version = detect_version(&lines)?;
    let schema = FormatSchema::for_version(version);
    debug!(version = %version, lines = lines.len(), "Detected ISG version");

    let mut section = Section::Comments;
    let mut comment_lines: Vec<String> = Vec::new();
    let mut fields = BTreeMap::new();
    let mut data = Vec::new();
    let mut unmatched_lines = Vec::new();

    for line in lines {
        if line.contains("begin_of_head") {
            section = Section::Header;
            continue;
        }
        if line.contains("end_of_head") {
            section = Section::Data;
            continue;
        }

        match section {
            Section::Comments => comment_lines.push(line.to_string()),
            Section::Header => {
                if line.trim().is_empty() {
                    continue;
                }
                let bound = split_header_line(line).and_then(|(_, keyword, value)| {
                    schema.resolve_keyword(keyword).map(|spec| {
                        (
                            spec.slug,
                            HeaderField {
                                keyword: keyword.to_string(),
                                kind: spec.kind,
                                format: spec.format,
                                value: value.to_string(),
                            },
                        )
                    })
                });
                match bound {
                    Some((slug, field)) => {
                        fields.insert(slug, field);
                    }
                    None => {
                        warn!(line = line, version = %version, "Ignoring unrecognised header line");
                        unmatched_lines.push(line.to_string());
                    }
                }
            }
            Section::Data => {
                let row: Vec<f64> = line
                    .split_whitespace()
                    .filter_map(|token| token.parse::<f64>().ok())
                    .collect();
                if !row.is_empty() {
                    data.push(row);
                }
            }
        }
    }

    debug!(
        fields = fields.len(),
        rows = data.len(),
        comments = comment_lines.len(),
        unmatched = unmatched_lines.len(),
        "Parsed ISG document"
    );

    Ok(ParsedDocument {
        version,
        comment_lines,
        fields,
        data,
        unmatched_lines,
    })
}
