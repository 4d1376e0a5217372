//! Header summary printed by `--info`.

use std::path::Path;

use isg_format::{GridModel, MainHeaderValues};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HeaderInfo {
    pub path: String,
    pub version: String,
    pub nrows: usize,
    pub ncols: usize,
    pub data_ordering: String,
    pub is_subset: bool,
    pub unmatched_header_lines: usize,
    #[serde(flatten)]
    pub header: MainHeaderValues,
}

impl HeaderInfo {
    pub fn new(path: &Path, model: &GridModel) -> Self {
        let nrows = model.data().len();
        let ncols = model.data().first().map(Vec::len).unwrap_or(0);
        Self {
            path: path.display().to_string(),
            version: model.version().to_string(),
            nrows,
            ncols,
            data_ordering: model.orientation().to_string(),
            is_subset: model.is_subset(),
            unmatched_header_lines: model.unmatched_lines().len(),
            header: model.main_header_values(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
