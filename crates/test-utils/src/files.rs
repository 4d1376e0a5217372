//! Temporary file helpers for tests that touch the filesystem.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, TempDir};

/// Write `contents` to a fresh temporary file with the given suffix.
///
/// The file is removed when the returned handle is dropped.
pub fn write_temp_file(contents: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("isg-test-")
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

/// Write an ISG document to a temporary `.isg` file.
pub fn write_temp_isg(contents: &str) -> NamedTempFile {
    write_temp_file(contents, ".isg")
}

/// Create an empty temporary directory for export output.
pub fn temp_output_dir() -> TempDir {
    TempDir::new().expect("create temp dir")
}

/// Files directly inside `dir`, sorted by name.
pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .expect("read dir")
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    files
}
