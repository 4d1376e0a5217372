//! Resolving the input argument to a list of ISG files.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use walkdir::WalkDir;

const ISG_EXTENSION: &str = "isg";

fn is_isg_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(ISG_EXTENSION))
        .unwrap_or(false)
}

/// A file is taken as is; a directory yields every `.isg` file below it,
/// sorted by path.
pub fn collect_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        bail!("input {:?} does not exist", input);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to read directory {:?}", input))?;
        if entry.file_type().is_file() && is_isg_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    if files.is_empty() {
        bail!("no .isg files found in {:?}", input);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::temp_output_dir;

    #[test]
    fn test_single_file() {
        let file = test_utils::write_temp_isg("x");
        assert_eq!(collect_inputs(file.path()).unwrap(), vec![file.path().to_path_buf()]);
    }

    #[test]
    fn test_directory_is_filtered_and_sorted() {
        let dir = temp_output_dir();
        std::fs::write(dir.path().join("b.isg"), "").unwrap();
        std::fs::write(dir.path().join("a.ISG"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("c.isg"), "").unwrap();

        let files = collect_inputs(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["a.ISG", "b.isg", "nested/c.isg"]);
    }

    #[test]
    fn test_empty_directory_fails() {
        let dir = temp_output_dir();
        assert!(collect_inputs(dir.path()).is_err());
    }

    #[test]
    fn test_missing_input_fails() {
        assert!(collect_inputs(Path::new("/nonexistent/model.isg")).is_err());
    }
}
