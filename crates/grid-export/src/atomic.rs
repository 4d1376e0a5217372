//! Atomic output files.
//!
//! Output is written to a temporary file in the destination directory and
//! renamed into place only once the writer succeeds. A failed export leaves
//! nothing behind under the final name. Existing files are never replaced:
//! when the name is taken a counter is appended to the stem.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{ExportError, Result};

/// Most numbered alternatives tried before giving up on a taken name.
const MAX_NAME_ATTEMPTS: usize = 1000;

/// Write a file through `write`, committing it to `dir/file_name` on success.
///
/// Returns the final path, which differs from `file_name` when that name was
/// already taken, and the number of bytes written.
pub fn write_atomically<F>(dir: &Path, file_name: &str, write: F) -> Result<(PathBuf, u64)>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let temp = staging_file(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        write(&mut writer)?;
        writer.flush()?;
    }
    commit(temp, dir, file_name)
}

/// Let `write` produce a file at a staging path, committing it on success.
///
/// For backends that insist on opening the output path themselves.
pub fn write_path_atomically<F>(dir: &Path, file_name: &str, write: F) -> Result<(PathBuf, u64)>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let temp = staging_file(dir)?;
    write(temp.path())?;
    commit(temp, dir, file_name)
}

fn staging_file(dir: &Path) -> Result<NamedTempFile> {
    std::fs::create_dir_all(dir)?;
    Ok(tempfile::Builder::new()
        .prefix(".isg-export-")
        .suffix(".partial")
        .tempfile_in(dir)?)
}

/// `out.csv` becomes `out_3.csv` for `counter` 3.
fn numbered_name(file_name: &str, counter: usize) -> String {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, counter, ext),
        None => format!("{}_{}", stem, counter),
    }
}

fn commit(mut temp: NamedTempFile, dir: &Path, file_name: &str) -> Result<(PathBuf, u64)> {
    let requested = dir.join(file_name);
    let mut counter = 0;
    let (final_path, file) = loop {
        let candidate = if counter == 0 {
            requested.clone()
        } else {
            dir.join(numbered_name(file_name, counter))
        };
        match temp.persist_noclobber(&candidate) {
            Ok(file) => break (candidate, file),
            Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                if counter >= MAX_NAME_ATTEMPTS {
                    return Err(ExportError::Io(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!(
                            "{} and {} numbered alternatives already exist",
                            requested.display(),
                            MAX_NAME_ATTEMPTS
                        ),
                    )));
                }
                temp = err.file;
                counter += 1;
            }
            Err(err) => return Err(err.into()),
        }
    };

    if counter > 0 {
        warn!(
            requested = %requested.display(),
            path = %final_path.display(),
            "Output file already exists, writing under a numbered name"
        );
    }
    file.sync_all()?;
    let bytes = file.metadata()?.len();
    debug!(path = %final_path.display(), bytes, "Committed output file");
    Ok((final_path, bytes))
}
