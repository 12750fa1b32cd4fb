//! Write generated type definitions to disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::TypegenError;

/// Write `lines` to `<dir>/<name>.<extension>` and return the full path.
///
/// - Creates `dir` (and parents) if it doesn't exist
/// - Writes through a temp file in `dir`, then renames over the target
pub fn write_types(
    dir: &Path,
    name: &str,
    extension: &str,
    lines: &[String],
) -> Result<PathBuf, TypegenError> {
    if !dir.is_dir() {
        std::fs::create_dir_all(dir).map_err(|source| TypegenError::CreateDirFailed {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let path = dir.join(format!("{}.{}", name, extension));
    let write_failed = |source| TypegenError::WriteFailed {
        path: path.clone(),
        source,
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_failed)?;
    file.write_all(lines.join("\n").as_bytes())
        .map_err(write_failed)?;
    file.persist(&path).map_err(|e| write_failed(e.error))?;

    Ok(path)
}
