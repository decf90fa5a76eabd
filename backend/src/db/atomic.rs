//! Write-to-temp-then-rename helper shared by the state and alert files.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{WatchError, WatchResult};

/// Replace `path` with `contents` without ever exposing a partially written file.
///
/// The temporary file is created next to the target so the final rename stays on one
/// filesystem. Missing parent directories are created.
pub fn write_atomic(path: &Path, contents: &[u8]) -> WatchResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        Some(_) => Path::new("."),
        None => {
            return Err(WatchError::State(format!(
                "target has no parent directory: {}",
                path.display()
            )))
        }
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;

    if let Ok(dir) = fs::File::open(parent) {
        let _ = dir.sync_all();
    }
    Ok(())
}
