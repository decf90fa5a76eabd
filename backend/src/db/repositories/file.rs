//! JSON file repository.
//!
//! Stores the known set as `state.json`:
//!
//! ```json
//! {
//!   "known": ["C34ABC1", "P21xyzq"],
//!   "last_check": "2026-01-15T21:30:00Z"
//! }
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::db::atomic::write_atomic;
use crate::db::repository::StateRepository;
use crate::error::{WatchError, WatchResult};
use crate::models::KnownSet;

pub const STATE_FILE_NAME: &str = "state.json";

/// Known-set repository backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileStateRepository {
    path: PathBuf,
}

impl FileStateRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Repository at `<data_dir>/state.json`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(STATE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateRepository for FileStateRepository {
    fn load(&self) -> WatchResult<KnownSet> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No persisted state; first run");
                return Ok(KnownSet::new());
            }
            Err(err) => return Err(err.into()),
        };

        serde_json::from_str(&content).map_err(|e| {
            WatchError::State(format!("cannot decode {}: {}", self.path.display(), e))
        })
    }

    fn save(&self, known: &KnownSet) -> WatchResult<()> {
        let json = serde_json::to_vec_pretty(known)?;
        write_atomic(&self.path, &json)?;
        debug!(path = %self.path.display(), known = known.len(), "Persisted known set");
        Ok(())
    }

    fn reset(&self) -> WatchResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "Removed persisted state");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
