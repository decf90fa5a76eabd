use std::fs;
use std::path::PathBuf;

use super::CatalogSource;
use crate::error::{WatchError, WatchResult};

/// Catalog read from a local text file, for offline runs and tests.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalogSource {
    fn fetch(&self) -> WatchResult<String> {
        fs::read_to_string(&self.path).map_err(|e| {
            WatchError::CatalogFetch(format!("cannot read {}: {}", self.path.display(), e))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
