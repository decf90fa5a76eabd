//! Repository factory.
//!
//! Selects the known-set backend from runtime configuration.

use std::path::Path;
use std::str::FromStr;

use super::repositories::{FileStateRepository, LocalStateRepository};
use super::repository::StateRepository;

/// Known-set backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// `state.json` in the data directory
    File,
    /// In-memory; forgets everything when the process exits
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("file", "local"/"memory").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "json" => Ok(Self::File),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Read `PCCP_WATCH_REPOSITORY`; defaults to [`RepositoryType::File`].
    pub fn from_env() -> Self {
        std::env::var("PCCP_WATCH_REPOSITORY")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(Self::File)
    }
}

pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository rooted at `data_dir`.
    pub fn create(repo_type: RepositoryType, data_dir: &Path) -> Box<dyn StateRepository> {
        match repo_type {
            RepositoryType::File => Box::new(FileStateRepository::in_dir(data_dir)),
            RepositoryType::Local => Box::new(LocalStateRepository::new()),
        }
    }
}
