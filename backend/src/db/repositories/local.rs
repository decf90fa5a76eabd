//! In-memory known-set repository.
//!
//! Suitable for unit tests and dry runs: nothing touches the filesystem and clones share
//! the same storage.

use std::sync::{Arc, RwLock};

use crate::db::repository::StateRepository;
use crate::error::{WatchError, WatchResult};
use crate::models::KnownSet;

/// In-memory repository.
///
/// # Example
/// ```
/// use pccp_watch::db::{LocalStateRepository, StateRepository};
/// use pccp_watch::models::KnownSet;
///
/// let repo = LocalStateRepository::new();
/// repo.save(&KnownSet::from_designations(["X"])).unwrap();
/// assert!(repo.load().unwrap().contains("X"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalStateRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Debug, Default)]
struct LocalData {
    known: Option<KnownSet>,
    saves: usize,
}

impl LocalStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `known`, as if a previous cycle had saved it.
    pub fn with_known(known: KnownSet) -> Self {
        let repo = Self::new();
        if let Ok(mut data) = repo.data.write() {
            data.known = Some(known);
        }
        repo
    }

    /// Number of successful saves since creation.
    pub fn save_count(&self) -> usize {
        self.data.read().map(|data| data.saves).unwrap_or(0)
    }
}

fn poisoned() -> WatchError {
    WatchError::State("in-memory state lock poisoned".to_string())
}

impl StateRepository for LocalStateRepository {
    fn load(&self) -> WatchResult<KnownSet> {
        let data = self.data.read().map_err(|_| poisoned())?;
        Ok(data.known.clone().unwrap_or_default())
    }

    fn save(&self, known: &KnownSet) -> WatchResult<()> {
        let mut data = self.data.write().map_err(|_| poisoned())?;
        data.known = Some(known.clone());
        data.saves += 1;
        Ok(())
    }

    fn reset(&self) -> WatchResult<()> {
        let mut data = self.data.write().map_err(|_| poisoned())?;
        data.known = None;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
