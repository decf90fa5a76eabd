//! Known-set repository trait.
//!
//! A repository persists the [`KnownSet`] between cycles. The cycle loads it once at the
//! start and commits the merged set once at the end; nothing is written in between.

use tracing::warn;

use crate::error::{WatchError, WatchResult};
use crate::models::KnownSet;

/// Storage backend for the known set.
pub trait StateRepository {
    /// Load the persisted set.
    ///
    /// # Returns
    /// * `Ok(KnownSet::new())` when nothing has been persisted yet (first run)
    /// * `Err(WatchError::State)` when a record exists but cannot be decoded
    fn load(&self) -> WatchResult<KnownSet>;

    /// Replace the persisted set atomically.
    fn save(&self, known: &KnownSet) -> WatchResult<()>;

    /// Forget every known designation.
    fn reset(&self) -> WatchResult<()>;

    /// Human-readable location, for logs.
    fn location(&self) -> String;

    /// Load the persisted set, treating a corrupted record as empty.
    ///
    /// Only decoding failures are absorbed; I/O errors still propagate.
    fn load_or_empty(&self) -> WatchResult<KnownSet> {
        match self.load() {
            Ok(known) => Ok(known),
            Err(WatchError::State(reason)) => {
                warn!(
                    location = %self.location(),
                    reason = %reason,
                    "Persisted state is corrupted; starting from an empty known set"
                );
                Ok(KnownSet::new())
            }
            Err(err) => Err(err),
        }
    }
}

impl<R: StateRepository + ?Sized> StateRepository for &R {
    fn load(&self) -> WatchResult<KnownSet> {
        (**self).load()
    }

    fn save(&self, known: &KnownSet) -> WatchResult<()> {
        (**self).save(known)
    }

    fn reset(&self) -> WatchResult<()> {
        (**self).reset()
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

impl<R: StateRepository + ?Sized> StateRepository for Box<R> {
    fn load(&self) -> WatchResult<KnownSet> {
        (**self).load()
    }

    fn save(&self, known: &KnownSet) -> WatchResult<()> {
        (**self).save(known)
    }

    fn reset(&self) -> WatchResult<()> {
        (**self).reset()
    }

    fn location(&self) -> String {
        (**self).location()
    }
}
