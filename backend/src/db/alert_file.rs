//! Pending-alert artifact.
//!
//! A cycle that produced a non-empty [`AlertPayload`] leaves `alert_pending.json` plus an
//! empty `heartbeat_alert.flag` marker in the data directory. The notify step reads the
//! payload, delivers it and removes both files.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::db::atomic::write_atomic;
use crate::error::{WatchError, WatchResult};
use crate::models::AlertPayload;

pub const ALERT_FILE_NAME: &str = "alert_pending.json";
pub const FLAG_FILE_NAME: &str = "heartbeat_alert.flag";

/// Location of the pending-alert files.
#[derive(Debug, Clone)]
pub struct PendingAlertStore {
    dir: PathBuf,
}

impl PendingAlertStore {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn alert_path(&self) -> PathBuf {
        self.dir.join(ALERT_FILE_NAME)
    }

    pub fn flag_path(&self) -> PathBuf {
        self.dir.join(FLAG_FILE_NAME)
    }

    pub fn is_pending(&self) -> bool {
        self.alert_path().exists()
    }

    /// Write `payload` and raise the flag.
    ///
    /// An empty payload writes nothing and returns `Ok(false)`. A previous, undelivered
    /// alert is replaced.
    pub fn write(&self, payload: &AlertPayload) -> WatchResult<bool> {
        if payload.is_empty() {
            debug!("Empty alert payload; nothing to write");
            return Ok(false);
        }

        let json = serde_json::to_vec_pretty(payload)?;
        write_atomic(&self.alert_path(), &json)?;
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.flag_path())?;

        info!(
            path = %self.alert_path().display(),
            entries = payload.len(),
            "Pending alert written"
        );
        Ok(true)
    }

    /// Read the pending alert, if any.
    pub fn read(&self) -> WatchResult<Option<AlertPayload>> {
        let path = self.alert_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| WatchError::State(format!("cannot decode {}: {}", path.display(), e)))
    }

    /// Remove the alert and its flag. Missing files are not an error.
    pub fn clear(&self) -> WatchResult<()> {
        for path in [self.alert_path(), self.flag_path()] {
            remove_if_exists(&path)?;
        }
        Ok(())
    }
}

fn remove_if_exists(path: &Path) -> WatchResult<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertEntry, CelestialObject, ObservationWindow, Tier};
    use chrono::{Duration, TimeZone, Utc};
    use qtty::Degrees;

    fn payload() -> AlertPayload {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 21, 30, 0).unwrap();
        let object = CelestialObject::new("C34ABC1", Degrees::new(45.0), Degrees::new(30.0), 19.8);
        let mut payload = AlertPayload::new(now);
        payload.entries.push(AlertEntry::new(
            &object,
            Tier::Now,
            ObservationWindow::new(now, now + Duration::hours(2)),
            "https://example.org/pccp",
        ));
        payload.report = "report".to_string();
        payload
    }

    #[test]
    fn test_write_read_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = PendingAlertStore::in_dir(dir.path());

        assert!(store.write(&payload()).unwrap());
        assert!(store.is_pending());
        assert!(store.flag_path().exists());
        assert_eq!(store.read().unwrap(), Some(payload()));

        store.clear().unwrap();
        assert!(!store.is_pending());
        assert!(!store.flag_path().exists());
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn test_empty_payload_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let store = PendingAlertStore::in_dir(dir.path());

        assert!(!store.write(&AlertPayload::new(Utc::now())).unwrap());
        assert!(!store.is_pending());
        assert!(!store.flag_path().exists());
    }

    #[test]
    fn test_artifact_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = PendingAlertStore::in_dir(dir.path());
        store.write(&payload()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.alert_path()).unwrap()).unwrap();
        let entry = &raw["entries"][0];
        assert_eq!(entry["designation"], "C34ABC1");
        assert_eq!(entry["tier"], "NOW");
        assert_eq!(entry["ra"], 45.0);
        assert_eq!(entry["window_start"], "2026-01-15T21:30:00Z");
        assert_eq!(entry["link"], "https://example.org/pccp");
    }
}
