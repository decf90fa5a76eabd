//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use qtty::{Degrees, Meters};

use pccp_watch::config::{SiteConfig, WatchConfig};
use pccp_watch::models::CelestialObject;

pub const R85_LONGITUDE: f64 = 7.07181;
pub const R85_LATITUDE: f64 = 43.6;

/// The R85 site with the default thresholds.
pub fn r85_site() -> SiteConfig {
    SiteConfig {
        longitude: Degrees::new(R85_LONGITUDE),
        latitude: Degrees::new(R85_LATITUDE),
        elevation: Meters::new(50.0),
        min_alt_obj: Degrees::new(20.0),
        max_sun_alt: Degrees::new(-12.0),
        max_mag: 21.0,
    }
}

pub fn r85_config() -> WatchConfig {
    WatchConfig::for_site(r85_site())
}

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid UTC instant")
}

pub fn object(designation: &str, ra: f64, dec: f64, magnitude: f64) -> CelestialObject {
    CelestialObject::new(designation, Degrees::new(ra), Degrees::new(dec), magnitude)
}

/// Three objects that can never alert from R85: two too far south, one too faint.
pub fn never_visible_catalog() -> Vec<CelestialObject> {
    vec![
        object("S80", 120.0, -80.0, 18.0),
        object("S60", 240.0, -60.0, 18.5),
        object("FAINT", 150.0, 40.0, 22.0),
    ]
}

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on unwind and serializes access to the process
/// environment across tests. `None` removes a variable.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let snapshot = changes
            .iter()
            .map(|(k, _)| (k.to_string(), std::env::var(k).ok()))
            .collect();
        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }
        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..).rev() {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}
