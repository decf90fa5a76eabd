//! Watch configuration file support.
//!
//! This module reads the observing-site configuration and the notification settings from
//! a TOML file (or JSON, when the file has a `.json` extension). The site keys are flat
//! at the top level of the file:
//!
//! ```toml
//! obs_lon = 7.07181
//! obs_lat = 43.60
//! obs_alt = 50
//! min_alt_obj = 20.0
//! max_sun_alt = -12.0
//! max_mag = 21.0
//!
//! discord_enabled = true
//! discord_webhook_url = "https://discord.com/api/webhooks/..."
//! ```
//!
//! Every site key is required. A missing threshold fails the load instead of falling
//! back to a default, because a wrong `max_sun_alt` or `min_alt_obj` would produce false
//! "observable" claims.

use qtty::{Degrees, Meters};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{WatchError, WatchResult};

pub const DEFAULT_CATALOG_URL: &str = "https://www.minorplanetcenter.net/iau/NEO/pccp.txt";
pub const DEFAULT_CATALOG_PAGE_URL: &str =
    "https://www.minorplanetcenter.net/iau/NEO/pccp_tabular.html";

/// Fixed observing site and observability thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Longitude, degrees east.
    #[serde(rename = "obs_lon")]
    pub longitude: Degrees,
    /// Latitude, degrees north.
    #[serde(rename = "obs_lat")]
    pub latitude: Degrees,
    /// Site elevation; informational only.
    #[serde(rename = "obs_alt")]
    pub elevation: Meters,
    /// Minimum object altitude above the horizon.
    pub min_alt_obj: Degrees,
    /// The Sun must be strictly below this altitude.
    pub max_sun_alt: Degrees,
    /// Limiting magnitude of the instrument (inclusive).
    pub max_mag: f64,
}

impl SiteConfig {
    /// Check ranges; every field must be finite.
    pub fn validate(&self) -> WatchResult<()> {
        let fields = [
            ("obs_lon", self.longitude.value()),
            ("obs_lat", self.latitude.value()),
            ("obs_alt", self.elevation.value()),
            ("min_alt_obj", self.min_alt_obj.value()),
            ("max_sun_alt", self.max_sun_alt.value()),
            ("max_mag", self.max_mag),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(WatchError::Configuration(format!(
                "'{}' must be a finite number",
                name
            )));
        }

        let lat = self.latitude.value();
        if !(-90.0..=90.0).contains(&lat) {
            return Err(WatchError::Configuration(format!(
                "'obs_lat' out of range [-90, 90]: {}",
                lat
            )));
        }

        let lon = self.longitude.value();
        if !(-180.0..=360.0).contains(&lon) {
            return Err(WatchError::Configuration(format!(
                "'obs_lon' out of range [-180, 360]: {}",
                lon
            )));
        }

        for (name, value) in [
            ("min_alt_obj", self.min_alt_obj.value()),
            ("max_sun_alt", self.max_sun_alt.value()),
        ] {
            if !(-90.0..=90.0).contains(&value) {
                return Err(WatchError::Configuration(format!(
                    "'{}' out of range [-90, 90]: {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Delivery settings for the notifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_macos_notify")]
    pub macos_notify: bool,
    #[serde(default = "default_macos_sound")]
    pub macos_sound: String,
    #[serde(default)]
    pub discord_enabled: bool,
    #[serde(default)]
    pub discord_webhook_url: String,
    /// e.g. `@here` or `<@&123456789>`
    #[serde(default)]
    pub discord_mention: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            macos_notify: default_macos_notify(),
            macos_sound: default_macos_sound(),
            discord_enabled: false,
            discord_webhook_url: String::new(),
            discord_mention: String::new(),
        }
    }
}

fn default_macos_notify() -> bool {
    true
}

fn default_macos_sound() -> String {
    "Glass".to_string()
}

fn default_catalog_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_catalog_page_url() -> String {
    DEFAULT_CATALOG_PAGE_URL.to_string()
}

fn default_site_name() -> String {
    "R85".to_string()
}

/// Full configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(flatten)]
    pub site: SiteConfig,
    #[serde(flatten)]
    pub notifications: NotificationSettings,
    #[serde(default = "default_site_name")]
    pub site_name: String,
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,
    #[serde(default = "default_catalog_page_url")]
    pub catalog_page_url: String,
}

impl WatchConfig {
    /// Build a configuration around a site with default catalog and notifier settings.
    pub fn for_site(site: SiteConfig) -> Self {
        Self {
            site,
            notifications: NotificationSettings::default(),
            site_name: default_site_name(),
            catalog_url: default_catalog_url(),
            catalog_page_url: default_catalog_page_url(),
        }
    }

    /// Load configuration from a file.
    ///
    /// # Arguments
    /// * `path` - Path to a `.toml` or `.json` configuration file
    ///
    /// # Returns
    /// * `Ok(WatchConfig)` if the file parses and validates
    /// * `Err(WatchError::Configuration)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> WatchResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            WatchError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> WatchResult<Self> {
        let config: WatchConfig = toml::from_str(content).map_err(|e| {
            WatchError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.site.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> WatchResult<Self> {
        let config: WatchConfig = serde_json::from_str(content).map_err(|e| {
            WatchError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.site.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches, in order, for `pccp-watch.toml`, `config.toml` and `config.json` in
    /// `data_dir`, then for `pccp-watch.toml` in the current directory.
    pub fn from_default_location(data_dir: &Path) -> WatchResult<Self> {
        let search_paths = vec![
            data_dir.join("pccp-watch.toml"),
            data_dir.join("config.toml"),
            data_dir.join("config.json"),
            PathBuf::from("pccp-watch.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(WatchError::Configuration(format!(
            "No configuration file found in {} or the current directory",
            data_dir.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const R85_TOML: &str = r#"
obs_lon = 7.07181
obs_lat = 43.60
obs_alt = 50
min_alt_obj = 20.0
max_sun_alt = -12.0
max_mag = 21.0
"#;

    #[test]
    fn test_parse_minimal_toml() {
        let config = WatchConfig::from_toml_str(R85_TOML).unwrap();
        assert!((config.site.latitude.value() - 43.60).abs() < 1e-12);
        assert!((config.site.longitude.value() - 7.07181).abs() < 1e-12);
        assert_eq!(config.site.elevation.value(), 50.0);
        assert_eq!(config.site.max_sun_alt.value(), -12.0);
        assert!(config.notifications.macos_notify);
        assert_eq!(config.notifications.macos_sound, "Glass");
        assert!(!config.notifications.discord_enabled);
        assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
        assert_eq!(config.site_name, "R85");
    }

    #[test]
    fn test_parse_legacy_json_layout() {
        let json = r#"{
            "obs_lon": 7.07181, "obs_lat": 43.60, "obs_alt": 50,
            "min_alt_obj": 20.0, "max_sun_alt": -18.0, "max_mag": 20.5,
            "discord_enabled": true,
            "discord_webhook_url": "https://discord.example/hook",
            "discord_mention": "@here"
        }"#;

        let config = WatchConfig::from_json_str(json).unwrap();
        assert_eq!(config.site.max_sun_alt.value(), -18.0);
        assert_eq!(config.site.max_mag, 20.5);
        assert!(config.notifications.discord_enabled);
        assert_eq!(config.notifications.discord_mention, "@here");
    }

    #[test]
    fn test_missing_threshold_is_fatal() {
        let toml = r#"
obs_lon = 7.07181
obs_lat = 43.60
obs_alt = 50
min_alt_obj = 20.0
max_mag = 21.0
"#;
        let err = WatchConfig::from_toml_str(toml).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("max_sun_alt"), "{}", err);
    }

    #[test]
    fn test_out_of_range_latitude_rejected() {
        let toml = R85_TOML.replace("obs_lat = 43.60", "obs_lat = 143.60");
        let err = WatchConfig::from_toml_str(&toml).unwrap_err();
        assert!(matches!(err, WatchError::Configuration(_)));
    }

    #[test]
    fn test_from_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("config.json");
        std::fs::write(
            &json_path,
            r#"{"obs_lon": 0, "obs_lat": 51.48, "obs_alt": 0,
                "min_alt_obj": 25, "max_sun_alt": -12, "max_mag": 19}"#,
        )
        .unwrap();

        let config = WatchConfig::from_file(&json_path).unwrap();
        assert_eq!(config.site.min_alt_obj.value(), 25.0);

        let found = WatchConfig::from_default_location(dir.path()).unwrap();
        assert_eq!(found, config);
    }

    #[test]
    fn test_default_location_missing() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nowhere");
        assert!(WatchConfig::from_default_location(&nested).is_err());
    }
}
