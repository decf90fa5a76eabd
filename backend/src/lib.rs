//! # PCCP Watch
//!
//! New-object alerting for the Minor Planet Center's Possible Comet Confirmation Page.
//!
//! Once per invocation the crate compares the freshly fetched PCCP catalog with the
//! designations seen in earlier runs, scans the next 25 hours for every new object from a
//! fixed observing site, and decides whether an alert should go out.
//!
//! ## Features
//!
//! - **Time Handling**: Modified Julian Date conversions and sidereal time
//! - **Visibility Computation**: Sun and object altitude, sampled observation windows
//! - **Catalog Diff**: order-preserving detection of new designations
//! - **Alerting**: NOW / TONIGHT tiers, text report, pending-alert artifact
//! - **Delivery**: macOS Notification Center and Discord webhooks
//!
//! ## Architecture
//!
//! - [`config`]: Site thresholds and notification settings (TOML or JSON)
//! - [`models`]: Catalog objects, windows, known set, alert payload
//! - [`parsing`]: PCCP text parser
//! - [`source`]: Where the catalog text comes from (file or HTTP)
//! - [`services`]: Observability engine and the watch cycle
//! - [`db`]: Known-set persistence and the pending-alert artifact
//! - [`notify`]: Delivery of pending alerts
//!
//! ## Example
//!
//! ```
//! use chrono::Utc;
//! use pccp_watch::config::WatchConfig;
//! use pccp_watch::db::LocalStateRepository;
//! use pccp_watch::parsing::parse_catalog_str;
//! use pccp_watch::services::run_cycle;
//!
//! let config = WatchConfig::from_toml_str(
//!     "obs_lon = 7.07181\nobs_lat = 43.6\nobs_alt = 50\n\
//!      min_alt_obj = 20.0\nmax_sun_alt = -12.0\nmax_mag = 21.0\n",
//! )
//! .unwrap();
//! let catalog =
//!     parse_catalog_str("C34ABC1  88 2026 01 15.4  3.0000 +30.0000 19.8").unwrap();
//! let repo = LocalStateRepository::new();
//!
//! let outcome = run_cycle(&config, &catalog, &repo, None, Utc::now()).unwrap();
//! assert_eq!(outcome.new_designations, vec!["C34ABC1"]);
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod notify;
pub mod parsing;
pub mod services;
pub mod source;

pub use error::{WatchError, WatchResult};
