//! Persistence for the watch state.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Watch cycle (services::watch_cycle)        │
//! └──────────────┬──────────────────────────────┘
//!                │ load once / save once
//! ┌──────────────▼──────────────────────────────┐
//! │  StateRepository trait (repository)         │
//! └──────┬───────────────────────────┬──────────┘
//!        │                           │
//! ┌──────▼───────────┐     ┌─────────▼─────────┐
//! │ FileStateRepo    │     │ LocalStateRepo    │
//! │ (state.json)     │     │ (in-memory)       │
//! └──────────────────┘     └───────────────────┘
//! ```
//!
//! The pending-alert artifact lives next to the state file (`alert_file`). Both are
//! replaced atomically through [`atomic::write_atomic`].

pub mod alert_file;
pub mod atomic;
pub mod factory;
pub mod repositories;
pub mod repository;

pub use alert_file::{PendingAlertStore, ALERT_FILE_NAME, FLAG_FILE_NAME};
pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::{FileStateRepository, LocalStateRepository, STATE_FILE_NAME};
pub use repository::StateRepository;
