//! Error types for the watch pipeline.

/// Result type for watch operations
pub type WatchResult<T> = Result<T, WatchError>;

/// Error type for watch operations.
///
/// Only [`WatchError::Configuration`] is fatal before any visibility is computed; the
/// other variants abort the current cycle without touching persisted state.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Catalog fetch error: {0}")]
    CatalogFetch(String),

    #[error("Catalog parse error: {0}")]
    CatalogParse(String),

    #[error("State error: {0}")]
    State(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WatchError {
    /// Whether the error should stop the process before any cycle work happens.
    pub fn is_fatal(&self) -> bool {
        matches!(self, WatchError::Configuration(_))
    }
}

impl From<tempfile::PersistError> for WatchError {
    fn from(err: tempfile::PersistError) -> Self {
        WatchError::Io(err.error)
    }
}
