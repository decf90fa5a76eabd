//! Catalog sources.
//!
//! A [`CatalogSource`] returns the raw PCCP text; parsing happens in
//! [`crate::parsing`]. The HTTP source is only built with the `remote` feature.

mod file;
#[cfg(feature = "remote")]
mod http;

pub use file::FileCatalogSource;
#[cfg(feature = "remote")]
pub use http::HttpCatalogSource;

use crate::error::WatchResult;

/// Provider of raw catalog text.
pub trait CatalogSource {
    /// Fetch the full catalog text.
    ///
    /// # Returns
    /// * `Err(WatchError::CatalogFetch)` when the catalog cannot be retrieved
    fn fetch(&self) -> WatchResult<String>;

    /// Where the text comes from, for logs.
    fn describe(&self) -> String;
}

/// User-Agent sent with every outgoing request.
pub fn user_agent() -> String {
    format!("PccpWatch/{}", env!("CARGO_PKG_VERSION"))
}
