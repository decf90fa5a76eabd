use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use super::{user_agent, CatalogSource};
use crate::error::{WatchError, WatchResult};

const FETCH_TIMEOUT_SECS: u64 = 20;

/// Catalog downloaded over HTTP(S) with a blocking client.
#[derive(Clone)]
pub struct HttpCatalogSource {
    url: String,
    http: Client,
}

impl std::fmt::Debug for HttpCatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalogSource")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> WatchResult<Self> {
        let http = Client::builder()
            .user_agent(user_agent())
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| WatchError::CatalogFetch(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            url: url.into(),
            http,
        })
    }
}

impl CatalogSource for HttpCatalogSource {
    fn fetch(&self) -> WatchResult<String> {
        debug!(url = %self.url, "Fetching catalog");
        let resp = self
            .http
            .get(&self.url)
            .send()
            .map_err(|e| WatchError::CatalogFetch(format!("GET {} failed: {e}", self.url)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(WatchError::CatalogFetch(format!(
                "GET {} returned {}",
                self.url, status
            )));
        }

        resp.text()
            .map_err(|e| WatchError::CatalogFetch(format!("cannot read body of {}: {e}", self.url)))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
