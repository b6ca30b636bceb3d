//! HTTP client for the analytics endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use statbanner_core::{Error, NewsStats, Result, SourceEndpoints, VimStats};

use crate::validate::Validate;

/// Where the orchestrator gets current numbers from.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Source A.
    async fn fetch_vim(&self) -> Result<VimStats>;

    /// Source B.
    async fn fetch_news(&self) -> Result<NewsStats>;
}

/// Fetches both sources from their configured URLs.
pub struct HttpMetricsSource {
    client: Client,
    endpoints: SourceEndpoints,
}

impl HttpMetricsSource {
    pub fn new(endpoints: SourceEndpoints, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("statbanner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &SourceEndpoints {
        &self.endpoints
    }

    async fn fetch_json<T>(&self, url: &str) -> Result<T>
    where
        T: DeserializeOwned + Validate,
    {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| Error::Http(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Http(format!("{} returned {}: {}", url, status, body)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Http(format!("Reading body from {} failed: {}", url, e)))?;

        let value: T = serde_json::from_slice(&bytes)
            .map_err(|e| Error::Decode(format!("{}: {}", url, e)))?;
        value.validate()?;
        Ok(value)
    }
}

#[async_trait]
impl MetricsSource for HttpMetricsSource {
    async fn fetch_vim(&self) -> Result<VimStats> {
        self.fetch_json(&self.endpoints.vim_url).await
    }

    async fn fetch_news(&self) -> Result<NewsStats> {
        self.fetch_json(&self.endpoints.news_url).await
    }
}
