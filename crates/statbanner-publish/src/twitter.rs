//! Profile banner upload via `account/update_profile_banner`.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use tracing::{debug, info};

use statbanner_core::{Error, Result, TwitterCredentials};

use crate::oauth::{OAuthSigner, RequestNonce};
use crate::{BannerPlacement, BannerPublisher};

pub const DEFAULT_API_BASE: &str = "https://api.twitter.com";
const BANNER_PATH: &str = "/1.1/account/update_profile_banner.json";

/// Uploads the banner for the account the credentials belong to.
pub struct TwitterPublisher {
    client: Client,
    credentials: TwitterCredentials,
    api_base: String,
}

impl TwitterPublisher {
    pub fn new(credentials: TwitterCredentials, timeout: Duration) -> Result<Self> {
        Self::with_api_base(credentials, timeout, DEFAULT_API_BASE)
    }

    /// Point at a different API host (tests, proxies).
    pub fn with_api_base(
        credentials: TwitterCredentials,
        timeout: Duration,
        api_base: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(format!("Failed to build HTTP client: {}", e)))?;
        let api_base: String = api_base.into();
        Ok(Self {
            client,
            credentials,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn form_params(image: &[u8], placement: &BannerPlacement) -> Vec<(String, String)> {
        vec![
            ("banner".into(), BASE64.encode(image)),
            ("width".into(), placement.width.to_string()),
            ("height".into(), placement.height.to_string()),
            ("offset_left".into(), placement.offset_left.to_string()),
            ("offset_top".into(), placement.offset_top.to_string()),
        ]
    }
}

#[async_trait]
impl BannerPublisher for TwitterPublisher {
    async fn publish(&self, image: &[u8], placement: &BannerPlacement) -> Result<()> {
        let url = format!("{}{}", self.api_base, BANNER_PATH);
        let params = Self::form_params(image, placement);

        let authorization = OAuthSigner::new(&self.credentials).authorization_header(
            "POST",
            &url,
            &params,
            &RequestNonce::generate(),
        )?;

        debug!("POST {} ({} byte image)", url, image.len());

        let response = self
            .client
            .post(&url)
            .header("Authorization", authorization)
            .form(&params)
            .send()
            .await
            .map_err(|e| Error::Publish(format!("Banner upload failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Publish(format!("API error {}: {}", status, body)));
        }

        info!("Banner updated ({})", status);
        Ok(())
    }

    fn name(&self) -> &str {
        "twitter"
    }
}
