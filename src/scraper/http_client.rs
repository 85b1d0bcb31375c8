use crate::config::ScraperConfig;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::{PageSource, ScrapeError};

/// Thin reqwest wrapper. One GET at a time, no retries.
pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .gzip(true);

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let inner = builder.build().map_err(|source| ScrapeError::Network {
            url: config.site_base.clone(),
            source,
        })?;

        Ok(Self { inner })
    }

    /// Fetch a URL as text. Non-2xx is an error.
    pub async fn get_text(&self, url: &str) -> Result<String, ScrapeError> {
        debug!("GET {}", url);

        let network = |source| ScrapeError::Network {
            url: url.to_string(),
            source,
        };

        let resp = self.inner.get(url).send().await.map_err(network)?;
        let resp = resp.error_for_status().map_err(network)?;
        resp.text().await.map_err(network)
    }
}

#[async_trait]
impl PageSource for HttpClient {
    async fn fetch_page(&self, base_url: &str, page: u32) -> Result<String, ScrapeError> {
        self.get_text(&format!("{}{}", base_url, page)).await
    }
}
