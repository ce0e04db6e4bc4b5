use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, info};

use super::endpoints;
use crate::config::FetchConfig;
use crate::fetch::FetchError;

/// Client for raw METAR text
#[derive(Clone)]
pub struct MetarClient {
    http: Client,
    base_url: String,
}

impl MetarClient {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn metar_url(&self, ids: &str) -> String {
        format!(
            "{}{}?ids={}&format={}",
            self.base_url,
            endpoints::METAR,
            ids,
            endpoints::FORMAT_RAW
        )
    }

    /// Fetch raw reports for a comma-separated list of station ids in one request
    pub async fn fetch_raw(&self, ids: &str) -> Result<String, FetchError> {
        let url = self.metar_url(ids);
        debug!("Fetching METAR: {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Request { station: ids.to_string(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                station: ids.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|source| FetchError::Request { station: ids.to_string(), source })?;

        info!("Fetched {} report lines for {}", text.lines().filter(|l| !l.trim().is_empty()).count(), ids);
        Ok(text)
    }

    /// Fetch raw reports for a single station
    pub async fn fetch_station(&self, id: &str) -> Result<String, FetchError> {
        self.fetch_raw(id).await
    }
}
