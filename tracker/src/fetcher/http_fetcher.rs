use anyhow::{Context as _, Result};
use log::debug;
use reqwest::Client;

use super::{FetchResult, Fetcher};
use crate::config::ingestion_config::IngestionConfig;

/// Plain HTTP GET of the response body. No markup is stripped.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn try_new(config: &IngestionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.fetch_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> reqwest::Result<String> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, locator: &str) -> FetchResult {
        debug!("Fetching rule text from {locator}");

        match self.get(locator).await {
            Ok(text) => FetchResult::Text(text),
            Err(error) => FetchResult::Failure(format!("Connection error: {error}")),
        }
    }
}
