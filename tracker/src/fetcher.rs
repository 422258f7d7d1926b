use std::future::Future;

use anyhow::Result;
pub use file_fetcher::FileFetcher;
pub use http_fetcher::HttpFetcher;
use serde::Serialize;

use crate::config::ingestion_config::IngestionConfig;

mod file_fetcher;
mod http_fetcher;

/// What a fetch produced. Failures carry a human-readable reason and are
/// data, not errors: the caller decides whether they matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum FetchResult {
    Text(String),
    Failure(String),
}

/// Retrieves the current published text of a document.
pub trait Fetcher {
    fn fetch(&self, locator: &str) -> impl Future<Output = FetchResult> + Send;
}

/// Fetches `http://` and `https://` locators over HTTP and everything else
/// from the local file system.
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl SourceFetcher {
    pub fn try_new(config: &IngestionConfig) -> Result<Self> {
        Ok(Self {
            http: HttpFetcher::try_new(config)?,
            file: FileFetcher,
        })
    }
}

impl Fetcher for SourceFetcher {
    async fn fetch(&self, locator: &str) -> FetchResult {
        if is_http(locator) {
            self.http.fetch(locator).await
        } else {
            self.file.fetch(locator).await
        }
    }
}

fn is_http(locator: &str) -> bool {
    let scheme = locator
        .split_once("://")
        .map(|(scheme, _)| scheme.to_ascii_lowercase());
    matches!(scheme.as_deref(), Some("http" | "https"))
}
