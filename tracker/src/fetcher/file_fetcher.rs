use std::path::PathBuf;

use log::debug;

use super::{FetchResult, Fetcher};

/// Reads documents from local paths or `file://` URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

impl Fetcher for FileFetcher {
    async fn fetch(&self, locator: &str) -> FetchResult {
        let path = PathBuf::from(locator.strip_prefix("file://").unwrap_or(locator));
        debug!("Reading rule text from '{}'", path.display());

        match tokio::fs::read_to_string(&path).await {
            Ok(text) => FetchResult::Text(text),
            Err(error) => {
                FetchResult::Failure(format!("Cannot read {}: {error}", path.display()))
            }
        }
    }
}
