use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_FETCH_TIMEOUT_SECONDS, DEFAULT_MINIMUM_CONTENT_LENGTH, DEFAULT_USER_AGENT,
};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct IngestionConfig {
    /// Fetched text shorter than this many characters (ignoring surrounding
    /// whitespace) is rejected instead of being stored.
    #[serde(default = "default_minimum_content_length")]
    pub minimum_content_length: usize,

    #[serde(default = "default_fetch_timeout_seconds")]
    pub fetch_timeout_seconds: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl IngestionConfig {
    pub fn fetch_timeout(&self) -> Duration { Duration::from_secs(self.fetch_timeout_seconds) }
}

fn default_minimum_content_length() -> usize {
    debug!("Using default minimum content length: {DEFAULT_MINIMUM_CONTENT_LENGTH}");
    DEFAULT_MINIMUM_CONTENT_LENGTH
}

fn default_fetch_timeout_seconds() -> u64 {
    debug!("Using default fetch timeout (s): {DEFAULT_FETCH_TIMEOUT_SECONDS}");
    DEFAULT_FETCH_TIMEOUT_SECONDS
}

fn default_user_agent() -> String {
    debug!("Using default user agent: {DEFAULT_USER_AGENT}");
    DEFAULT_USER_AGENT.to_owned()
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            minimum_content_length: default_minimum_content_length(),
            fetch_timeout_seconds: default_fetch_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}
