use log::debug;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BUSY_TIMEOUT_SECONDS, DEFAULT_MAX_CONNECTIONS, DEFAULT_SQLITE_URL};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    #[serde(default = "default_sqlite_url")]
    pub sqlite_url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_busy_timeout_seconds")]
    pub busy_timeout_seconds: u64,
}

impl DatabaseConfig {
    /// Configuration for a database file at the given path.
    pub fn for_path(path: &std::path::Path) -> Self {
        Self {
            sqlite_url: format!("sqlite://{}", path.display()),
            ..Self::default()
        }
    }
}

fn default_sqlite_url() -> String {
    debug!("Using default sqlite url: {DEFAULT_SQLITE_URL}");
    DEFAULT_SQLITE_URL.to_owned()
}

fn default_max_connections() -> u32 {
    debug!("Using default max connections: {DEFAULT_MAX_CONNECTIONS}");
    DEFAULT_MAX_CONNECTIONS
}

fn default_busy_timeout_seconds() -> u64 {
    debug!("Using default busy timeout (s): {DEFAULT_BUSY_TIMEOUT_SECONDS}");
    DEFAULT_BUSY_TIMEOUT_SECONDS
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_url: default_sqlite_url(),
            max_connections: default_max_connections(),
            busy_timeout_seconds: default_busy_timeout_seconds(),
        }
    }
}
