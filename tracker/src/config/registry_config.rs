use std::path::PathBuf;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_REGISTRY_PATH;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// JSON or YAML file listing the tracked rules.
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

fn default_path() -> PathBuf {
    debug!("Using default registry path: {DEFAULT_REGISTRY_PATH}");
    PathBuf::from(DEFAULT_REGISTRY_PATH)
}

impl Default for RegistryConfig {
    fn default() -> Self { Self { path: default_path() } }
}
