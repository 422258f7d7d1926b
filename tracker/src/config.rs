use std::path::Path;

use anyhow::{Context as _, Result};
use database_config::DatabaseConfig;
use display_config::DisplayConfig;
use ingestion_config::IngestionConfig;
use log::info;
use registry_config::RegistryConfig;
use serde::{Deserialize, Serialize};
use server_config::ServerConfig;
use tokio::fs;

pub mod database_config;
pub mod display_config;
pub mod ingestion_config;
pub mod registry_config;
pub mod server_config;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub ingestion: IngestionConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Loads the configuration, then writes it back so that every default
    /// that was applied becomes visible in the file.
    pub async fn read_or_create(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            info!("Loading configuration from '{}'", path.display());
            Self::load_from_file(path).await?
        } else {
            Self::default()
        };

        config.write(path).await?;
        info!("Updated configuration at '{}'", path.display());

        Ok(config)
    }

    pub async fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).await.with_context(|| {
            format!(
                "Cannot load configuration from disk from {}",
                path.display()
            )
        })?;

        let config = serde_yaml::from_str(&contents).context("Failed to parse configuration")?;

        Ok(config)
    }

    pub async fn write(&self, path: &Path) -> Result<()> {
        let contents = serde_yaml::to_string(&self).context("Failed to serialize configuration")?;

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Cannot create directory {}", parent.display()))?;
        }

        fs::write(path, contents)
            .await
            .context("Failed to write configuration to disk")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::consts::{DEFAULT_MINIMUM_CONTENT_LENGTH, DEFAULT_PORT};

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = serde_yaml::from_str(
            "ingestion:\n  minimum_content_length: 100\nserver:\n  port: 8080\n",
        )
        .unwrap();

        assert_eq!(config.ingestion.minimum_content_length, 100);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database, DatabaseConfig::default());
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            config.ingestion.minimum_content_length,
            DEFAULT_MINIMUM_CONTENT_LENGTH
        );
        assert_eq!(config.server.port, DEFAULT_PORT);
    }

    #[tokio::test]
    async fn test_read_or_create_writes_defaults() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("nested").join("config.yml");

        let created = Config::read_or_create(&path).await.unwrap();
        assert!(path.exists());

        let reloaded = Config::read_or_create(&path).await.unwrap();
        assert_eq!(created, reloaded);
    }
}
