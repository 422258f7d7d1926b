use std::path::Path;

use anyhow::{Context as _, Result};

use crate::{
    app_state::database::Database, change_detection::ChangeDetector, config::Config,
    fetcher::SourceFetcher, registry::Registry,
};

pub mod database;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Config,
    pub database: Database,
    pub registry: Registry,
    pub fetcher: SourceFetcher,
    pub detector: ChangeDetector,
}

impl AppState {
    pub async fn try_new(config_path: &Path) -> Result<Self> {
        let config = Config::read_or_create(config_path).await?;
        Self::from_config(config).await
    }

    pub async fn from_config(config: Config) -> Result<Self> {
        let database = Database::try_new(&config.database)
            .await
            .context("Failed to open the version store")?;
        let registry = Registry::load(&config.registry.path).await?;
        let fetcher = SourceFetcher::try_new(&config.ingestion)?;
        let detector =
            ChangeDetector::new(database.clone(), config.ingestion.minimum_content_length);

        Ok(Self {
            config,
            database,
            registry,
            fetcher,
            detector,
        })
    }
}
