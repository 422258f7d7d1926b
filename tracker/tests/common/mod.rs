#![allow(dead_code)]

use std::{collections::HashMap, path::Path, sync::Mutex};

use rule_tracker::{
    app_state::database::Database,
    config::database_config::DatabaseConfig,
    fetcher::{FetchResult, Fetcher},
};
use tempfile::TempDir;

pub const MINIMUM_CONTENT_LENGTH: usize = 20;

/// A version store in a fresh temporary directory. The directory is removed
/// when the returned guard is dropped.
pub async fn temporary_database() -> (TempDir, Database) {
    let directory = tempfile::tempdir().unwrap();
    let database = open_database(directory.path()).await;

    (directory, database)
}

pub async fn open_database(directory: &Path) -> Database {
    Database::try_new(&DatabaseConfig::for_path(&directory.join("regulations.db")))
        .await
        .unwrap()
}

/// Serves canned responses keyed by locator.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    responses: Mutex<HashMap<String, FetchResult>>,
}

impl ScriptedFetcher {
    pub fn respond(&self, locator: &str, result: FetchResult) {
        self.responses
            .lock()
            .unwrap()
            .insert(locator.to_owned(), result);
    }
}

impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, locator: &str) -> FetchResult {
        self.responses
            .lock()
            .unwrap()
            .get(locator)
            .cloned()
            .unwrap_or_else(|| FetchResult::Failure(format!("No response scripted for {locator}")))
    }
}
