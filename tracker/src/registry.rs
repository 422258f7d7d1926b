use std::{collections::HashSet, path::Path};

use anyhow::{Context as _, Result, bail};
use log::{info, warn};
use serde::{Deserialize, Serialize};

pub type DocumentId = String;

/// A rule document whose published text is being tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedDocument {
    pub id: DocumentId,
    pub name: String,

    /// URL or local path handed to the fetcher.
    #[serde(rename = "url")]
    pub locator: String,
}

/// The ordered, read-only list of tracked documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Registry {
    documents: Vec<TrackedDocument>,
}

impl Registry {
    pub fn try_new(documents: Vec<TrackedDocument>) -> Result<Self> {
        let mut seen = HashSet::new();
        for document in &documents {
            if !seen.insert(document.id.as_str()) {
                bail!("Duplicate rule id `{}` in registry", document.id);
            }
        }

        Ok(Self { documents })
    }

    /// Loads a registry from JSON, or from YAML when the extension is
    /// `.yml`/`.yaml`. A missing file is an empty registry.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                "Registry file '{}' does not exist, no rules are tracked",
                path.display()
            );
            return Ok(Self::default());
        }

        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Cannot read registry from {}", path.display()))?;

        let is_yaml = path
            .extension()
            .is_some_and(|extension| extension == "yml" || extension == "yaml");
        let documents: Vec<TrackedDocument> = if is_yaml {
            serde_yaml::from_str(&contents).context("Failed to parse YAML registry")?
        } else {
            serde_json::from_str(&contents).context("Failed to parse JSON registry")?
        };

        let registry = Self::try_new(documents)
            .with_context(|| format!("Invalid registry at {}", path.display()))?;
        info!("Loaded {} tracked rules", registry.len());

        Ok(registry)
    }

    pub fn get(&self, id: &str) -> Option<&TrackedDocument> {
        self.documents.iter().find(|document| document.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedDocument> { self.documents.iter() }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }
}
