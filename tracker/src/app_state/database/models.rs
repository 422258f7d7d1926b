use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::registry::DocumentId;

pub type VersionId = i64;

/// A stored snapshot of a document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: VersionId,
    pub document_id: DocumentId,
    pub captured_at: DateTime<Utc>,
    pub text: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VersionMetadata {
    pub id: VersionId,
    pub document_id: DocumentId,
    pub captured_at: DateTime<Utc>,

    /// In characters.
    pub text_length: i64,
    pub label: String,
}

impl From<&Version> for VersionMetadata {
    fn from(version: &Version) -> Self {
        Self {
            id: version.id,
            document_id: version.document_id.clone(),
            captured_at: version.captured_at,
            text_length: version.text.chars().count() as i64,
            label: version.label.clone(),
        }
    }
}
