use std::fmt;

use log::{info, warn};
use serde::Serialize;

use crate::{
    app_state::database::{Database, models::Version},
    consts::{BASELINE_LABEL, CHANGE_LABEL},
    errors::{TrackerError, fetch_error, storage_error},
    fetcher::{FetchResult, Fetcher},
    registry::TrackedDocument,
};

/// Why fetched text was not stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RejectionReason {
    FetchFailure { reason: String },
    InsufficientContent { length: usize, minimum: usize },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchFailure { reason } => write!(f, "{reason}"),
            Self::InsufficientContent { length, minimum } => write!(
                f,
                "fetched {length} characters but at least {minimum} are required"
            ),
        }
    }
}

impl From<RejectionReason> for TrackerError {
    fn from(reason: RejectionReason) -> Self {
        match reason {
            RejectionReason::FetchFailure { reason } => fetch_error(reason),
            RejectionReason::InsufficientContent { length, minimum } => {
                TrackerError::InsufficientContent { length, minimum }
            }
        }
    }
}

/// The result of evaluating one fetch of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum Outcome {
    Rejected { reason: RejectionReason },
    BaselineEstablished { version: Version },
    ChangeLogged { version: Version },
    NoChange,
}

impl Outcome {
    /// The version appended by this evaluation, if any.
    pub fn version(&self) -> Option<&Version> {
        match self {
            Self::BaselineEstablished { version } | Self::ChangeLogged { version } => {
                Some(version)
            }
            Self::Rejected { .. } | Self::NoChange => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { reason } => write!(f, "Rejected: {reason}"),
            Self::BaselineEstablished { .. } => write!(f, "Baseline Established"),
            Self::ChangeLogged { .. } => write!(f, "Change Logged"),
            Self::NoChange => write!(f, "Compliant"),
        }
    }
}

/// Decides whether freshly fetched text becomes a new version.
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    database: Database,
    minimum_content_length: usize,
}

impl ChangeDetector {
    pub fn new(database: Database, minimum_content_length: usize) -> Self {
        Self {
            database,
            minimum_content_length,
        }
    }

    /// Returns the text worth storing, or why it is not.
    ///
    /// Length is counted in characters after trimming surrounding whitespace;
    /// empty text is rejected even with a zero minimum.
    pub fn accept(&self, fetch_result: FetchResult) -> Result<String, RejectionReason> {
        let text = match fetch_result {
            FetchResult::Text(text) => text,
            FetchResult::Failure(reason) => return Err(RejectionReason::FetchFailure { reason }),
        };

        let length = text.trim().chars().count();
        if length == 0 || length < self.minimum_content_length {
            return Err(RejectionReason::InsufficientContent {
                length,
                minimum: self.minimum_content_length,
            });
        }

        Ok(text)
    }

    pub async fn evaluate(
        &self,
        document_id: &str,
        fetch_result: FetchResult,
    ) -> Result<Outcome, TrackerError> {
        let text = match self.accept(fetch_result) {
            Ok(text) => text,
            Err(reason) => {
                warn!("Rejected fetch of rule `{document_id}`: {reason}");
                return Ok(Outcome::Rejected { reason });
            }
        };

        let mut ingestion = self
            .database
            .begin_ingestion(document_id)
            .await
            .map_err(storage_error)?;

        let latest = ingestion.latest().await.map_err(storage_error)?;

        let outcome = match latest {
            None => Outcome::BaselineEstablished {
                version: ingestion
                    .append(&text, BASELINE_LABEL)
                    .await
                    .map_err(storage_error)?,
            },
            Some(latest) if latest.text != text => Outcome::ChangeLogged {
                version: ingestion
                    .append(&text, CHANGE_LABEL)
                    .await
                    .map_err(storage_error)?,
            },
            Some(_) => Outcome::NoChange,
        };

        if outcome.version().is_some() {
            ingestion.commit().await.map_err(storage_error)?;
        }

        info!("Rule `{document_id}`: {outcome}");

        Ok(outcome)
    }

    /// Fetches the document's current text and evaluates it.
    pub async fn audit(
        &self,
        fetcher: &impl Fetcher,
        document: &TrackedDocument,
    ) -> Result<Outcome, TrackerError> {
        info!("Auditing rule `{}` ({})", document.id, document.name);
        let fetch_result = fetcher.fetch(&document.locator).await;

        self.evaluate(&document.id, fetch_result).await
    }
}
