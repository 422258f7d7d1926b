use anyhow::anyhow;
use chrono::{DateTime, Utc};
use rule_redline::{DiffStats, FoldedRow, render_text, split_lines};
use serde::Serialize;

use crate::{
    app_state::database::{
        Database,
        models::{Version, VersionId, VersionMetadata},
    },
    config::display_config::DisplayConfig,
    errors::{SerializedError, TrackerError, not_found_error, storage_error},
};

/// A redline between two stored versions, ready for a front end.
///
/// When a version cannot be loaded the comparison is empty and `error`
/// explains why.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionComparison {
    pub from: Option<VersionMetadata>,
    pub to: Option<VersionMetadata>,
    pub identical: bool,
    pub stats: DiffStats,
    pub suggested_height: u32,
    pub rows: Vec<FoldedRow>,
    pub error: Option<SerializedError>,
}

impl VersionComparison {
    /// Compares two versions, folding unchanged stretches down to `context`
    /// rows around each change, or keeping every row when `context` is
    /// `None`.
    pub fn between(
        from: &Version,
        to: &Version,
        context: Option<usize>,
        display: &DisplayConfig,
    ) -> Self {
        let rendered = render_text(&from.text, &to.text);
        let rows = match context {
            Some(context) => rendered.fold(context),
            None => rendered.rows().iter().cloned().map(FoldedRow::Row).collect(),
        };

        Self {
            from: Some(from.into()),
            to: Some(to.into()),
            identical: from.text == to.text,
            stats: rendered.stats(),
            suggested_height: display.sizing_policy().suggested_size(
                split_lines(&from.text).len(),
                split_lines(&to.text).len(),
            ),
            rows,
            error: None,
        }
    }

    /// Compares two versions of `rule_id`. Either side defaults to the
    /// oldest or newest archived version of the rule.
    ///
    /// Lookup failures, including a version that belongs to another rule,
    /// end up in `error`; only storage failures while reading the history
    /// are returned as errors.
    pub async fn for_rule(
        database: &Database,
        rule_id: &str,
        from: Option<VersionId>,
        to: Option<VersionId>,
        context: Option<usize>,
        display: &DisplayConfig,
    ) -> Result<Self, TrackerError> {
        let (from, to) = match (from, to) {
            (Some(from), Some(to)) => (from, to),
            (from, to) => {
                let history = database.history(rule_id).await.map_err(storage_error)?;
                let Some((oldest, newest)) = default_pair(&history) else {
                    return Ok(Self::failed(
                        &not_found_error(anyhow!("Rule `{rule_id}` has no archived versions")),
                        display,
                    ));
                };

                (from.unwrap_or(oldest), to.unwrap_or(newest))
            }
        };

        Ok(Self::load(database, rule_id, from, to, context, display).await)
    }

    pub async fn load(
        database: &Database,
        rule_id: &str,
        from: VersionId,
        to: VersionId,
        context: Option<usize>,
        display: &DisplayConfig,
    ) -> Self {
        let versions = match version_of_rule(database, rule_id, from).await {
            Ok(from) => version_of_rule(database, rule_id, to)
                .await
                .map(|to| (from, to)),
            Err(error) => Err(error),
        };

        match versions {
            Ok((from, to)) => Self::between(&from, &to, context, display),
            Err(error) => Self::failed(&error, display),
        }
    }

    /// An empty comparison carrying the error that prevented it.
    pub fn failed(error: &TrackerError, display: &DisplayConfig) -> Self {
        Self {
            suggested_height: display.sizing_policy().suggested_size(0, 0),
            error: Some(error.serialize()),
            ..Self::default()
        }
    }
}

async fn version_of_rule(
    database: &Database,
    rule_id: &str,
    version_id: VersionId,
) -> Result<Version, TrackerError> {
    let version = database.version(version_id).await?;
    if version.document_id != rule_id {
        return Err(not_found_error(anyhow!(
            "Version `{version_id}` does not belong to rule `{rule_id}`"
        )));
    }

    Ok(version)
}

/// The oldest and newest version of a history listed newest first.
pub fn default_pair(history: &[VersionMetadata]) -> Option<(VersionId, VersionId)> {
    Some((history.last()?.id, history.first()?.id))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LengthPoint {
    pub captured_at: DateTime<Utc>,
    pub text_length: i64,
}

/// Overview of a document's history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub version_count: usize,
    pub latest_captured_at: Option<DateTime<Utc>>,
    pub latest_text_length: Option<i64>,

    /// Oldest first.
    pub length_timeline: Vec<LengthPoint>,
}

impl From<&[VersionMetadata]> for DocumentSummary {
    fn from(history: &[VersionMetadata]) -> Self {
        let latest = history.first();

        Self {
            version_count: history.len(),
            latest_captured_at: latest.map(|version| version.captured_at),
            latest_text_length: latest.map(|version| version.text_length),
            length_timeline: history
                .iter()
                .rev()
                .map(|version| LengthPoint {
                    captured_at: version.captured_at,
                    text_length: version.text_length,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use pretty_assertions::assert_eq;

    use super::*;

    fn version(id: VersionId, text: &str) -> Version {
        Version {
            id,
            document_id: "4210".to_owned(),
            captured_at: Utc.with_ymd_and_hms(2025, 1, id as u32, 9, 0, 0).unwrap(),
            text: text.to_owned(),
            label: "Change Detected".to_owned(),
        }
    }

    #[test]
    fn test_identical_versions() {
        let comparison = VersionComparison::between(
            &version(1, "(a) Members shall\n(b) Reports"),
            &version(2, "(a) Members shall\n(b) Reports"),
            Some(3),
            &DisplayConfig::default(),
        );

        assert!(comparison.identical);
        assert!(!comparison.stats.has_changes());
        assert_eq!(comparison.rows.len(), 1);
        assert_eq!(comparison.suggested_height, 200);
    }

    #[test]
    fn test_full_comparison_keeps_every_row() {
        let comparison = VersionComparison::between(
            &version(1, "a\nb\nc\nd\ne\nf\ng\nh"),
            &version(2, "a\nb\nc\nd\ne\nf\ng\nH"),
            None,
            &DisplayConfig::default(),
        );

        assert!(!comparison.identical);
        assert_eq!(comparison.rows.len(), 8);
        assert_eq!(comparison.stats.added, 1);
        assert_eq!(comparison.stats.deleted, 1);
        assert_eq!(comparison.from.map(|from| from.text_length), Some(15));
    }

    #[test]
    fn test_default_pair_is_oldest_and_newest() {
        let history = [3, 2, 1]
            .map(|id| VersionMetadata::from(&version(id, "text")))
            .to_vec();

        assert_eq!(default_pair(&history), Some((1, 3)));
        assert_eq!(default_pair(&history[2..]), Some((1, 1)));
        assert_eq!(default_pair(&[]), None);
    }

    #[test]
    fn test_summary() {
        let history = [version(2, "longer text"), version(1, "text")]
            .iter()
            .map(VersionMetadata::from)
            .collect::<Vec<_>>();

        let summary = DocumentSummary::from(history.as_slice());
        assert_eq!(summary.version_count, 2);
        assert_eq!(summary.latest_text_length, Some(11));
        assert_eq!(
            summary
                .length_timeline
                .iter()
                .map(|point| point.text_length)
                .collect::<Vec<_>>(),
            vec![4, 11]
        );

        let empty: &[VersionMetadata] = &[];
        assert_eq!(DocumentSummary::from(empty), DocumentSummary::default());
    }
}
