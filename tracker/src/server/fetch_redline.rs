use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::{
    app_state::{AppState, database::models::VersionId},
    comparison::VersionComparison,
    errors::TrackerError,
};

#[derive(Debug, Deserialize)]
pub struct FetchRedlinePathParams {
    rule_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RedlineQuery {
    from: Option<VersionId>,
    to: Option<VersionId>,
    context: Option<usize>,
    #[serde(default)]
    full: bool,
}

/// Version lookups that fail are reported inside the comparison so that a
/// front end can still lay out the page.
#[axum::debug_handler]
pub async fn fetch_redline(
    Path(FetchRedlinePathParams { rule_id }): Path<FetchRedlinePathParams>,
    Query(query): Query<RedlineQuery>,
    State(state): State<AppState>,
) -> Result<Json<VersionComparison>, TrackerError> {
    let display = &state.config.display;
    let context = if query.full {
        None
    } else {
        Some(query.context.unwrap_or(display.context_lines))
    };

    let comparison = VersionComparison::for_rule(
        &state.database,
        &rule_id,
        query.from,
        query.to,
        context,
        display,
    )
    .await?;

    Ok(Json(comparison))
}
