use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use super::responses::HistoryResponse;
use crate::{
    app_state::AppState,
    comparison::DocumentSummary,
    errors::{TrackerError, storage_error},
};

#[derive(Debug, Deserialize)]
pub struct FetchHistoryPathParams {
    rule_id: String,
}

#[axum::debug_handler]
pub async fn fetch_history(
    Path(FetchHistoryPathParams { rule_id }): Path<FetchHistoryPathParams>,
    State(state): State<AppState>,
) -> Result<Json<HistoryResponse>, TrackerError> {
    let versions = state
        .database
        .history(&rule_id)
        .await
        .map_err(storage_error)?;
    let summary = DocumentSummary::from(versions.as_slice());

    Ok(Json(HistoryResponse {
        rule_id,
        versions,
        summary,
    }))
}
