use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::{
    app_state::AppState,
    change_detection::Outcome,
    errors::{TrackerError, not_found_error},
};

#[derive(Debug, Deserialize)]
pub struct AuditRulePathParams {
    rule_id: String,
}

/// Rejected fetches are reported in the outcome, not as an error status.
#[axum::debug_handler]
pub async fn audit_rule(
    Path(AuditRulePathParams { rule_id }): Path<AuditRulePathParams>,
    State(state): State<AppState>,
) -> Result<Json<Outcome>, TrackerError> {
    let document = state
        .registry
        .get(&rule_id)
        .ok_or_else(|| not_found_error(anyhow!("Rule `{rule_id}` is not tracked")))?;

    let outcome = state.detector.audit(&state.fetcher, document).await?;

    Ok(Json(outcome))
}
