use serde::Serialize;

use crate::{app_state::database::models::VersionMetadata, comparison::DocumentSummary};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PingResponse {
    pub server_version: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub rule_id: String,
    pub versions: Vec<VersionMetadata>,
    pub summary: DocumentSummary,
}
