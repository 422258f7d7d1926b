use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::{
    app_state::{
        AppState,
        database::models::{Version, VersionId},
    },
    errors::TrackerError,
};

#[derive(Debug, Deserialize)]
pub struct FetchVersionPathParams {
    version_id: VersionId,
}

#[axum::debug_handler]
pub async fn fetch_version(
    Path(FetchVersionPathParams { version_id }): Path<FetchVersionPathParams>,
    State(state): State<AppState>,
) -> Result<Json<Version>, TrackerError> {
    Ok(Json(state.database.version(version_id).await?))
}
