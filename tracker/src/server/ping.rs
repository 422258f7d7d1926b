use axum::Json;

use super::responses::PingResponse;
use crate::errors::TrackerError;

#[axum::debug_handler]
pub async fn ping() -> Result<Json<PingResponse>, TrackerError> {
    Ok(Json(PingResponse {
        server_version: env!("CARGO_PKG_VERSION").to_owned(),
    }))
}
