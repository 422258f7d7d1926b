use axum::{Json, extract::State};

use crate::{app_state::AppState, registry::Registry};

#[axum::debug_handler]
pub async fn list_rules(State(state): State<AppState>) -> Json<Registry> { Json(state.registry) }
