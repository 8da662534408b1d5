//! Configuration presence probe

use axum::{extract::State, Json};

use crate::server::state::AppState;
use crate::types::ConfigStatusResponse;

/// Report which Drive settings are present, without their values
pub async fn config_status(State(state): State<AppState>) -> Json<ConfigStatusResponse> {
    Json(ConfigStatusResponse::from_config(&state.config().drive))
}
