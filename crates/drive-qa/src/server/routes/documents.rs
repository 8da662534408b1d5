//! Drive folder listing endpoint

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::DocumentsResponse;

/// List and decode every file in the configured folder
pub async fn list_documents(State(state): State<AppState>) -> Result<Json<DocumentsResponse>> {
    let folder_id = state.config().drive.require_folder_id()?;
    let pipeline = state.ingest()?;

    let documents = pipeline.ingest(folder_id).await?;

    Ok(Json(DocumentsResponse { documents }))
}
