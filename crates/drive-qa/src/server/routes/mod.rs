//! API routes for the Drive Q&A server

pub mod chat;
pub mod documents;
pub mod status;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Folder corpus
        .route("/google-drive", get(documents::list_documents))
        // Question answering
        .route("/chat", post(chat::chat))
        // Configuration probe
        .route("/config/status", get(status::config_status))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let (provider, model) = state.llm_label().unwrap_or(("none", "none"));

    Json(serde_json::json!({
        "name": "drive-qa",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Question answering over the documents of a Google Drive folder",
        "llm": {
            "provider": provider,
            "model": model,
        },
        "endpoints": {
            "GET /api/google-drive": "List and normalize every file in the configured folder",
            "POST /api/chat": "Answer a question over supplied documents and history",
            "GET /api/config/status": "Report which Drive settings are present",
            "GET /api/info": "Service description"
        },
        "formats": {
            "spreadsheet": "Every tab as tab-separated rows",
            "document": "Exported as plain text",
            "pdf": "Extracted text with page count",
            "other": "Downloaded as-is"
        }
    }))
}
