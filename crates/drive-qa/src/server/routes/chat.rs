//! Question answering endpoint

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{AskRequest, AskResponse};

/// Answer a question over the documents and history sent by the client
pub async fn chat(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>> {
    let Json(request) = payload?;
    let question = request.question()?;
    tracing::info!("Chat question over {} documents", request.documents.len());

    let answer = state
        .answers()?
        .ask(&request.documents, &request.history, Some(question))
        .await?;

    Ok(Json(AskResponse { answer }))
}
