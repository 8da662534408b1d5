//! Ask request types

use serde::{Deserialize, Serialize};

use super::conversation::ConversationTurn;
use super::document::NormalizedDocument;
use crate::error::{Error, Result};

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskRequest {
    /// The question to answer
    #[serde(default)]
    pub question: Option<String>,

    /// Corpus previously returned by the ingestion endpoint
    #[serde(default)]
    pub documents: Vec<NormalizedDocument>,

    /// Prior conversation turns
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
}

impl AskRequest {
    /// The question text, rejecting absent or blank questions
    pub fn question(&self) -> Result<&str> {
        validate_question(self.question.as_deref())
    }
}

/// Reject absent or whitespace-only questions
pub fn validate_question(question: Option<&str>) -> Result<&str> {
    match question {
        Some(q) if !q.trim().is_empty() => Ok(q),
        _ => Err(Error::MissingQuestion),
    }
}
