//! Error types for the Drive Q&A service

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for Drive Q&A operations
pub type Result<T> = std::result::Result<T, Error>;

/// Drive Q&A errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Service account authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Folder listing failed or returned a malformed response
    #[error("Listing error: {0}")]
    Listing(String),

    /// Drive or Sheets API call failed
    #[error("Drive error: {0}")]
    Drive(String),

    /// Decoding a single file failed
    #[error("Failed to decode '{file}': {message}")]
    Decode { file: String, message: String },

    /// The ask request carried no question text
    #[error("Question is required")]
    MissingQuestion,

    /// Completion call failed
    #[error("LLM error: {0}")]
    Llm(String),

    /// Completion response carried no text content block
    #[error("Completion response contained no text content")]
    NoTextContent,

    /// Request body could not be read as the expected JSON shape
    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a listing error
    pub fn listing(message: impl Into<String>) -> Self {
        Self::Listing(message.into())
    }

    /// Create a drive error
    pub fn drive(message: impl Into<String>) -> Self {
        Self::Drive(message.into())
    }

    /// Create a decode error
    pub fn decode(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Short machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config_error",
            Error::Auth(_) => "auth_error",
            Error::Listing(_) => "listing_error",
            Error::Drive(_) => "drive_error",
            Error::Decode { .. } => "decode_error",
            Error::MissingQuestion => "missing_question",
            Error::Llm(_) => "llm_error",
            Error::NoTextContent => "no_text_content",
            Error::InvalidRequest(_) => "invalid_request",
            Error::Http(_) => "http_error",
            Error::Internal(_) => "internal_error",
        }
    }

    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            Error::MissingQuestion => StatusCode::BAD_REQUEST,
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::Llm(_) | Error::NoTextContent => StatusCode::SERVICE_UNAVAILABLE,
            Error::Http(_) | Error::Drive(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable summary of the failed operation
    fn summary(&self) -> &'static str {
        match self {
            Error::Listing(_) | Error::Drive(_) | Error::Auth(_) | Error::Decode { .. } => {
                "Failed to load documents from Google Drive"
            }
            Error::MissingQuestion
            | Error::InvalidRequest(_)
            | Error::Llm(_)
            | Error::NoTextContent => {
                "Error processing your request"
            }
            _ => "Internal server error",
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("{} ({})", self, self.kind());
        } else {
            tracing::warn!("{} ({})", self, self.kind());
        }

        let body = Json(json!({
            "message": self.summary(),
            "error": self.to_string(),
            "type": self.kind(),
        }));

        (status, body).into_response()
    }
}
