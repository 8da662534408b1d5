//! Drive provider trait for listing and reading remote files

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;
use crate::types::FileDescriptor;

/// One page of a folder listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListPage {
    /// Files on this page; `None` when the provider omitted the array
    #[serde(default)]
    pub files: Option<Vec<FileDescriptor>>,
    /// Token for the next page, if any
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Payload of a raw download
#[derive(Debug, Clone, PartialEq)]
pub enum RawContent {
    /// Textual payload
    Text(String),
    /// Structured (JSON) payload
    Structured(serde_json::Value),
    /// Bytes that are not valid UTF-8
    Binary(Vec<u8>),
}

impl RawContent {
    /// Classify downloaded bytes using the response content type
    pub fn from_bytes(bytes: Vec<u8>, content_type: Option<&str>) -> Self {
        let is_json = content_type
            .map(|ct| ct.to_ascii_lowercase().contains("json"))
            .unwrap_or(false);

        if is_json {
            if let Ok(value) = serde_json::from_slice(&bytes) {
                return Self::Structured(value);
            }
        }

        match String::from_utf8(bytes) {
            Ok(text) => Self::Text(text),
            Err(e) => Self::Binary(e.into_bytes()),
        }
    }

    /// Render as text; structured payloads become compact JSON
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Structured(value) => value.to_string(),
            Self::Binary(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// Recover the payload bytes (for binary formats such as PDF)
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Structured(value) => value.to_string().into_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }
}

/// Trait for an already-authorized drive
///
/// Implementations:
/// - `GoogleDriveClient`: Google Drive v3 + Sheets v4 REST APIs
#[async_trait]
pub trait DriveProvider: Send + Sync {
    /// Fetch one page of files matching a Drive query
    async fn list_files(&self, query: &str, page_token: Option<&str>) -> Result<FileListPage>;

    /// Download a file's raw content
    async fn download(&self, file_id: &str) -> Result<RawContent>;

    /// Export a native document to the given media type
    async fn export(&self, file_id: &str, media_type: &str) -> Result<String>;

    /// Tab titles of a spreadsheet, in tab order (`None` for an untitled tab)
    async fn sheet_titles(&self, spreadsheet_id: &str) -> Result<Vec<Option<String>>>;

    /// All cell values of a range, row-major
    async fn sheet_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<serde_json::Value>>>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
