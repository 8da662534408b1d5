//! Remote file descriptors and normalized documents

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Google Sheets native media type
pub const SPREADSHEET_MEDIA_TYPE: &str = "application/vnd.google-apps.spreadsheet";
/// Google Docs native media type
pub const RICH_DOCUMENT_MEDIA_TYPE: &str = "application/vnd.google-apps.document";
/// PDF media type
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Decoding strategy selected from a file's declared media type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Google Sheets spreadsheet (read tab by tab)
    Spreadsheet,
    /// Google Docs document (exported as plain text)
    RichDocument,
    /// PDF (text extracted from the raw bytes)
    Pdf,
    /// Anything else (downloaded as-is)
    Raw,
}

impl MediaKind {
    /// Classify a declared media type
    pub fn from_media_type(media_type: Option<&str>) -> Self {
        match media_type.map(str::trim) {
            Some(SPREADSHEET_MEDIA_TYPE) => Self::Spreadsheet,
            Some(RICH_DOCUMENT_MEDIA_TYPE) => Self::RichDocument,
            Some(PDF_MEDIA_TYPE) => Self::Pdf,
            _ => Self::Raw,
        }
    }

    /// Name used when the listing carried no display name
    pub fn placeholder_name(&self) -> &'static str {
        match self {
            Self::Spreadsheet => "Unnamed spreadsheet",
            Self::Pdf => "Unnamed PDF",
            Self::RichDocument | Self::Raw => "Unnamed document",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Spreadsheet => "Google Sheets",
            Self::RichDocument => "Google Docs",
            Self::Pdf => "PDF",
            Self::Raw => "File",
        }
    }
}

/// One entry of a folder listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Drive file id
    #[serde(default)]
    pub id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Declared media type
    #[serde(default, rename = "mimeType")]
    pub media_type: Option<String>,
}

impl FileDescriptor {
    /// Create a fully populated descriptor
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        media_type: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            media_type: Some(media_type.into()),
        }
    }

    /// Decoding strategy for this file
    pub fn kind(&self) -> MediaKind {
        MediaKind::from_media_type(self.media_type.as_deref())
    }

    /// File id, ignoring blank values
    pub fn file_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// Name shown to users and in prompts, never empty
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.kind().placeholder_name().to_string(),
        }
    }
}

/// Uniform text representation of one remote file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedDocument {
    /// Display name
    pub name: String,
    /// Drive file id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Declared media type
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Normalized text, or an error description when decoding failed
    pub content: String,
    /// Page count (PDFs only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(skip)]
    failed: bool,
}

impl NormalizedDocument {
    /// Create a document from a name and its text
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            media_type: None,
            content: content.into(),
            page_count: None,
            failed: false,
        }
    }

    /// Successfully decoded content for a listed file
    pub fn from_descriptor(descriptor: &FileDescriptor, content: String) -> Self {
        Self {
            name: descriptor.display_name(),
            id: descriptor.id.clone(),
            media_type: descriptor.media_type.clone(),
            content,
            page_count: None,
            failed: false,
        }
    }

    /// Placeholder carrying the reason a listed file could not be decoded
    pub fn failed(descriptor: &FileDescriptor, error: &Error) -> Self {
        let message = match error {
            Error::Decode { message, .. } => message.clone(),
            other => other.to_string(),
        };
        Self {
            failed: true,
            ..Self::from_descriptor(descriptor, format!("Error: {}", message))
        }
    }

    /// Sets the page count.
    pub fn with_page_count(mut self, page_count: u32) -> Self {
        self.page_count = Some(page_count);
        self
    }

    /// Whether this entry stands in for a failed decode
    pub fn is_failure(&self) -> bool {
        self.failed
    }
}
