//! Per-file format decoding
//!
//! Dispatches on the declared media type and turns one listed file into a
//! [`NormalizedDocument`]. Failures never escape: they become documents whose
//! content reads `Error: <reason>`.

use std::sync::Arc;

use super::pdf::extract_pdf;
use super::sheets::{extract_sheets, render_workbook};
use crate::error::{Error, Result};
use crate::providers::drive::DriveProvider;
use crate::types::{FileDescriptor, MediaKind, NormalizedDocument};

/// Export format requested for native documents
const PLAIN_TEXT: &str = "text/plain";

/// Format decoder over an authorized drive
pub struct FormatDecoder {
    drive: Arc<dyn DriveProvider>,
}

impl FormatDecoder {
    pub fn new(drive: Arc<dyn DriveProvider>) -> Self {
        Self { drive }
    }

    /// Decode one file; always yields a document
    pub async fn decode(&self, descriptor: &FileDescriptor) -> NormalizedDocument {
        match self.try_decode(descriptor).await {
            Ok(doc) => {
                tracing::debug!(
                    "Decoded '{}' ({}, {} chars)",
                    doc.name,
                    descriptor.kind().display_name(),
                    doc.content.len()
                );
                doc
            }
            Err(e) => {
                tracing::warn!("Error processing file {}: {}", descriptor.display_name(), e);
                NormalizedDocument::failed(descriptor, &e)
            }
        }
    }

    async fn try_decode(&self, descriptor: &FileDescriptor) -> Result<NormalizedDocument> {
        let name = descriptor.display_name();
        let id = descriptor
            .file_id()
            .ok_or_else(|| Error::decode(&name, "File has no id"))?;

        match descriptor.kind() {
            MediaKind::Spreadsheet => {
                let sheets = extract_sheets(self.drive.as_ref(), id, &name).await?;
                Ok(NormalizedDocument::from_descriptor(
                    descriptor,
                    render_workbook(&sheets),
                ))
            }
            MediaKind::RichDocument => {
                let text = self.drive.export(id, PLAIN_TEXT).await?;
                Ok(NormalizedDocument::from_descriptor(descriptor, text))
            }
            MediaKind::Pdf => {
                let bytes = self.drive.download(id).await?.into_bytes();
                let pdf = extract_pdf(&name, bytes).await?;
                let doc = NormalizedDocument::from_descriptor(descriptor, pdf.text);
                Ok(match pdf.page_count {
                    Some(pages) => doc.with_page_count(pages),
                    None => doc,
                })
            }
            MediaKind::Raw => {
                let raw = self.drive.download(id).await?;
                Ok(NormalizedDocument::from_descriptor(descriptor, raw.into_text()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::fake::{sample_pdf, FakeDrive};
    use crate::providers::drive::RawContent;
    use crate::types::document::{PDF_MEDIA_TYPE, RICH_DOCUMENT_MEDIA_TYPE, SPREADSHEET_MEDIA_TYPE};
    use serde_json::json;

    fn decoder(drive: FakeDrive) -> FormatDecoder {
        FormatDecoder::new(Arc::new(drive))
    }

    #[tokio::test]
    async fn test_raw_text_passthrough() {
        let drive = FakeDrive::default().text("f1", "meeting notes");
        let doc = decoder(drive)
            .decode(&FileDescriptor::new("f1", "notes.txt", "text/plain"))
            .await;

        assert_eq!(doc.name, "notes.txt");
        assert_eq!(doc.id.as_deref(), Some("f1"));
        assert_eq!(doc.media_type.as_deref(), Some("text/plain"));
        assert_eq!(doc.content, "meeting notes");
        assert!(!doc.is_failure());
    }

    #[tokio::test]
    async fn test_raw_structured_payload_is_serialized() {
        let mut drive = FakeDrive::default();
        drive.downloads.insert(
            "f1".to_string(),
            RawContent::Structured(json!({"k": [1, 2]})),
        );
        let doc = decoder(drive)
            .decode(&FileDescriptor::new("f1", "data.json", "application/json"))
            .await;
        assert_eq!(doc.content, r#"{"k":[1,2]}"#);
    }

    #[tokio::test]
    async fn test_rich_document_export() {
        let mut drive = FakeDrive::default();
        drive
            .exports
            .insert("d1".to_string(), "Heading\r\nBody".to_string());
        let doc = decoder(drive)
            .decode(&FileDescriptor::new("d1", "Plan", RICH_DOCUMENT_MEDIA_TYPE))
            .await;
        assert_eq!(doc.content, "Heading\r\nBody");
    }

    #[tokio::test]
    async fn test_spreadsheet_dispatch() {
        let mut drive = FakeDrive::default();
        drive.spreadsheets.insert(
            "s1".to_string(),
            vec![(
                Some("Q1".to_string()),
                Some(vec![vec![json!("a"), json!(1)]]),
            )],
        );
        let doc = decoder(drive)
            .decode(&FileDescriptor {
                id: Some("s1".to_string()),
                name: None,
                media_type: Some(SPREADSHEET_MEDIA_TYPE.to_string()),
            })
            .await;
        assert_eq!(doc.name, "Unnamed spreadsheet");
        assert_eq!(doc.content, "Sheet: Q1\na\t1");
    }

    #[tokio::test]
    async fn test_pdf_text_and_page_count() {
        let mut drive = FakeDrive::default();
        drive.downloads.insert(
            "p1".to_string(),
            RawContent::Binary(sample_pdf(1, "Quarterly   report  2024")),
        );
        let doc = decoder(drive)
            .decode(&FileDescriptor::new("p1", "report.pdf", PDF_MEDIA_TYPE))
            .await;

        assert!(!doc.is_failure());
        assert_eq!(doc.content, "Quarterly report 2024");
        assert_eq!(doc.page_count, Some(1));
    }

    #[tokio::test]
    async fn test_pdf_failure_becomes_error_content() {
        let mut drive = FakeDrive::default();
        drive
            .downloads
            .insert("p1".to_string(), RawContent::Binary(vec![0x00, 0xff, 0x13]));
        let doc = decoder(drive)
            .decode(&FileDescriptor::new("p1", "scan.pdf", PDF_MEDIA_TYPE))
            .await;

        assert!(doc.is_failure());
        assert!(doc.content.starts_with("Error: "));
        assert_eq!(doc.name, "scan.pdf");
        assert_eq!(doc.page_count, None);
    }

    #[tokio::test]
    async fn test_missing_id_is_error_document() {
        let doc = decoder(FakeDrive::default())
            .decode(&FileDescriptor {
                id: None,
                name: None,
                media_type: Some(PDF_MEDIA_TYPE.to_string()),
            })
            .await;

        assert!(doc.is_failure());
        assert_eq!(doc.name, "Unnamed PDF");
        assert_eq!(doc.content, "Error: File has no id");
    }

    #[tokio::test]
    async fn test_fetch_failure_is_error_document() {
        let mut drive = FakeDrive::default().text("f1", "unused");
        drive.failing.insert("f1".to_string());
        let doc = decoder(drive)
            .decode(&FileDescriptor::new("f1", "notes.txt", "text/plain"))
            .await;

        assert!(doc.is_failure());
        assert_eq!(doc.content, "Error: Drive error: File f1 is unavailable");
    }
}
