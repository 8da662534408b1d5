//! PDF text extraction

use crate::error::{Error, Result};

/// Text pulled out of a PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfText {
    /// Whitespace-collapsed text
    pub text: String,
    /// Number of pages, when the page tree could be read
    pub page_count: Option<u32>,
}

/// Extract text from PDF bytes on a blocking thread
pub async fn extract_pdf(file_name: &str, data: Vec<u8>) -> Result<PdfText> {
    let name = file_name.to_string();
    tokio::task::spawn_blocking(move || extract_pdf_blocking(&name, &data))
        .await
        .map_err(|e| Error::decode(file_name, format!("PDF extraction aborted: {}", e)))?
}

fn extract_pdf_blocking(file_name: &str, data: &[u8]) -> Result<PdfText> {
    let raw = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| Error::decode(file_name, format!("Failed to parse PDF: {}", e)))?;

    Ok(PdfText {
        text: collapse_whitespace(&raw),
        page_count: page_count(data),
    })
}

/// Collapse every whitespace run to a single space and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Count pages with lopdf
pub fn page_count(data: &[u8]) -> Option<u32> {
    match lopdf::Document::load_mem(data) {
        Ok(doc) => Some(doc.get_pages().len() as u32),
        Err(e) => {
            tracing::debug!("Could not read PDF page tree: {}", e);
            None
        }
    }
}
