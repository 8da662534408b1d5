//! In-memory drive used by the ingestion tests

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::sheets::a1_range;
use crate::error::{Error, Result};
use crate::providers::drive::{DriveProvider, FileListPage, RawContent};
use crate::types::FileDescriptor;

/// One spreadsheet tab: title plus values (`None` = values fetch fails)
pub type FakeTab = (Option<String>, Option<Vec<Vec<Value>>>);

#[derive(Default)]
pub struct FakeDrive {
    /// Listing pages; the page token `page-N` selects page N
    pub pages: Vec<FileListPage>,
    pub fail_listing: bool,
    pub downloads: HashMap<String, RawContent>,
    pub exports: HashMap<String, String>,
    pub spreadsheets: HashMap<String, Vec<FakeTab>>,
    /// Ids whose every call fails
    pub failing: HashSet<String>,
    /// Ids whose download panics
    pub panicking: HashSet<String>,
    /// Per-id download delay in milliseconds
    pub delays: HashMap<String, u64>,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub list_calls: AtomicUsize,
}

impl FakeDrive {
    pub fn with_files(files: Vec<FileDescriptor>) -> Self {
        Self {
            pages: vec![FileListPage {
                files: Some(files),
                next_page_token: None,
            }],
            ..Default::default()
        }
    }

    pub fn text(mut self, id: &str, content: &str) -> Self {
        self.downloads
            .insert(id.to_string(), RawContent::Text(content.to_string()));
        self
    }

    fn check(&self, id: &str) -> Result<()> {
        if self.failing.contains(id) {
            return Err(Error::drive(format!("File {} is unavailable", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl DriveProvider for FakeDrive {
    async fn list_files(&self, _query: &str, page_token: Option<&str>) -> Result<FileListPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing {
            return Err(Error::drive("listing refused"));
        }
        let index = page_token
            .and_then(|t| t.strip_prefix("page-"))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);
        Ok(self.pages.get(index).cloned().unwrap_or_default())
    }

    async fn download(&self, file_id: &str) -> Result<RawContent> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(ms) = self.delays.get(file_id) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.panicking.contains(file_id) {
            panic!("decoder blew up on {}", file_id);
        }
        self.check(file_id)?;
        self.downloads
            .get(file_id)
            .cloned()
            .ok_or_else(|| Error::drive(format!("File not found: {}", file_id)))
    }

    async fn export(&self, file_id: &str, _media_type: &str) -> Result<String> {
        self.check(file_id)?;
        self.exports
            .get(file_id)
            .cloned()
            .ok_or_else(|| Error::drive(format!("File not found: {}", file_id)))
    }

    async fn sheet_titles(&self, spreadsheet_id: &str) -> Result<Vec<Option<String>>> {
        self.check(spreadsheet_id)?;
        let tabs = self
            .spreadsheets
            .get(spreadsheet_id)
            .ok_or_else(|| Error::drive(format!("Spreadsheet not found: {}", spreadsheet_id)))?;
        Ok(tabs.iter().map(|(title, _)| title.clone()).collect())
    }

    async fn sheet_values(&self, spreadsheet_id: &str, range: &str) -> Result<Vec<Vec<Value>>> {
        let tabs = self
            .spreadsheets
            .get(spreadsheet_id)
            .ok_or_else(|| Error::drive(format!("Spreadsheet not found: {}", spreadsheet_id)))?;
        tabs.iter()
            .find(|(title, _)| title.as_deref().map(a1_range).as_deref() == Some(range))
            .and_then(|(_, values)| values.clone())
            .ok_or_else(|| Error::drive(format!("Unable to parse range: {}", range)))
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// PDF with `pages` pages; the first one shows `text` in Courier
pub fn sample_pdf(pages: usize, text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

    let kids: Vec<Object> = (0..pages)
        .map(|index| {
            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            };
            if index == 0 {
                page.set("Contents", content_id);
            }
            doc.add_object(page).into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
