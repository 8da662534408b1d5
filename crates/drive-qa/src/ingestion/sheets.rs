//! Spreadsheet flattening
//!
//! Every tab is read in full and rendered as tab-separated rows under a
//! `Sheet: <title>` header; tabs are separated by a blank line.

use futures_util::future::join_all;
use serde_json::Value;

use crate::error::Result;
use crate::providers::drive::DriveProvider;

/// Content of a spreadsheet with no readable tabs
pub const EMPTY_SPREADSHEET: &str = "empty spreadsheet";

/// Cell text of one tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetExtraction {
    pub sheet_name: String,
    pub rows: Vec<Vec<String>>,
}

impl SheetExtraction {
    /// Convert raw API cell values
    pub fn from_values(sheet_name: impl Into<String>, values: Vec<Vec<Value>>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            rows: values
                .iter()
                .map(|row| row.iter().map(cell_text).collect())
                .collect(),
        }
    }

    /// `Sheet: <title>` followed by one line per row
    pub fn render(&self) -> String {
        let rows = self
            .rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");
        format!("Sheet: {}\n{}", self.sheet_name, rows)
    }
}

/// Text of a single cell
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A1 range covering a whole tab; quotes inside the title are doubled
pub fn a1_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Join rendered tabs, or the sentinel when there are none
pub fn render_workbook(sheets: &[SheetExtraction]) -> String {
    if sheets.is_empty() {
        return EMPTY_SPREADSHEET.to_string();
    }
    sheets
        .iter()
        .map(SheetExtraction::render)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Read every titled tab of a spreadsheet, in tab order
///
/// Tabs are fetched concurrently. Untitled tabs and tabs whose values
/// cannot be fetched are skipped; only a failure to enumerate the tabs
/// fails the whole spreadsheet.
pub async fn extract_sheets(
    drive: &dyn DriveProvider,
    spreadsheet_id: &str,
    file_name: &str,
) -> Result<Vec<SheetExtraction>> {
    let titles: Vec<String> = drive
        .sheet_titles(spreadsheet_id)
        .await?
        .into_iter()
        .flatten()
        .filter(|title| !title.is_empty())
        .collect();

    tracing::debug!("Reading {} tabs of '{}'", titles.len(), file_name);

    let fetches = titles.iter().map(|title| async move {
        let range = a1_range(title);
        (title, drive.sheet_values(spreadsheet_id, &range).await)
    });

    let sheets = join_all(fetches)
        .await
        .into_iter()
        .filter_map(|(title, values)| match values {
            Ok(values) => Some(SheetExtraction::from_values(title.as_str(), values)),
            Err(e) => {
                tracing::warn!("Skipping tab '{}' of '{}': {}", title, file_name, e);
                None
            }
        })
        .collect();

    Ok(sheets)
}
