//! Google Drive v3 and Sheets v4 REST client
//!
//! Every request carries a bearer token from the service account.

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::sync::Arc;

use super::auth::GcpAuth;
use crate::config::DriveConfig;
use crate::error::{Error, Result};
use crate::providers::drive::{DriveProvider, FileListPage, RawContent};

/// Fields requested for each listing page
const LIST_FIELDS: &str = "nextPageToken, files(id, name, mimeType)";
const LIST_PAGE_SIZE: &str = "100";

/// Google Drive client
pub struct GoogleDriveClient {
    auth: Arc<GcpAuth>,
    http: reqwest::Client,
    drive_base: String,
    sheets_base: String,
}

impl GoogleDriveClient {
    /// Create a client using the API bases from the drive configuration
    pub fn new(auth: Arc<GcpAuth>, config: &DriveConfig) -> Self {
        Self {
            auth,
            http: reqwest::Client::new(),
            drive_base: config.drive_api_base.trim_end_matches('/').to_string(),
            sheets_base: config.sheets_api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Build the authorized client straight from configuration
    pub fn from_config(config: &DriveConfig) -> Result<Self> {
        let auth = GcpAuth::from_config(config)?;
        Ok(Self::new(Arc::new(auth), config))
    }

    /// Build an endpoint URL from a base and raw path segments
    fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
        let mut url =
            Url::parse(base).map_err(|e| Error::Config(format!("Invalid API base {}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("API base cannot carry a path: {}", base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send an authorized GET and fail on a non-success status
    async fn get(&self, url: Url, what: &str) -> Result<reqwest::Response> {
        let request = self.auth.authorize(self.http.get(url)).await?;
        let response = request
            .send()
            .await
            .map_err(|e| Error::drive(format!("{} request failed: {}", what, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::drive(format!("{} failed ({}): {}", what, status, body)));
        }

        Ok(response)
    }
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Deserialize)]
struct SheetMeta {
    #[serde(default)]
    properties: Option<SheetProperties>,
}

#[derive(Deserialize)]
struct SheetProperties {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[async_trait]
impl DriveProvider for GoogleDriveClient {
    async fn list_files(&self, query: &str, page_token: Option<&str>) -> Result<FileListPage> {
        let mut url = Self::endpoint(&self.drive_base, &["files"])?;
        {
            let mut params = url.query_pairs_mut();
            params
                .append_pair("q", query)
                .append_pair("fields", LIST_FIELDS)
                .append_pair("pageSize", LIST_PAGE_SIZE)
                .append_pair("supportsAllDrives", "true")
                .append_pair("includeItemsFromAllDrives", "true");
            if let Some(token) = page_token {
                params.append_pair("pageToken", token);
            }
        }

        let response = self.get(url, "Drive file listing").await?;
        response
            .json()
            .await
            .map_err(|e| Error::drive(format!("Failed to parse file listing: {}", e)))
    }

    async fn download(&self, file_id: &str) -> Result<RawContent> {
        let mut url = Self::endpoint(&self.drive_base, &["files", file_id])?;
        url.query_pairs_mut()
            .append_pair("alt", "media")
            .append_pair("supportsAllDrives", "true");

        let response = self.get(url, "Drive download").await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::drive(format!("Failed to read download body: {}", e)))?;

        Ok(RawContent::from_bytes(bytes.to_vec(), content_type.as_deref()))
    }

    async fn export(&self, file_id: &str, media_type: &str) -> Result<String> {
        let mut url = Self::endpoint(&self.drive_base, &["files", file_id, "export"])?;
        url.query_pairs_mut().append_pair("mimeType", media_type);

        let response = self.get(url, "Drive export").await?;
        response
            .text()
            .await
            .map_err(|e| Error::drive(format!("Failed to read export body: {}", e)))
    }

    async fn sheet_titles(&self, spreadsheet_id: &str) -> Result<Vec<Option<String>>> {
        let mut url = Self::endpoint(&self.sheets_base, &["spreadsheets", spreadsheet_id])?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties.title");

        let response = self.get(url, "Spreadsheet metadata").await?;
        let meta: SpreadsheetMeta = response
            .json()
            .await
            .map_err(|e| Error::drive(format!("Failed to parse spreadsheet metadata: {}", e)))?;

        Ok(meta
            .sheets
            .into_iter()
            .map(|s| s.properties.and_then(|p| p.title))
            .collect())
    }

    async fn sheet_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<serde_json::Value>>> {
        let url = Self::endpoint(
            &self.sheets_base,
            &["spreadsheets", spreadsheet_id, "values", range],
        )?;

        let response = self.get(url, "Sheet values").await?;
        let values: ValueRange = response
            .json()
            .await
            .map_err(|e| Error::drive(format!("Failed to parse sheet values: {}", e)))?;

        Ok(values.values)
    }

    fn name(&self) -> &str {
        "google-drive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_escapes_segments() {
        let url = GoogleDriveClient::endpoint(
            "https://sheets.googleapis.com/v4",
            &["spreadsheets", "abc", "values", "'Q1 / Q2'"],
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc/values/'Q1%20%2F%20Q2'"
        );
    }

    #[test]
    fn test_endpoint_with_trailing_slash_base() {
        let url =
            GoogleDriveClient::endpoint("https://www.googleapis.com/drive/v3/", &["files"]).unwrap();
        assert_eq!(url.as_str(), "https://www.googleapis.com/drive/v3/files");
    }

    #[test]
    fn test_invalid_base_is_config_error() {
        let result = GoogleDriveClient::endpoint("not a url", &["files"]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_value_range_without_values() {
        let range: ValueRange = serde_json::from_str(r#"{"range": "Sheet1!A1:Z1000"}"#).unwrap();
        assert!(range.values.is_empty());
    }

    #[test]
    fn test_spreadsheet_meta_titles() {
        let meta: SpreadsheetMeta = serde_json::from_str(
            r#"{"sheets": [{"properties": {"title": "Q1"}}, {"properties": {}}, {}]}"#,
        )
        .unwrap();
        let titles: Vec<Option<String>> = meta
            .sheets
            .into_iter()
            .map(|s| s.properties.and_then(|p| p.title))
            .collect();
        assert_eq!(titles, vec![Some("Q1".to_string()), None, None]);
    }
}
