//! Folder listing

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::drive::DriveProvider;
use crate::types::FileDescriptor;

/// Lists the non-trashed direct children of a folder
pub struct FileLister {
    drive: Arc<dyn DriveProvider>,
}

/// Drive query selecting a folder's non-trashed children
pub fn folder_query(folder_id: &str) -> String {
    format!(
        "'{}' in parents and trashed = false",
        folder_id.replace('\\', "\\\\").replace('\'', "\\'")
    )
}

impl FileLister {
    pub fn new(drive: Arc<dyn DriveProvider>) -> Self {
        Self { drive }
    }

    /// All files of the folder, following pagination to the end
    pub async fn list(&self, folder_id: &str) -> Result<Vec<FileDescriptor>> {
        let query = folder_query(folder_id);
        tracing::info!("Listing files via {} with query: {}", self.drive.name(), query);

        let mut files = Vec::new();
        let mut page_token: Option<String> = None;
        let mut seen_tokens = HashSet::new();

        loop {
            let page = self
                .drive
                .list_files(&query, page_token.as_deref())
                .await
                .map_err(|e| match e {
                    Error::Listing(_) => e,
                    other => Error::listing(other.to_string()),
                })?;

            let batch = page
                .files
                .ok_or_else(|| Error::listing("No files array in response"))?;
            files.extend(batch);

            match page.next_page_token {
                Some(token) if !token.is_empty() => {
                    if !seen_tokens.insert(token.clone()) {
                        return Err(Error::listing(format!(
                            "Listing returned page token {} twice",
                            token
                        )));
                    }
                    page_token = Some(token);
                }
                _ => break,
            }
        }

        tracing::info!("Found {} files in folder", files.len());
        Ok(files)
    }
}
