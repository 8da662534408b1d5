//! Google Cloud provider implementations
//!
//! - Service account OAuth2 via signed JWT assertions
//! - Drive v3 listing, download and export
//! - Sheets v4 tab metadata and cell values

mod auth;
mod drive_client;

pub use auth::{GcpAuth, DRIVE_READONLY_SCOPE, SPREADSHEETS_READONLY_SCOPE};
pub use drive_client::GoogleDriveClient;
