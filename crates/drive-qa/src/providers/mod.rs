//! Provider abstractions for the remote drive and the completion service
//!
//! Ingestion and answering only see the traits, so tests can swap in
//! in-memory implementations.

pub mod anthropic;
pub mod drive;
pub mod gcp;
pub mod llm;

pub use anthropic::AnthropicClient;
pub use drive::{DriveProvider, FileListPage, RawContent};
pub use gcp::{GcpAuth, GoogleDriveClient};
pub use llm::LlmProvider;
