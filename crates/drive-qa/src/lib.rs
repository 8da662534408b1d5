//! drive-qa: question answering over the documents of a Google Drive folder
//!
//! Lists a folder, normalizes every file (Sheets, Docs, PDFs, anything else)
//! into plain text, and answers questions over that corpus with an LLM.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use types::{
    conversation::{Conversation, ConversationTurn, Role},
    document::{FileDescriptor, MediaKind, NormalizedDocument},
    query::AskRequest,
};
