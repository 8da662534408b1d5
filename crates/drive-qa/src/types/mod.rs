//! Core types for the Drive Q&A service

pub mod conversation;
pub mod document;
pub mod query;
pub mod response;

pub use conversation::{Conversation, ConversationTurn, Role};
pub use document::{FileDescriptor, MediaKind, NormalizedDocument};
pub use query::AskRequest;
pub use response::{AskResponse, ConfigStatusResponse, DocumentsResponse};
