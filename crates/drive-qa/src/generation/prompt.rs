//! Prompt composition for document-grounded answers

use crate::types::{ConversationTurn, NormalizedDocument};

/// Closing instruction appended to every prompt
pub const ANSWER_INSTRUCTION: &str =
    "Please answer the question based on the provided documents and conversation history.";

/// The three sections of a composed prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPayload {
    pub documents_text: String,
    pub history_text: String,
    pub question: String,
}

impl PromptPayload {
    pub fn render(&self) -> String {
        format!(
            "Context: {}\n\nConversation History:\n{}\n\nQuestion: {}\n\n{}",
            self.documents_text, self.history_text, self.question, ANSWER_INSTRUCTION
        )
    }
}

/// Prompt builder for corpus questions
pub struct PromptBuilder;

impl PromptBuilder {
    /// `Document: <name>\nContent: <content>` blocks separated by a blank line
    pub fn documents_text(corpus: &[NormalizedDocument]) -> String {
        corpus
            .iter()
            .map(|doc| format!("Document: {}\nContent: {}", doc.name, doc.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// One `<role>: <content>` line per turn
    pub fn history_text(history: &[ConversationTurn]) -> String {
        history
            .iter()
            .map(|turn| format!("{}: {}", turn.role, turn.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn payload(
        corpus: &[NormalizedDocument],
        history: &[ConversationTurn],
        question: &str,
    ) -> PromptPayload {
        PromptPayload {
            documents_text: Self::documents_text(corpus),
            history_text: Self::history_text(history),
            question: question.to_string(),
        }
    }

    /// Render the full prompt. The whole corpus and history are included.
    pub fn compose(
        corpus: &[NormalizedDocument],
        history: &[ConversationTurn],
        question: &str,
    ) -> String {
        Self::payload(corpus, history, question).render()
    }
}
