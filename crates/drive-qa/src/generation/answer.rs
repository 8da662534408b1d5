//! Question answering over a corpus

use std::sync::Arc;
use std::time::Instant;

use super::prompt::PromptBuilder;
use crate::error::Result;
use crate::providers::llm::LlmProvider;
use crate::types::query::validate_question;
use crate::types::{Conversation, ConversationTurn, NormalizedDocument};

/// Compose a prompt from the corpus and ask the completion provider
pub struct AnswerPipeline {
    llm: Arc<dyn LlmProvider>,
}

impl AnswerPipeline {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Answer one question; blank questions are rejected before any call
    pub async fn ask(
        &self,
        corpus: &[NormalizedDocument],
        history: &[ConversationTurn],
        question: Option<&str>,
    ) -> Result<String> {
        let question = validate_question(question)?;
        let prompt = PromptBuilder::compose(corpus, history, question);

        tracing::info!(
            "Asking {} ({}) over {} documents, {} history turns",
            self.llm.name(),
            self.llm.model(),
            corpus.len(),
            history.len()
        );

        let start = Instant::now();
        let answer = self.llm.complete(&prompt).await?;
        tracing::debug!("Answer generated in {} ms", start.elapsed().as_millis());

        Ok(answer)
    }

    /// Answer and record the exchange; the conversation is untouched on failure
    pub async fn ask_in(
        &self,
        conversation: &mut Conversation,
        corpus: &[NormalizedDocument],
        question: Option<&str>,
    ) -> Result<String> {
        let answer = self.ask(corpus, conversation.turns(), question).await?;
        if let Some(question) = question {
            conversation.record_exchange(question, answer.clone());
        }
        Ok(answer)
    }

    /// Whether the completion provider is reachable
    pub async fn health_check(&self) -> Result<bool> {
        self.llm.health_check().await
    }
}
