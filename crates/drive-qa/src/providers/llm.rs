//! LLM provider trait for answer generation

use async_trait::async_trait;
use crate::error::Result;

/// Trait for single-shot prompt completion
///
/// Implementations:
/// - `AnthropicClient`: Anthropic Messages API
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send one composed prompt and return the answer text
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
