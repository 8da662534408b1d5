//! Anthropic Messages API client for answer generation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::LlmConfig;
use crate::error::{Error, Result};
use crate::providers::llm::LlmProvider;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic chat client
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    /// Create a client from configuration; the API key is required
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::Config("ANTHROPIC_API_KEY is not set".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Text of the first text block; other block kinds are skipped
fn first_text_block(blocks: Vec<ContentBlock>) -> Result<String> {
    blocks
        .into_iter()
        .find_map(|b| (b.kind == "text").then_some(b.text).flatten())
        .ok_or(Error::NoTextContent)
}

#[async_trait]
impl LlmProvider for AnthropicClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let start = Instant::now();
        let url = format!("{}/messages", self.base_url);

        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![RequestMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!("Sending completion request to Anthropic ({} prompt bytes)", prompt.len());

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::llm(format!("Anthropic request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::llm(format!(
                "Anthropic completion failed ({}): {}",
                status, body
            )));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| Error::llm(format!("Failed to parse Anthropic response: {}", e)))?;

        debug!("Anthropic completion took {} ms", start.elapsed().as_millis());

        first_text_block(parsed.content)
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/models", self.base_url);
        match self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .send()
            .await
        {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                warn!("Anthropic health check failed: {}", e);
                Ok(false)
            }
        }
    }

    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Vec<ContentBlock> {
        serde_json::from_str::<MessagesResponse>(raw).unwrap().content
    }

    #[test]
    fn test_request_body_shape() {
        let request = MessagesRequest {
            model: "claude-3-opus-20240229",
            max_tokens: 1024,
            messages: vec![RequestMessage {
                role: "user",
                content: "hello",
            }],
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "claude-3-opus-20240229");
        assert_eq!(json["max_tokens"], 1024);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_first_text_block_is_used() {
        let blocks = parse(
            r#"{"content": [
                {"type": "tool_use", "id": "t1", "name": "lookup", "input": {}},
                {"type": "text", "text": "42"},
                {"type": "text", "text": "ignored"}
            ]}"#,
        );
        assert_eq!(first_text_block(blocks).unwrap(), "42");
    }

    #[test]
    fn test_text_block_without_text_is_skipped() {
        let blocks = parse(
            r#"{"content": [
                {"type": "text"},
                {"type": "text", "text": "42"}
            ]}"#,
        );
        assert_eq!(first_text_block(blocks).unwrap(), "42");

        let blocks = parse(r#"{"content": [{"type": "text"}]}"#);
        assert!(matches!(first_text_block(blocks), Err(Error::NoTextContent)));
    }

    #[test]
    fn test_no_text_block() {
        let blocks = parse(r#"{"content": [{"type": "tool_use", "id": "t1", "input": {}}]}"#);
        assert!(matches!(first_text_block(blocks), Err(Error::NoTextContent)));

        let blocks = parse(r#"{"id": "msg_1"}"#);
        assert!(matches!(first_text_block(blocks), Err(Error::NoTextContent)));
    }

    #[test]
    fn test_api_key_required() {
        let config = LlmConfig::default();
        assert!(matches!(AnthropicClient::new(&config), Err(Error::Config(_))));

        let config = LlmConfig {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let client = AnthropicClient::new(&config).unwrap();
        assert_eq!(client.model(), "claude-3-opus-20240229");
        assert_eq!(client.name(), "anthropic");
    }
}
