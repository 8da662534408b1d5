//! Application state for the Drive Q&A server

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::generation::AnswerPipeline;
use crate::ingestion::IngestPipeline;
use crate::providers::{AnthropicClient, DriveProvider, GoogleDriveClient, LlmProvider};

/// Shared application state
///
/// Holds only configuration and provider handles; no request data is kept
/// between calls.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Folder ingestion (absent without Drive credentials)
    ingest: Option<IngestPipeline>,
    /// Question answering (absent without an API key)
    answers: Option<AnswerPipeline>,
    /// Name and model of the completion provider, for info output
    llm_label: Option<(String, String)>,
}

impl AppState {
    /// Build providers from configuration
    ///
    /// Missing credentials leave the matching feature disabled; its routes
    /// then answer with a configuration error. Credentials that are present
    /// but unusable fail startup.
    pub fn new(config: AppConfig) -> Result<Self> {
        let drive: Option<Arc<dyn DriveProvider>> = if config.drive.has_credentials() {
            let client: Arc<dyn DriveProvider> =
                Arc::new(GoogleDriveClient::from_config(&config.drive)?);
            Some(client)
        } else {
            tracing::warn!("Google service account credentials not set; Drive listing disabled");
            None
        };

        let llm: Option<Arc<dyn LlmProvider>> = match config.llm.api_key.as_deref() {
            Some(key) if !key.is_empty() => {
                let client: Arc<dyn LlmProvider> = Arc::new(AnthropicClient::new(&config.llm)?);
                Some(client)
            }
            _ => {
                tracing::warn!("ANTHROPIC_API_KEY not set; chat disabled");
                None
            }
        };

        Ok(Self::with_providers(config, drive, llm))
    }

    /// Build from already constructed providers
    pub fn with_providers(
        config: AppConfig,
        drive: Option<Arc<dyn DriveProvider>>,
        llm: Option<Arc<dyn LlmProvider>>,
    ) -> Self {
        let ingest = drive.map(|drive| IngestPipeline::new(drive, &config.ingestion));
        let llm_label = llm
            .as_ref()
            .map(|llm| (llm.name().to_string(), llm.model().to_string()));
        let answers = llm.map(AnswerPipeline::new);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                ingest,
                answers,
                llm_label,
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Ingestion pipeline, or a configuration error when Drive is disabled
    pub fn ingest(&self) -> Result<&IngestPipeline> {
        self.inner.ingest.as_ref().ok_or_else(|| {
            Error::Config(
                "Google Drive credentials are not configured (GOOGLE_CLIENT_EMAIL, GOOGLE_PRIVATE_KEY)"
                    .to_string(),
            )
        })
    }

    /// Answer pipeline, or a configuration error when chat is disabled
    pub fn answers(&self) -> Result<&AnswerPipeline> {
        self.inner
            .answers
            .as_ref()
            .ok_or_else(|| Error::Config("ANTHROPIC_API_KEY is not configured".to_string()))
    }

    /// Completion provider name and model, when configured
    pub fn llm_label(&self) -> Option<(&str, &str)> {
        self.inner
            .llm_label
            .as_ref()
            .map(|(name, model)| (name.as_str(), model.as_str()))
    }

    /// Check if both pipelines and the folder are configured
    pub fn is_ready(&self) -> bool {
        self.inner.ingest.is_some()
            && self.inner.answers.is_some()
            && self.inner.config.drive.require_folder_id().is_ok()
    }
}
