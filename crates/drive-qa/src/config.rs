//! Configuration for the Drive Q&A service
//!
//! Values come from an optional TOML file (`DRIVE_QA_CONFIG`) and are then
//! overridden by environment variables, so a deployment can run purely from
//! the environment.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Google Drive configuration
    pub drive: DriveConfig,
    /// Completion provider configuration
    pub llm: LlmConfig,
    /// Ingestion configuration
    pub ingestion: IngestionConfig,
}

impl AppConfig {
    /// Load configuration from `DRIVE_QA_CONFIG` (if set) and the environment
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var("DRIVE_QA_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(raw: &str) -> Result<Self> {
        let mut config: Self =
            toml::from_str(raw).map_err(|e| Error::Config(format!("Invalid config: {}", e)))?;
        if let Some(key) = config.drive.private_key.take() {
            config.drive.private_key = Some(unescape_private_key(&key));
        }
        Ok(config)
    }

    /// Apply environment overrides using the given lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| Error::Config(format!("Invalid SERVER_PORT: {}", port)))?;
        }

        if let Some(email) = lookup("GOOGLE_CLIENT_EMAIL") {
            self.drive.client_email = Some(email);
        }
        if let Some(key) = lookup("GOOGLE_PRIVATE_KEY") {
            self.drive.private_key = Some(unescape_private_key(&key));
        }
        if let Some(folder) = lookup("GOOGLE_DRIVE_FOLDER_ID") {
            self.drive.folder_id = Some(folder);
        }

        if let Some(api_key) = lookup("ANTHROPIC_API_KEY") {
            self.llm.api_key = Some(api_key);
        }
        if let Some(model) = lookup("ANTHROPIC_MODEL") {
            self.llm.model = model;
        }
        if let Some(max_tokens) = lookup("ANTHROPIC_MAX_TOKENS") {
            self.llm.max_tokens = max_tokens.parse().map_err(|_| {
                Error::Config(format!("Invalid ANTHROPIC_MAX_TOKENS: {}", max_tokens))
            })?;
        }

        if let Some(limit) = lookup("DRIVE_QA_MAX_CONCURRENT_FILES") {
            let limit: usize = limit.parse().map_err(|_| {
                Error::Config(format!("Invalid DRIVE_QA_MAX_CONCURRENT_FILES: {}", limit))
            })?;
            self.ingestion.max_concurrent_files = (limit > 0).then_some(limit);
        }

        Ok(())
    }
}

/// Private keys usually arrive through the environment with literal `\n`
/// sequences in place of line breaks.
pub fn unescape_private_key(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            enable_cors: true,
        }
    }
}

/// Google Drive service account and folder configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Service account email
    pub client_email: Option<String>,
    /// Service account PEM private key (already unescaped)
    pub private_key: Option<String>,
    /// Folder whose files make up the corpus
    pub folder_id: Option<String>,
    /// OAuth token endpoint
    pub token_uri: String,
    /// Drive v3 API base URL
    pub drive_api_base: String,
    /// Sheets v4 API base URL
    pub sheets_api_base: String,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            client_email: None,
            private_key: None,
            folder_id: None,
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
            drive_api_base: "https://www.googleapis.com/drive/v3".to_string(),
            sheets_api_base: "https://sheets.googleapis.com/v4".to_string(),
        }
    }
}

impl DriveConfig {
    /// Folder id, or a configuration error when unset
    pub fn require_folder_id(&self) -> Result<&str> {
        self.folder_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::Config("GOOGLE_DRIVE_FOLDER_ID is not set".to_string()))
    }

    /// Whether both halves of the service account credentials are present
    pub fn has_credentials(&self) -> bool {
        self.client_email.is_some() && self.private_key.is_some()
    }
}

impl std::fmt::Debug for DriveConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveConfig")
            .field("client_email", &self.client_email)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("folder_id", &self.folder_id)
            .field("token_uri", &self.token_uri)
            .field("drive_api_base", &self.drive_api_base)
            .field("sheets_api_base", &self.sheets_api_base)
            .finish()
    }
}

/// Completion provider configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Anthropic API key
    pub api_key: Option<String>,
    /// Messages API base URL
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Output token ceiling
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.anthropic.com/v1".to_string(),
            model: "claude-3-opus-20240229".to_string(),
            max_tokens: 1024,
            timeout_secs: 120,
        }
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Ingestion configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    /// Upper bound on files decoded at once (None = all at once)
    pub max_concurrent_files: Option<usize>,
}
