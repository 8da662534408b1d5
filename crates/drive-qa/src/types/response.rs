//! Response bodies for the HTTP API

use serde::{Deserialize, Serialize};

use super::document::NormalizedDocument;
use crate::config::DriveConfig;

/// Body of `GET /api/google-drive`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsResponse {
    pub documents: Vec<NormalizedDocument>,
}

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Body of `GET /api/config/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigStatusResponse {
    pub message: String,
    pub env_vars_exist: EnvVarsExist,
}

/// Which Drive settings are present (values are never echoed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVarsExist {
    pub folder_id_exists: bool,
    pub client_email_exists: bool,
    pub private_key_exists: bool,
}

impl ConfigStatusResponse {
    pub fn from_config(drive: &DriveConfig) -> Self {
        Self {
            message: "Configuration status".to_string(),
            env_vars_exist: EnvVarsExist {
                folder_id_exists: drive.folder_id.is_some(),
                client_email_exists: drive.client_email.is_some(),
                private_key_exists: drive.private_key.is_some(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_status_shape() {
        let drive = DriveConfig {
            folder_id: Some("folder".to_string()),
            private_key: Some("key".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(ConfigStatusResponse::from_config(&drive)).unwrap();

        assert_eq!(json["envVarsExist"]["folderIdExists"], true);
        assert_eq!(json["envVarsExist"]["clientEmailExists"], false);
        assert_eq!(json["envVarsExist"]["privateKeyExists"], true);
        assert!(!json.to_string().contains("\"key\""));
    }
}
