//! Configuration models.
//!
//! `ForesightConfig` is the non-secret part, read from `config.toml`.
//! `SecretConfig` holds API keys and is read from `secret.json`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum::{AsRefStr, Display, EnumString};

pub const DEFAULT_BIND: &str = "0.0.0.0:5000";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_VISION_MODEL: &str = "gemini-1.5-pro-vision";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ForesightConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub storage: StorageConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

/// Model identity and transport settings.
///
/// Model names are plain configuration so they can change without a rebuild.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ModelConfig {
    pub text_model: String,
    pub vision_model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Which record store backs persistence.
#[derive(
    Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StorageBackend {
    /// Records live only as long as the process
    #[default]
    Memory,
    /// One JSON file per record under `data_dir`
    JsonDir,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Root directory for the `json_dir` backend; defaults to the platform data dir
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// API credentials.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiSecret>,
}

#[derive(Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct GeminiSecret {
    pub api_key: String,
}

impl std::fmt::Debug for GeminiSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSecret")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl SecretConfig {
    pub fn with_gemini_key(api_key: impl Into<String>) -> Self {
        Self {
            gemini: Some(GeminiSecret {
                api_key: api_key.into(),
            }),
        }
    }

    /// The Gemini API key, if one is configured and not blank.
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini
            .as_ref()
            .map(|secret| secret.api_key.trim())
            .filter(|key| !key.is_empty())
    }
}
