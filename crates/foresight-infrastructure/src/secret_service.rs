//! Secret service implementation.
//!
//! Reads API keys from `secret.json`; the `GEMINI_API_KEY` environment
//! variable takes precedence over the file.

use foresight_core::config::{GeminiSecret, SecretConfig};
use foresight_core::error::Result;
use foresight_core::secret::SecretService;
use std::path::PathBuf;
use tokio::sync::RwLock;

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Service for loading secret configuration.
///
/// Secrets are loaded once and cached for the life of the process.
pub struct SecretServiceImpl {
    path: PathBuf,
    env_api_key: Option<String>,
    secrets: RwLock<Option<SecretConfig>>,
}

impl SecretServiceImpl {
    /// Creates a service for an explicit secret file and environment key.
    pub fn new(path: impl Into<PathBuf>, env_api_key: Option<String>) -> Self {
        Self {
            path: path.into(),
            env_api_key,
            secrets: RwLock::new(None),
        }
    }

    async fn read_file(&self) -> Result<SecretConfig> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(SecretConfig::default()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SecretConfig::default()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        if let Some(cached) = self.secrets.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let mut loaded = self.read_file().await?;
        if let Some(key) = self
            .env_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
        {
            loaded.gemini = Some(GeminiSecret {
                api_key: key.to_string(),
            });
        }

        *self.secrets.write().await = Some(loaded.clone());
        Ok(loaded)
    }
}
