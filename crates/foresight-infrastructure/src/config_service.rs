//! Configuration service implementation.
//!
//! Resolves the effective `ForesightConfig` from built-in defaults, the
//! `config.toml` file and environment variables, in increasing precedence.

use crate::paths::ForesightPaths;
use foresight_core::config::{ForesightConfig, StorageBackend};
use foresight_core::error::{ForesightError, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variables recognized by [`ConfigService::apply_env`].
pub mod env {
    pub const BIND: &str = "FORESIGHT_BIND";
    pub const PORT: &str = "PORT";
    pub const TEXT_MODEL: &str = "FORESIGHT_TEXT_MODEL";
    pub const VISION_MODEL: &str = "FORESIGHT_VISION_MODEL";
    pub const GEMINI_BASE_URL: &str = "FORESIGHT_GEMINI_BASE_URL";
    pub const STORAGE: &str = "FORESIGHT_STORAGE";
    pub const DATA_DIR: &str = "FORESIGHT_DATA_DIR";
}

/// Loads configuration from `config.toml`.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses the config file at the default location.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(ForesightPaths::default().config_file()?))
    }

    /// Uses a specific config file (CLI `--config`, tests).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config file. A missing or empty file yields the defaults.
    pub async fn load_file(&self) -> Result<ForesightConfig> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    "[ConfigService] No config file at {}, using defaults",
                    self.path.display()
                );
                return Ok(ForesightConfig::default());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(ForesightConfig::default());
        }

        let config = toml::from_str(&content)?;
        tracing::info!("[ConfigService] Loaded config from {}", self.path.display());
        Ok(config)
    }

    /// Reads the config file and applies process environment overrides.
    pub async fn load(&self) -> Result<ForesightConfig> {
        let config = self.load_file().await?;
        Self::apply_env(config, |key| std::env::var(key).ok())
    }

    /// Applies environment overrides using `lookup` to read variables.
    ///
    /// `FORESIGHT_BIND` wins over `PORT`; `PORT` alone binds all interfaces.
    pub fn apply_env<F>(mut config: ForesightConfig, lookup: F) -> Result<ForesightConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(bind) = get(env::BIND) {
            config.server.bind = bind;
        } else if let Some(port) = get(env::PORT) {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|_| ForesightError::config(format!("{} is not a valid port: {port}", env::PORT)))?;
            config.server.bind = format!("0.0.0.0:{port}");
        }

        if let Some(model) = get(env::TEXT_MODEL) {
            config.model.text_model = model;
        }
        if let Some(model) = get(env::VISION_MODEL) {
            config.model.vision_model = model;
        }
        if let Some(base_url) = get(env::GEMINI_BASE_URL) {
            config.model.base_url = base_url;
        }
        if let Some(storage) = get(env::STORAGE) {
            config.storage.backend = StorageBackend::from_str(storage.trim()).map_err(|_| {
                ForesightError::config(format!(
                    "{} must be 'memory' or 'json_dir', got '{storage}'",
                    env::STORAGE
                ))
            })?;
        }
        if let Some(data_dir) = get(env::DATA_DIR) {
            config.storage.data_dir = Some(PathBuf::from(data_dir));
        }

        Ok(config)
    }
}
