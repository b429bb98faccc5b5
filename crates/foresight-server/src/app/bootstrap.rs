//! Startup wiring: configuration, secrets, storage and models.

use foresight_application::{AnalysisService, FallbackGenerator};
use foresight_core::config::{ForesightConfig, SecretConfig, StorageBackend, StorageConfig};
use foresight_core::error::Result;
use foresight_core::record::RecordRepository;
use foresight_core::secret::SecretService;
use foresight_infrastructure::secret_service::GEMINI_API_KEY_ENV;
use foresight_infrastructure::{
    ConfigService, ForesightPaths, InMemoryRecordRepository, JsonDirRecordRepository,
    SecretServiceImpl,
};
use foresight_interaction::GeminiApiAgent;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Effective configuration plus credentials.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: ForesightConfig,
    pub secrets: SecretConfig,
    pub config_path: PathBuf,
}

/// Loads `config.toml` (default location unless `config_path` is given),
/// applies environment overrides, and reads the `secret.json` beside it.
pub async fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    let config_service = match config_path {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let config = config_service.load().await?;

    let secret_path = ForesightPaths::new(config_service.path().parent()).secret_file()?;
    let secrets = SecretServiceImpl::new(secret_path, std::env::var(GEMINI_API_KEY_ENV).ok())
        .load_secrets()
        .await?;

    Ok(Settings {
        config,
        secrets,
        config_path: config_service.path().to_path_buf(),
    })
}

/// Builds the analysis service. Without an API key the service runs in
/// simulation mode.
pub async fn build_service(config: &ForesightConfig, secrets: &SecretConfig) -> Result<AnalysisService> {
    let records = open_records(&config.storage).await?;
    let service = AnalysisService::new(records, FallbackGenerator::new())?;

    let Some(api_key) = secrets.gemini_api_key() else {
        tracing::warn!(
            "[Bootstrap] {GEMINI_API_KEY_ENV} not set. Using simulation mode for AI responses."
        );
        return Ok(service);
    };

    let (text, vision) = GeminiApiAgent::pair_from_config(api_key, &config.model)?;
    tracing::info!(
        "[Bootstrap] Gemini models: text={} vision={}",
        config.model.text_model,
        config.model.vision_model
    );

    Ok(service
        .with_text_model(Arc::new(text))
        .with_vision_model(Arc::new(vision)))
}

async fn open_records(storage: &StorageConfig) -> Result<Arc<dyn RecordRepository>> {
    match storage.backend {
        StorageBackend::Memory => {
            tracing::info!("[Bootstrap] Using in-memory record store");
            Ok(Arc::new(InMemoryRecordRepository::new()))
        }
        StorageBackend::JsonDir => {
            let dir = match &storage.data_dir {
                Some(dir) => dir.clone(),
                None => ForesightPaths::default().records_dir()?,
            };
            tracing::info!("[Bootstrap] Using JSON record store at {}", dir.display());
            Ok(Arc::new(JsonDirRecordRepository::new(dir).await?))
        }
    }
}

/// Human-readable dump of the effective settings. The API key is never
/// printed.
pub fn render_settings(settings: &Settings) -> Result<String> {
    let key_state = if settings.secrets.gemini_api_key().is_some() {
        "<redacted>"
    } else {
        "<not set, simulation mode>"
    };

    Ok(format!(
        "# config file: {}\n{}\n[secrets]\ngemini_api_key = \"{key_state}\"\n",
        settings.config_path.display(),
        toml::to_string_pretty(&settings.config)?.trim_end(),
    ))
}
