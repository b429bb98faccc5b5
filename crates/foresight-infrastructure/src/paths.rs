//! Unified path management for foresight configuration and data files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/foresight/         # Config directory
//! ├── config.toml              # Application configuration
//! └── secret.json              # API keys
//!
//! ~/.local/share/foresight/    # Data directory
//! └── records/                 # json_dir record store
//!     ├── startup_analysis/
//!     ├── design_roast/
//!     └── chat_message/
//! ```

use foresight_core::error::{ForesightError, Result};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "foresight";

/// Path resolver for foresight.
///
/// With a base directory, both config and data resolve under it, which keeps
/// tests away from the user's real home.
#[derive(Debug, Clone, Default)]
pub struct ForesightPaths {
    base: Option<PathBuf>,
}

impl ForesightPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the foresight configuration directory (e.g. `~/.config/foresight/`).
    pub fn config_dir(&self) -> Result<PathBuf> {
        match &self.base {
            Some(base) => Ok(base.to_path_buf()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_NAME))
                .ok_or_else(|| ForesightError::config("Cannot find config directory")),
        }
    }

    /// Returns the foresight data directory (e.g. `~/.local/share/foresight/`).
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.base {
            Some(base) => Ok(base.join("data")),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_NAME))
                .ok_or_else(|| ForesightError::config("Cannot find data directory")),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600).
    pub fn secret_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    /// Returns the root of the `json_dir` record store.
    pub fn records_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("records"))
    }
}
