//! Secret management service trait.
//!
//! Defines the interface for loading API keys.

use crate::config::SecretConfig;
use crate::error::Result;

/// Service for loading secret configuration.
///
/// # Security Note
///
/// Implementations should ensure that secrets are never logged or exposed in
/// error messages.
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration.
    ///
    /// A missing secret source is not an error; it yields an empty
    /// `SecretConfig`, which puts the server in simulation mode.
    async fn load_secrets(&self) -> Result<SecretConfig>;
}
