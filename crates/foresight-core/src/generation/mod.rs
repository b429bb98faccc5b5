//! Generative model seam.
//!
//! The pipeline only needs "prompt (plus optional image) in, free text out".
//! Concrete HTTP clients live in `foresight-interaction`; tests substitute
//! their own implementations.

use crate::analysis::InlineImage;
use async_trait::async_trait;
use thiserror::Error;

/// Input for a single model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    pub prompt: String,
    pub image: Option<InlineImage>,
}

impl ModelRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.image = Some(image);
        self
    }
}

/// Failures reported by a model client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Transport failure or non-success HTTP status
    #[error("model request failed{}: {message}", .status_code.map(|c| format!(" ({c})")).unwrap_or_default())]
    Request {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
    },

    /// The model answered without any text
    #[error("model returned no text")]
    EmptyResponse,

    /// The request could not be encoded for the model
    #[error("invalid model payload: {0}")]
    InvalidPayload(String),
}

/// A generative text (or vision) model endpoint.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Model identifier, used in logs.
    fn name(&self) -> &str;

    /// Sends the request and returns the model's raw text output.
    async fn generate(&self, request: ModelRequest) -> Result<String, ModelError>;
}
