//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! Calls the `generateContent` endpoint with a single user turn made of a text
//! part and, for vision requests, one inline image part.

use async_trait::async_trait;
use foresight_core::config::{DEFAULT_GEMINI_BASE_URL, ModelConfig};
use foresight_core::generation::{GenerativeModel, ModelError, ModelRequest};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Model client that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }

    /// Builds the text and vision agents described by `config`.
    ///
    /// Both share one connection pool.
    pub fn pair_from_config(
        api_key: &str,
        config: &ModelConfig,
    ) -> Result<(Self, Self), ModelError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| ModelError::Request {
                status_code: None,
                message: format!("Failed to build HTTP client: {err}"),
                is_retryable: false,
            })?;

        let text = Self {
            client: client.clone(),
            api_key: api_key.to_string(),
            model: config.text_model.clone(),
            base_url: config.base_url.clone(),
        };
        let vision = Self {
            model: config.vision_model.clone(),
            ..text.clone()
        };
        Ok((text, vision))
    }

    /// Points the agent at a different API root (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_parts(request: ModelRequest) -> Result<Vec<Part>, ModelError> {
        let mut parts = Vec::new();
        if !request.prompt.trim().is_empty() {
            parts.push(Part::Text {
                text: request.prompt,
            });
        }

        if let Some(image) = request.image {
            parts.push(Part::InlineData {
                inline_data: InlineDataPayload {
                    mime_type: image.mime_type,
                    data: image.data,
                },
            });
        }

        if parts.is_empty() {
            return Err(ModelError::InvalidPayload(
                "Gemini payload must include text or an image".into(),
            ));
        }

        Ok(parts)
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, ModelError> {
        let url = format!(
            "{}/{model}:generateContent",
            self.base_url.trim_end_matches('/'),
            model = self.model,
        );

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|err| {
                let is_retryable = err.is_connect() || err.is_timeout();
                ModelError::Request {
                    status_code: None,
                    // without_url keeps the API key out of the message
                    message: format!("Gemini API request failed: {}", err.without_url()),
                    is_retryable,
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|err| ModelError::Request {
                status_code: None,
                message: format!("Failed to parse Gemini response: {}", err.without_url()),
                is_retryable: false,
            })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl GenerativeModel for GeminiApiAgent {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: ModelRequest) -> Result<String, ModelError> {
        let has_image = request.image.is_some();
        let contents = vec![Content {
            role: "user".to_string(),
            parts: Self::build_parts(request)?,
        }];

        tracing::debug!(
            "[GeminiApiAgent] generateContent model={} image={}",
            self.model,
            has_image
        );

        self.send_request(&GenerateContentRequest { contents }).await
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String, ModelError> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or(ModelError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String) -> ModelError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    ModelError::Request {
        status_code: Some(status.as_u16()),
        message,
        is_retryable,
    }
}
