//! Pipeline input types.

use crate::error::{ForesightError, Result};
use crate::persona::Persona;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use strum::{AsRefStr, Display};

/// MIME type assumed for raw base64 uploads without a data-URL header.
pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";

/// The kind of analysis a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum AnalysisKind {
    StartupAnalysis,
    DesignRoast,
    PersonaChat,
}

/// A single unit of work for the AI pipeline, built per HTTP call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    StartupIdea { idea: String },
    DesignImage { image: Option<InlineImage> },
    PersonaMessage { message: String, persona: Persona },
}

impl AnalysisRequest {
    /// Builds a startup request, rejecting blank ideas.
    pub fn startup_idea(idea: impl Into<String>) -> Result<Self> {
        let idea = idea.into();
        if idea.trim().is_empty() {
            return Err(ForesightError::validation("idea must not be blank"));
        }
        Ok(Self::StartupIdea { idea })
    }

    /// Builds a persona chat request, rejecting blank messages.
    pub fn persona_message(message: impl Into<String>, persona: Persona) -> Result<Self> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ForesightError::validation("message must not be blank"));
        }
        Ok(Self::PersonaMessage { message, persona })
    }

    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisRequest::StartupIdea { .. } => AnalysisKind::StartupAnalysis,
            AnalysisRequest::DesignImage { .. } => AnalysisKind::DesignRoast,
            AnalysisRequest::PersonaMessage { .. } => AnalysisKind::PersonaChat,
        }
    }
}

/// An image sent inline to a vision model.
///
/// `data` always holds standard base64 that is known to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

impl InlineImage {
    /// Parses the `imageData` field of a roast request.
    ///
    /// Accepts raw base64 or a `data:<mime>;base64,<payload>` URL as produced
    /// by a browser `FileReader`. Whitespace inside the payload is ignored.
    pub fn from_image_data(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let (mime_type, payload) = match raw.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest.split_once(',').ok_or_else(|| {
                    ForesightError::validation("data URL is missing its payload")
                })?;
                let mime_type = header.strip_suffix(";base64").ok_or_else(|| {
                    ForesightError::validation("data URL is not base64-encoded")
                })?;
                let mime_type = if mime_type.is_empty() {
                    DEFAULT_IMAGE_MIME_TYPE
                } else {
                    mime_type
                };
                (mime_type.to_string(), payload)
            }
            None => (DEFAULT_IMAGE_MIME_TYPE.to_string(), raw),
        };

        let data: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        if data.is_empty() {
            return Err(ForesightError::validation("image payload is empty"));
        }

        BASE64_STANDARD
            .decode(&data)
            .map_err(|e| ForesightError::validation(format!("image payload is not valid base64: {e}")))?;

        Ok(Self { mime_type, data })
    }
}
