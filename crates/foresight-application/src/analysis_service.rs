//! AnalysisService - the AI response pipeline.
//!
//! Every request kind runs through the same steps: build a prompt, call the
//! configured model, normalize its text into the typed result, and fall back
//! to a canned result whenever any of that is impossible. Model failures are
//! logged and absorbed here; only invalid input and storage failures reach
//! the caller as errors.
//!
//! When a request carries a user id, the finalized result is written to the
//! record store.

use crate::fallback::FallbackGenerator;
use crate::normalizer::{
    NormalizeError, normalize_design_roast, normalize_persona_reply, normalize_startup_analysis,
};
use crate::prompt::PromptBuilder;
use foresight_core::analysis::{
    AnalysisKind, AnalysisRequest, AnalysisResult, DesignRoast, InlineImage, PersonaReply,
    StartupAnalysis,
};
use foresight_core::error::{ForesightError, Result};
use foresight_core::generation::{GenerativeModel, ModelRequest};
use foresight_core::persona::Persona;
use foresight_core::record::{ChatSender, RecordKind, RecordPayload, RecordRepository, StoredRecord};
use std::sync::Arc;

/// Runs analysis requests against a model, with canned fallbacks.
pub struct AnalysisService {
    text_model: Option<Arc<dyn GenerativeModel>>,
    vision_model: Option<Arc<dyn GenerativeModel>>,
    prompts: PromptBuilder,
    fallback: FallbackGenerator,
    records: Arc<dyn RecordRepository>,
}

impl AnalysisService {
    /// Creates a service in simulation mode (no models attached).
    pub fn new(records: Arc<dyn RecordRepository>, fallback: FallbackGenerator) -> Result<Self> {
        Ok(Self {
            text_model: None,
            vision_model: None,
            prompts: PromptBuilder::new()?,
            fallback,
            records,
        })
    }

    /// Attaches the model used for startup analysis and persona chat.
    pub fn with_text_model(mut self, model: Arc<dyn GenerativeModel>) -> Self {
        self.text_model = Some(model);
        self
    }

    /// Attaches the model used for design roasts.
    pub fn with_vision_model(mut self, model: Arc<dyn GenerativeModel>) -> Self {
        self.vision_model = Some(model);
        self
    }

    /// True when no model is attached and every answer is canned.
    pub fn is_simulation(&self) -> bool {
        self.text_model.is_none() && self.vision_model.is_none()
    }

    /// Dispatches any request kind.
    pub async fn handle(
        &self,
        request: AnalysisRequest,
        user_id: Option<&str>,
    ) -> Result<AnalysisResult> {
        match request {
            AnalysisRequest::StartupIdea { idea } => {
                self.analyze_startup(&idea, user_id).await.map(Into::into)
            }
            AnalysisRequest::DesignImage { image } => {
                self.roast_design(image, user_id).await.map(Into::into)
            }
            AnalysisRequest::PersonaMessage { message, persona } => self
                .persona_chat(&message, persona, user_id)
                .await
                .map(Into::into),
        }
    }

    /// Evaluates a startup idea.
    ///
    /// # Returns
    ///
    /// - `Ok(StartupAnalysis)`: Model-derived or canned analysis
    /// - `Err(ForesightError::Validation)`: The idea is blank
    /// - `Err(_)`: The result could not be persisted
    pub async fn analyze_startup(
        &self,
        idea: &str,
        user_id: Option<&str>,
    ) -> Result<StartupAnalysis> {
        AnalysisRequest::startup_idea(idea)?;
        let idea = idea.trim();

        let prompt = self.prompts.startup_analysis(idea)?;
        let analysis = self
            .generate_or_fallback(
                AnalysisKind::StartupAnalysis,
                self.text_model.as_deref(),
                ModelRequest::text(prompt),
                normalize_startup_analysis,
                || self.fallback.startup_analysis(idea),
            )
            .await;

        if let Some(user_id) = active_user(user_id) {
            self.records
                .put(
                    user_id,
                    RecordPayload::StartupAnalysis {
                        idea: idea.to_string(),
                        result: analysis.clone(),
                    },
                )
                .await?;
        }

        Ok(analysis)
    }

    /// Critiques a design image. A missing image is answered from the
    /// fallback pool.
    pub async fn roast_design(
        &self,
        image: Option<InlineImage>,
        user_id: Option<&str>,
    ) -> Result<DesignRoast> {
        let roast = match image {
            Some(image) => {
                let prompt = self.prompts.design_roast()?;
                self.generate_or_fallback(
                    AnalysisKind::DesignRoast,
                    self.vision_model.as_deref(),
                    ModelRequest::text(prompt).with_image(image),
                    normalize_design_roast,
                    || self.fallback.design_roast(),
                )
                .await
            }
            None => {
                tracing::debug!("[AnalysisService] design_roast: no image, using fallback");
                self.fallback.design_roast()
            }
        };

        if let Some(user_id) = active_user(user_id) {
            self.records
                .put(
                    user_id,
                    RecordPayload::DesignRoast {
                        result: roast.clone(),
                    },
                )
                .await?;
        }

        Ok(roast)
    }

    /// Answers a message in the voice of `persona`.
    ///
    /// With a user id, both the user's message and the reply are stored, in
    /// that order. The two writes are not atomic: if the reply write fails
    /// the user's message stays stored and the call returns the error.
    pub async fn persona_chat(
        &self,
        message: &str,
        persona: Persona,
        user_id: Option<&str>,
    ) -> Result<PersonaReply> {
        AnalysisRequest::persona_message(message, persona)?;
        let message = message.trim();

        let prompt = self.prompts.persona_chat(message, persona)?;
        let reply = self
            .generate_or_fallback(
                AnalysisKind::PersonaChat,
                self.text_model.as_deref(),
                ModelRequest::text(prompt),
                normalize_persona_reply,
                || self.fallback.persona_reply(persona),
            )
            .await;

        if let Some(user_id) = active_user(user_id) {
            self.records
                .put(
                    user_id,
                    RecordPayload::ChatMessage {
                        sender: ChatSender::User,
                        message: message.to_string(),
                    },
                )
                .await?;
            self.records
                .put(
                    user_id,
                    RecordPayload::ChatMessage {
                        sender: persona.into(),
                        message: reply.response.clone(),
                    },
                )
                .await?;
        }

        Ok(reply)
    }

    /// Loads a stored startup analysis.
    pub async fn get_startup_analysis(&self, id: &str) -> Result<StoredRecord> {
        self.get_record(RecordKind::StartupAnalysis, id).await
    }

    /// Loads a stored design roast.
    pub async fn get_design_roast(&self, id: &str) -> Result<StoredRecord> {
        self.get_record(RecordKind::DesignRoast, id).await
    }

    /// Lists a user's chat messages, oldest first.
    pub async fn chat_history(&self, user_id: &str) -> Result<Vec<StoredRecord>> {
        self.records.list_chat_by_user(user_id).await
    }

    async fn get_record(&self, kind: RecordKind, id: &str) -> Result<StoredRecord> {
        self.records
            .get(kind, id)
            .await?
            .ok_or_else(|| ForesightError::not_found(kind_label(kind), id))
    }

    async fn generate_or_fallback<T>(
        &self,
        kind: AnalysisKind,
        model: Option<&dyn GenerativeModel>,
        request: ModelRequest,
        normalize: impl FnOnce(&str) -> std::result::Result<T, NormalizeError>,
        fallback: impl FnOnce() -> T,
    ) -> T {
        let Some(model) = model else {
            tracing::debug!("[AnalysisService] {kind}: no model configured, using fallback");
            return fallback();
        };

        let text = match model.generate(request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    "[AnalysisService] {kind}: model {} failed, using fallback: {e}",
                    model.name()
                );
                return fallback();
            }
        };

        match normalize(&text) {
            Ok(result) => {
                tracing::debug!("[AnalysisService] {kind}: model {} answered", model.name());
                result
            }
            Err(e) => {
                tracing::warn!(
                    "[AnalysisService] {kind}: unusable output from {}, using fallback: {e}",
                    model.name()
                );
                tracing::debug!("[AnalysisService] {kind}: raw model output: {text}");
                fallback()
            }
        }
    }
}

/// Decodes the `imageData` field of a roast request.
///
/// Undecodable payloads are treated like a missing image.
pub fn parse_image_data(raw: Option<&str>) -> Option<InlineImage> {
    let raw = raw.filter(|raw| !raw.trim().is_empty())?;
    match InlineImage::from_image_data(raw) {
        Ok(image) => Some(image),
        Err(e) => {
            tracing::warn!("[AnalysisService] ignoring image payload: {e}");
            None
        }
    }
}

fn active_user(user_id: Option<&str>) -> Option<&str> {
    user_id.map(str::trim).filter(|id| !id.is_empty())
}

fn kind_label(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::StartupAnalysis => "StartupAnalysis",
        RecordKind::DesignRoast => "DesignRoast",
        RecordKind::ChatMessage => "ChatMessage",
    }
}
