//! Stored record model.

use crate::analysis::{DesignRoast, StartupAnalysis};
use crate::persona::Persona;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

/// Collection a record belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecordKind {
    StartupAnalysis,
    DesignRoast,
    ChatMessage,
}

/// Author of a stored chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatSender {
    User,
    Past,
    Present,
    Future,
}

impl From<Persona> for ChatSender {
    fn from(persona: Persona) -> Self {
        match persona {
            Persona::Past => ChatSender::Past,
            Persona::Present => ChatSender::Present,
            Persona::Future => ChatSender::Future,
        }
    }
}

/// Kind-specific content of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordPayload {
    StartupAnalysis {
        idea: String,
        result: StartupAnalysis,
    },
    DesignRoast {
        result: DesignRoast,
    },
    ChatMessage {
        sender: ChatSender,
        message: String,
    },
}

impl RecordPayload {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordPayload::StartupAnalysis { .. } => RecordKind::StartupAnalysis,
            RecordPayload::DesignRoast { .. } => RecordKind::DesignRoast,
            RecordPayload::ChatMessage { .. } => RecordKind::ChatMessage,
        }
    }
}

/// A persisted pipeline result associated with a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Opaque id supplied by the identity provider
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: RecordPayload,
}

impl StoredRecord {
    /// Creates a record with a fresh id, timestamped now.
    pub fn new(user_id: impl Into<String>, payload: RecordPayload) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            created_at: Utc::now(),
            payload,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.payload.kind()
    }
}
