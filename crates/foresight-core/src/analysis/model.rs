//! Analysis result models.
//!
//! Field names serialize in camelCase, matching what the browser client and
//! the stored records expect.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use strum::{Display, EnumString};

/// Valid range for [`StartupAnalysis::market_fit`].
pub const MARKET_FIT_RANGE: RangeInclusive<u8> = 1..=100;

/// Valid range for [`DesignRoast::score`].
pub const SCORE_RANGE: RangeInclusive<u8> = 1..=10;

/// Number of feedback items every roast carries.
pub const FEEDBACK_ITEM_COUNT: usize = 3;

/// Upper bound for `techStack` and `competitors` lists.
pub const MAX_LIST_ITEMS: usize = 5;

/// Evaluation of a startup idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupAnalysis {
    /// Two or three sentences of analysis
    pub analysis: String,
    /// Market potential, 1-100
    pub market_fit: u8,
    /// Technologies suited to build the idea
    pub tech_stack: Vec<String>,
    /// Existing competitors or similar products
    pub competitors: Vec<String>,
    /// A single emoji summarizing the sentiment
    pub emoji: String,
}

/// Category of a roast feedback line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FeedbackKind {
    Positive,
    Negative,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItem {
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    pub text: String,
}

impl FeedbackItem {
    pub fn new(kind: FeedbackKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Structured critique of a design image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRoast {
    /// A catchy title summarizing the critique
    pub title: String,
    /// Overall design quality, 1-10
    pub score: u8,
    /// Exactly [`FEEDBACK_ITEM_COUNT`] items, in the order produced
    pub feedback: Vec<FeedbackItem>,
    /// A short paragraph suggesting improvements
    pub suggested_fix: String,
}

/// Reply from a time persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaReply {
    pub response: String,
}

impl PersonaReply {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

/// Any of the three result shapes produced by the pipeline.
///
/// Serialized untagged so each variant looks exactly like its inner record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Startup(StartupAnalysis),
    Roast(DesignRoast),
    Persona(PersonaReply),
}

impl From<StartupAnalysis> for AnalysisResult {
    fn from(value: StartupAnalysis) -> Self {
        Self::Startup(value)
    }
}

impl From<DesignRoast> for AnalysisResult {
    fn from(value: DesignRoast) -> Self {
        Self::Roast(value)
    }
}

impl From<PersonaReply> for AnalysisResult {
    fn from(value: PersonaReply) -> Self {
        Self::Persona(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_startup_analysis_uses_camel_case_keys() {
        let analysis = StartupAnalysis {
            analysis: "Solid".to_string(),
            market_fit: 70,
            tech_stack: vec!["Rust".to_string()],
            competitors: vec!["Acme".to_string()],
            emoji: "🚀".to_string(),
        };

        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["marketFit"], json!(70));
        assert_eq!(value["techStack"], json!(["Rust"]));
        assert!(value.get("market_fit").is_none());
    }

    #[test]
    fn test_feedback_item_serializes_type_key() {
        let item = FeedbackItem::new(FeedbackKind::Warning, "Check contrast");
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value, json!({"type": "warning", "text": "Check contrast"}));
    }

    #[test]
    fn test_feedback_kind_rejects_unknown_type() {
        let parsed = serde_json::from_value::<FeedbackItem>(json!({"type": "meh", "text": "x"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_analysis_result_is_untagged() {
        let result: AnalysisResult = PersonaReply::new("hello").into();
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({"response": "hello"}));
    }
}
