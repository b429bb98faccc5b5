//! Normalization of free-text model output into typed results.
//!
//! Models are asked for bare JSON but routinely wrap it in prose or code
//! fences. The object is taken greedily from the first `{` to the last `}`,
//! numeric fields sent as strings are coerced, and the result is checked
//! against the typed shape. Any failure here is a soft failure: the caller
//! falls back to a canned result.

use foresight_core::analysis::{
    DesignRoast, FEEDBACK_ITEM_COUNT, MARKET_FIT_RANGE, MAX_LIST_ITEMS, PersonaReply, SCORE_RANGE,
    StartupAnalysis,
};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::ops::RangeInclusive;
use std::sync::LazyLock;
use thiserror::Error;

static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("JSON object pattern is valid"));

/// Why a model response could not be turned into a result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("no JSON object found in model output")]
    NoJsonObject,

    #[error("malformed JSON in model output: {0}")]
    InvalidJson(String),

    #[error("model output does not match the expected shape: {0}")]
    SchemaMismatch(String),

    #[error("model returned an empty reply")]
    EmptyReply,
}

/// Returns the greedy `{...}` span of `text`, if any.
pub fn extract_json_object(text: &str) -> Option<&str> {
    JSON_OBJECT.find(text).map(|m| m.as_str())
}

/// Parses a startup analysis from raw model text.
pub fn normalize_startup_analysis(text: &str) -> Result<StartupAnalysis, NormalizeError> {
    let mut object = parse_object(text)?;
    coerce_integer_field(&mut object, "marketFit", &MARKET_FIT_RANGE)?;

    let mut analysis: StartupAnalysis = from_object(object)?;
    require_text("analysis", &analysis.analysis)?;
    analysis.tech_stack = clean_list("techStack", analysis.tech_stack)?;
    analysis.competitors = clean_list("competitors", analysis.competitors)?;
    analysis.emoji = analysis
        .emoji
        .trim()
        .chars()
        .next()
        .map(String::from)
        .ok_or_else(|| NormalizeError::SchemaMismatch("emoji is empty".to_string()))?;

    Ok(analysis)
}

/// Parses a design roast from raw model text.
pub fn normalize_design_roast(text: &str) -> Result<DesignRoast, NormalizeError> {
    let mut object = parse_object(text)?;
    coerce_integer_field(&mut object, "score", &SCORE_RANGE)?;

    let mut roast: DesignRoast = from_object(object)?;
    require_text("title", &roast.title)?;
    require_text("suggestedFix", &roast.suggested_fix)?;

    if roast.feedback.len() < FEEDBACK_ITEM_COUNT {
        return Err(NormalizeError::SchemaMismatch(format!(
            "expected {FEEDBACK_ITEM_COUNT} feedback items, got {}",
            roast.feedback.len()
        )));
    }
    roast.feedback.truncate(FEEDBACK_ITEM_COUNT);

    Ok(roast)
}

/// Persona replies are free text; only emptiness is rejected.
pub fn normalize_persona_reply(text: &str) -> Result<PersonaReply, NormalizeError> {
    let reply = text.trim();
    if reply.is_empty() {
        return Err(NormalizeError::EmptyReply);
    }
    Ok(PersonaReply::new(reply))
}

fn parse_object(text: &str) -> Result<Map<String, Value>, NormalizeError> {
    let span = extract_json_object(text).ok_or(NormalizeError::NoJsonObject)?;
    match serde_json::from_str::<Value>(span) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(NormalizeError::InvalidJson("expected a JSON object".to_string())),
        Err(e) => Err(NormalizeError::InvalidJson(e.to_string())),
    }
}

fn from_object<T: DeserializeOwned>(object: Map<String, Value>) -> Result<T, NormalizeError> {
    serde_json::from_value(Value::Object(object))
        .map_err(|e| NormalizeError::SchemaMismatch(e.to_string()))
}

/// Rewrites `object[key]` as an integer clamped into `range`.
///
/// Accepts JSON numbers and numeric strings; strings are read by their
/// leading integer, so `"77"`, `" 77 "` and `"77%"` all become 77.
fn coerce_integer_field(
    object: &mut Map<String, Value>,
    key: &str,
    range: &RangeInclusive<u8>,
) -> Result<(), NormalizeError> {
    let value = object
        .get(key)
        .ok_or_else(|| NormalizeError::SchemaMismatch(format!("missing field `{key}`")))?;

    let number = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => parse_leading_integer(s),
        _ => None,
    }
    .ok_or_else(|| NormalizeError::SchemaMismatch(format!("`{key}` is not a number: {value}")))?;

    let clamped = number.clamp(i64::from(*range.start()), i64::from(*range.end()));
    object.insert(key.to_string(), Value::from(clamped));
    Ok(())
}

/// Leading-integer parse: optional whitespace and sign, then digits.
fn parse_leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }

    // Saturate absurdly long digit runs; the value is clamped afterwards anyway
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn require_text(field: &str, value: &str) -> Result<(), NormalizeError> {
    if value.trim().is_empty() {
        return Err(NormalizeError::SchemaMismatch(format!("`{field}` is empty")));
    }
    Ok(())
}

fn clean_list(field: &str, items: Vec<String>) -> Result<Vec<String>, NormalizeError> {
    let items: Vec<String> = items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .take(MAX_LIST_ITEMS)
        .collect();

    if items.is_empty() {
        return Err(NormalizeError::SchemaMismatch(format!("`{field}` is empty")));
    }
    Ok(items)
}
