//! Persona domain model.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// One of the three conversational viewpoints offered by the time portal.
///
/// Serialized in lowercase (`"past"`, `"present"`, `"future"`), which is also
/// the only accepted spelling when parsing from request input.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Persona {
    /// The user five years ago
    Past,
    /// The user today
    Present,
    /// The user five years from now
    Future,
}

impl Persona {
    /// Instruction that puts the model into this persona's voice.
    pub fn viewpoint(&self) -> &'static str {
        match self {
            Persona::Past => {
                "You are my past self from 5 years ago, full of optimism yet inexperienced. Offer advice with youthful enthusiasm."
            }
            Persona::Present => {
                "You are my present self, providing balanced and practical insights based on current challenges."
            }
            Persona::Future => {
                "You are my future self from 5 years ahead, wise and reflective, offering guidance with foresight."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_accepts_lowercase_names() {
        assert_eq!(Persona::from_str("past").unwrap(), Persona::Past);
        assert_eq!(Persona::from_str("present").unwrap(), Persona::Present);
        assert_eq!(Persona::from_str("future").unwrap(), Persona::Future);
    }

    #[test]
    fn test_parse_rejects_unknown_persona() {
        assert!(Persona::from_str("sideways").is_err());
        assert!(Persona::from_str("").is_err());
    }

    #[test]
    fn test_serde_uses_lowercase() {
        let json = serde_json::to_string(&Persona::Future).unwrap();
        assert_eq!(json, "\"future\"");
        let parsed: Persona = serde_json::from_str("\"past\"").unwrap();
        assert_eq!(parsed, Persona::Past);
    }

    #[test]
    fn test_every_persona_has_a_viewpoint() {
        for persona in Persona::iter() {
            assert!(persona.viewpoint().starts_with("You are my"));
            assert_eq!(persona.to_string(), persona.as_ref());
        }
    }
}
