//! Canned persona replies.

use super::model::Persona;

/// Replies used in place of a model answer, three per persona.
pub fn canned_replies(persona: Persona) -> &'static [&'static str] {
    match persona {
        Persona::Past => &[
            "Remember when you were just starting out and full of hope? Those days, though uncertain, set you on an incredible journey.",
            "I used to worry about everything, but every mistake taught me something valuable.",
            "Back then, I was nervous but eager. Trust that the future holds growth.",
        ],
        Persona::Present => &[
            "Your focus now is key; break tasks into small, achievable steps and keep moving forward.",
            "Facing challenges now shapes you. Stay pragmatic and celebrate small wins.",
            "The present is all about learning and adaptation. Keep your balance.",
        ],
        Persona::Future => &[
            "Every risk you take today builds a brighter future. Continue pushing forward!",
            "Reflecting from the future, I can say that persistence pays off. Keep learning and evolving.",
            "I see your future as rich with achievements, and every setback was a lesson.",
        ],
    }
}
