//! Canned responses used in simulation mode and whenever the model path fails.
//!
//! Every generator returns the exact shape the model path would, so callers
//! cannot tell the two apart. Randomness comes from one shared [`StdRng`];
//! tests seed it to get reproducible output.

use foresight_core::analysis::{
    DesignRoast, FEEDBACK_ITEM_COUNT, FeedbackItem, FeedbackKind, PersonaReply, StartupAnalysis,
};
use foresight_core::persona::{Persona, canned_replies};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

const STARTUP_ANALYSES: [&str; 3] = [
    "Developing an AI-driven {subject} has potential, but the market is competitive. Focus on creating a unique value proposition to stand out.",
    "An AI-powered {subject} could find an audience quickly, but user trust and retention will decide its fate. Validate demand with a small pilot first.",
    "There is room for a smarter {subject}, though incumbents move fast. A narrow niche and a strong data advantage would make this defensible.",
];

const ASSISTANT_SUBJECT: &str = "personal shopping assistant";
const DEFAULT_SUBJECT: &str = "product";

const STARTUP_TECH_STACK: [&str; 3] = [
    "React Native (Mobile App)",
    "Firebase (Backend + Auth)",
    "Gemini API (Product Recs)",
];

const STARTUP_COMPETITORS: [&str; 3] = [
    "Amazon Alexa Shopping",
    "Google Shopping",
    "ShopSense AI (startup)",
];

const STARTUP_EMOJI: [&str; 4] = ["🤔", "🚀", "💡", "⚡"];

const ROAST_TITLE: &str = "Yikes, that's a lot of gradients!";
const ROAST_SUGGESTED_FIX: &str = "Try using a monochromatic color scheme with a single accent color. Reduce the number of font styles and increase padding.";

const ROAST_FEEDBACK: [(FeedbackKind, &str); 6] = [
    (FeedbackKind::Negative, "Try a more subtle color palette"),
    (FeedbackKind::Warning, "Typography hierarchy needs work"),
    (
        FeedbackKind::Positive,
        "Layout structure is good, but needs more whitespace",
    ),
    (
        FeedbackKind::Negative,
        "Contrast ratio fails accessibility standards",
    ),
    (FeedbackKind::Warning, "Consider a more consistent button style"),
    (
        FeedbackKind::Positive,
        "Visual hierarchy guides user attention well",
    ),
];

/// Draws canned results from fixed pools.
pub struct FallbackGenerator {
    rng: Mutex<StdRng>,
}

impl FallbackGenerator {
    /// Creates a generator seeded from the OS.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Creates a deterministic generator.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn startup_analysis(&self, idea: &str) -> StartupAnalysis {
        let subject = if idea.to_lowercase().contains("assistant") {
            ASSISTANT_SUBJECT
        } else {
            DEFAULT_SUBJECT
        };

        self.with_rng(|rng| {
            let template = STARTUP_ANALYSES.choose(rng).copied().unwrap_or(STARTUP_ANALYSES[0]);
            let emoji = STARTUP_EMOJI.choose(rng).copied().unwrap_or(STARTUP_EMOJI[0]);

            StartupAnalysis {
                analysis: template.replace("{subject}", subject),
                market_fit: rng.gen_range(50..=79),
                tech_stack: STARTUP_TECH_STACK.iter().map(|s| s.to_string()).collect(),
                competitors: STARTUP_COMPETITORS.iter().map(|s| s.to_string()).collect(),
                emoji: emoji.to_string(),
            }
        })
    }

    pub fn design_roast(&self) -> DesignRoast {
        self.with_rng(|rng| {
            let mut pool = ROAST_FEEDBACK;
            let (drawn, _) = pool.partial_shuffle(rng, FEEDBACK_ITEM_COUNT);
            let feedback = drawn
                .iter()
                .map(|(kind, text)| FeedbackItem::new(*kind, *text))
                .collect();

            DesignRoast {
                title: ROAST_TITLE.to_string(),
                score: rng.gen_range(2..=7),
                feedback,
                suggested_fix: ROAST_SUGGESTED_FIX.to_string(),
            }
        })
    }

    pub fn persona_reply(&self, persona: Persona) -> PersonaReply {
        let replies = canned_replies(persona);
        self.with_rng(|rng| PersonaReply::new(replies.choose(rng).copied().unwrap_or_default()))
    }

    /// Runs `f` with the RNG locked. The lock never spans an await point.
    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }
}

impl Default for FallbackGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foresight_core::analysis::{MAX_LIST_ITEMS, SCORE_RANGE};
    use std::collections::HashSet;

    #[test]
    fn test_startup_analysis_shape() {
        let fallback = FallbackGenerator::seeded(7);
        for _ in 0..50 {
            let analysis = fallback.startup_analysis("A meal planner");
            assert!((50..=79).contains(&analysis.market_fit));
            assert!(STARTUP_EMOJI.contains(&analysis.emoji.as_str()));
            assert_eq!(analysis.tech_stack.len(), 3);
            assert_eq!(analysis.competitors.len(), 3);
            assert!(analysis.tech_stack.len() <= MAX_LIST_ITEMS);
            assert!(analysis.analysis.contains("product"));
        }
    }

    #[test]
    fn test_startup_analysis_mentions_assistant() {
        let fallback = FallbackGenerator::seeded(1);
        let analysis = fallback.startup_analysis("An AI Shopping ASSISTANT");
        assert!(analysis.analysis.contains("personal shopping assistant"));
    }

    #[test]
    fn test_design_roast_draws_three_distinct_items() {
        let fallback = FallbackGenerator::seeded(42);
        for _ in 0..50 {
            let roast = fallback.design_roast();
            assert_eq!(roast.title, ROAST_TITLE);
            assert_eq!(roast.suggested_fix, ROAST_SUGGESTED_FIX);
            assert!((2..=7).contains(&roast.score));
            assert!(SCORE_RANGE.contains(&roast.score));
            assert_eq!(roast.feedback.len(), FEEDBACK_ITEM_COUNT);

            let texts: HashSet<_> = roast.feedback.iter().map(|f| f.text.as_str()).collect();
            assert_eq!(texts.len(), FEEDBACK_ITEM_COUNT);
            for item in &roast.feedback {
                assert!(ROAST_FEEDBACK.contains(&(item.kind, item.text.as_str())));
            }
        }
    }

    #[test]
    fn test_persona_reply_comes_from_persona_pool() {
        let fallback = FallbackGenerator::seeded(3);
        for persona in [Persona::Past, Persona::Present, Persona::Future] {
            let reply = fallback.persona_reply(persona);
            assert!(canned_replies(persona).contains(&reply.response.as_str()));
        }
    }

    #[test]
    fn test_equal_seeds_produce_equal_results() {
        let a = FallbackGenerator::seeded(99);
        let b = FallbackGenerator::seeded(99);

        assert_eq!(a.startup_analysis("x"), b.startup_analysis("x"));
        assert_eq!(a.design_roast(), b.design_roast());
        assert_eq!(a.persona_reply(Persona::Past), b.persona_reply(Persona::Past));
    }
}
