//! Prompt construction.
//!
//! Each request kind has one Jinja template. The structured kinds spell out
//! the exact JSON object the model must return; persona chat asks for plain
//! conversational text under a word ceiling.

use foresight_core::analysis::AnalysisRequest;
use foresight_core::error::{ForesightError, Result};
use foresight_core::persona::Persona;
use minijinja::{Environment, context};

/// Word ceiling for persona replies.
pub const PERSONA_MAX_WORDS: usize = 150;

const STARTUP_TEMPLATE: &str = "startup_analysis";
const ROAST_TEMPLATE: &str = "design_roast";
const PERSONA_TEMPLATE: &str = "persona_chat";

const STARTUP_SOURCE: &str = r#"As an AI startup analyst, evaluate this business idea in detail.
Idea: "{{ idea }}"

Provide a response in the following JSON format:
{
  "analysis": "Your detailed analysis (2-3 sentences)",
  "marketFit": "A number from 1-100 representing market potential",
  "techStack": ["3-5 technologies suitable for implementing this idea"],
  "competitors": ["3-5 existing competitors or similar products"],
  "emoji": "A single emoji representing your overall sentiment"
}
Provide only the JSON with no extra text."#;

const ROAST_SOURCE: &str = r#"You are an expert UI/UX design critic. Analyze this design image and provide detailed feedback.
Return your response in the following JSON format:
{
  "title": "A catchy title summarizing your critique",
  "score": "A number from 1-10 representing overall design quality",
  "feedback": [
    {"type": "positive", "text": "Something good about the design"},
    {"type": "negative", "text": "A critical point for improvement"},
    {"type": "warning", "text": "A cautionary point about potential issues"}
  ],
  "suggestedFix": "A brief paragraph suggesting improvements"
}
Provide only the JSON with no additional text."#;

const PERSONA_SOURCE: &str = r#"{{ viewpoint }}

My message: "{{ message }}"

Provide a thoughtful, conversational response in less than {{ max_words }} words."#;

/// Renders model prompts from typed requests.
pub struct PromptBuilder {
    env: Environment<'static>,
}

impl PromptBuilder {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for (name, source) in [
            (STARTUP_TEMPLATE, STARTUP_SOURCE),
            (ROAST_TEMPLATE, ROAST_SOURCE),
            (PERSONA_TEMPLATE, PERSONA_SOURCE),
        ] {
            env.add_template(name, source).map_err(template_error)?;
        }
        Ok(Self { env })
    }

    /// Renders the prompt for any request kind.
    pub fn build(&self, request: &AnalysisRequest) -> Result<String> {
        match request {
            AnalysisRequest::StartupIdea { idea } => self.startup_analysis(idea),
            AnalysisRequest::DesignImage { .. } => self.design_roast(),
            AnalysisRequest::PersonaMessage { message, persona } => {
                self.persona_chat(message, *persona)
            }
        }
    }

    pub fn startup_analysis(&self, idea: &str) -> Result<String> {
        self.render(STARTUP_TEMPLATE, context! { idea => idea.trim() })
    }

    /// The roast prompt does not depend on the image; it travels as a
    /// separate inline part.
    pub fn design_roast(&self) -> Result<String> {
        self.render(ROAST_TEMPLATE, context! {})
    }

    pub fn persona_chat(&self, message: &str, persona: Persona) -> Result<String> {
        self.render(
            PERSONA_TEMPLATE,
            context! {
                viewpoint => persona.viewpoint(),
                message => message.trim(),
                max_words => PERSONA_MAX_WORDS,
            },
        )
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(ctx))
            .map_err(template_error)
    }
}

fn template_error(err: minijinja::Error) -> ForesightError {
    ForesightError::internal(format!("Failed to render prompt: {err}"))
}
