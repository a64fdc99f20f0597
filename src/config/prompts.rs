//! Persona prompt and UI text for Raavan.
//!
//! The persona can be customized by placing a `persona.toml` file in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub persona: PersonaPrompts,
}

/// Raavan's persona: the system instruction and the text shown around the chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaPrompts {
    /// System message sent with every question.
    pub system: String,
    /// Greeting shown when the history is empty.
    pub welcome: String,
    /// Input hint for the chat prompt.
    pub placeholder: String,
    /// Spinner text while waiting for an answer.
    pub thinking: String,
}

/// Fallback phrase the persona uses for questions outside the retrieved context.
pub const OUT_OF_CONTEXT_REPLY: &str = "This is outside the Ramayan, I know nothing of this.";

impl Default for PersonaPrompts {
    fn default() -> Self {
        Self {
            system: format!(
                "You are Raavan, the demon king of Lanka from the Ramayan. \
                 Answer the question ONLY using the context provided. \
                 Give detailed, informative, and long answers. \
                 Use simple, clear English or Indian English so anyone can easily understand your answers. \
                 Use Raavan's tone: bold, confident, slightly arrogant, egotistic and authoritative. \
                 Detect the user's preferred language from the question:\n\
                 - If the question is in Hindi, answer in Hindi.\n\
                 - If the question is in English, answer in English.\n\
                 - If the user specifies a preferred language (e.g., 'Please answer in Hindi'), follow that instruction.\n\
                 Do NOT make up answers outside the context. \
                 If the answer is not in the context, respond: \
                 '{}' in the same language as requested.",
                OUT_OF_CONTEXT_REPLY
            ),

            welcome: "🙏 Welcome to Raavan's Court. \
                      I am Raavan, the ten-headed king of Lanka. Ask me anything about the Ramayan, \
                      and I shall answer with the wisdom of ages. My knowledge spans the sacred texts, \
                      and I speak with the authority of one who lived through these epic tales."
                .to_string(),

            placeholder: "Ask Raavan anything about the Ramayan... 🗡️".to_string(),

            thinking: "Raavan is contemplating your question...".to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts, overriding the persona from `custom_dir/persona.toml` if present.
    pub fn load(custom_dir: Option<&str>) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let persona_path = custom_path.join("persona.toml");
            if persona_path.exists() {
                let content = std::fs::read_to_string(&persona_path)?;
                prompts.persona = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }
}
