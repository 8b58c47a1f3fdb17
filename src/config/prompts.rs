//! Prompt templates for Recap.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use crate::summary::{CARD_SEPARATOR, QUESTION_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub summary: SummaryPrompts,
    pub flashcards: FlashcardPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompt for turning transcript excerpts into a Markdown summary.
///
/// `{{context}}` receives the chunk contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    pub template: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            template: r#"Video Summary
You are a helpful assistant. Given the following transcript excerpts, produce a concise, well-structured Markdown document:
- Use H1/H2 headers for main ideas and sections.
- Use bullet lists for key concepts and supporting details.
- Discard filler words, disfluencies, and unnecessary jargon.
Transcript:
{{context}}"#
                .to_string(),
        }
    }
}

/// Prompt for deriving flashcards from a summary.
///
/// `{{summary}}` receives the generated summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashcardPrompts {
    pub template: String,
}

impl Default for FlashcardPrompts {
    fn default() -> Self {
        Self {
            template: format!(
                r#"You are a study assistant. Create flashcards that cover the key ideas of the summary below.

Write every flashcard in exactly this format, with nothing before or after the cards:

Question text
{question}
Answer text
{card}

Rules:
- One question per card, answerable from the summary alone.
- Keep answers short (one or two sentences).
- Do not number the cards and do not use Markdown headers.

Summary:
{{{{summary}}}}"#,
                question = QUESTION_SEPARATOR,
                card = CARD_SEPARATOR,
            ),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }

            let flashcards_path = custom_path.join("flashcards.toml");
            if flashcards_path.exists() {
                let content = std::fs::read_to_string(&flashcards_path)?;
                prompts.flashcards = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
