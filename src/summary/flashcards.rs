//! Flashcard generation from a summary.
//!
//! The model is asked for blocks of the form
//!
//! ```text
//! Question
//! ?
//! Answer
//! ---
//! ```
//!
//! The response is not parsed or validated; it is passed through as-is.

use crate::config::Prompts;
use crate::error::Result;
use crate::llm::ChatModel;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Line separating a question from its answer.
pub const QUESTION_SEPARATOR: &str = "?";

/// Line closing a flashcard.
pub const CARD_SEPARATOR: &str = "---";

/// Generates flashcards from a Markdown summary.
pub struct FlashcardGenerator {
    model: Arc<dyn ChatModel>,
    prompts: Prompts,
}

impl FlashcardGenerator {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn build_prompt(&self, summary: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("summary".to_string(), summary.to_string());
        self.prompts
            .render_with_custom(&self.prompts.flashcards.template, &vars)
    }

    /// Request flashcards for `summary` and return the raw response.
    #[instrument(skip(self, summary), fields(model = self.model.model_name()))]
    pub async fn generate(&self, summary: &str) -> Result<String> {
        let prompt = self.build_prompt(summary);
        info!("Requesting flashcards");
        self.model.complete(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::{FailingModel, ScriptedModel};

    #[tokio::test]
    async fn test_prompt_contains_summary_and_format() {
        let model = Arc::new(ScriptedModel::new(["ok"]));
        let generator = FlashcardGenerator::new(model.clone());

        generator.generate("# Ownership\n- moves").await.unwrap();

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("# Ownership\n- moves"));
        assert!(prompts[0].contains(&format!("\n{}\n", QUESTION_SEPARATOR)));
        assert!(prompts[0].contains(&format!("\n{}\n", CARD_SEPARATOR)));
    }

    #[tokio::test]
    async fn test_malformed_output_passes_through() {
        let malformed = "not a flashcard at all\n???\n";
        let generator = FlashcardGenerator::new(Arc::new(ScriptedModel::new([malformed])));

        let cards = generator.generate("summary").await.unwrap();
        assert_eq!(cards, malformed);
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let generator = FlashcardGenerator::new(Arc::new(FailingModel));
        assert!(generator.generate("summary").await.is_err());
    }
}
