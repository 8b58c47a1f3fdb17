//! Markdown summary generation.

use crate::chunking::ContentChunk;
use crate::config::Prompts;
use crate::error::Result;
use crate::llm::ChatModel;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Separator placed between chunks in the prompt context.
pub const CHUNK_SEPARATOR: &str = "\n\n";

/// Summarizes transcript chunks into Markdown.
pub struct Summarizer {
    model: Arc<dyn ChatModel>,
    prompts: Prompts,
}

impl Summarizer {
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

    /// Build the full prompt for a set of chunks.
    pub fn build_prompt(&self, chunks: &[ContentChunk]) -> String {
        let context = chunks
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join(CHUNK_SEPARATOR);

        let mut vars = HashMap::new();
        vars.insert("context".to_string(), context);

        self.prompts
            .render_with_custom(&self.prompts.summary.template, &vars)
    }

    /// Send all chunks in one request and return the response verbatim.
    #[instrument(skip(self, chunks), fields(chunks = chunks.len(), model = self.model.model_name()))]
    pub async fn summarize(&self, chunks: &[ContentChunk]) -> Result<String> {
        let prompt = self.build_prompt(chunks);
        info!("Requesting summary ({} prompt characters)", prompt.len());
        self.model.complete(&prompt).await
    }
}
