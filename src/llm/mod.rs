//! Hosted language model access.

mod openai;

pub use openai::OpenAIChatModel;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for chat-completion models.
///
/// One call is one awaited request; implementations do not retry.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send a single user prompt and return the response text.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
