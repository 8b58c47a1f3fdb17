//! Configuration module for Recap.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{FlashcardPrompts, Prompts, SummaryPrompts};
pub use settings::{
    ChunkingSettings, GeneralSettings, LlmSettings, PromptSettings, Settings,
    TranscriptSettings, OUTPUT_DIR_ENV,
};
