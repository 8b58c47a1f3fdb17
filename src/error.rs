//! Error types for Recap.

use thiserror::Error;

/// Library-level error type for Recap operations.
#[derive(Error, Debug)]
pub enum RecapError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Video unavailable: {0}")]
    VideoUnavailable(String),

    #[error("Transcripts are disabled for video {0}")]
    TranscriptDisabled(String),

    #[error("No transcript available: {0}")]
    TranscriptNotAvailable(String),

    #[error("Failed to parse transcript: {0}")]
    TranscriptParse(String),

    #[error("Chunking error: {0}")]
    Chunking(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Recap operations.
pub type Result<T> = std::result::Result<T, RecapError>;
