//! Text chunking for breaking transcripts into prompt-sized pieces.

mod recursive;

pub use recursive::{RecursiveCharacterSplitter, DEFAULT_SEPARATORS};

use crate::config::ChunkingSettings;
use serde::{Deserialize, Serialize};

/// A chunk of transcript text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentChunk {
    /// Text content of this chunk.
    pub content: String,
    /// Position of this chunk in the transcript.
    pub order: usize,
}

impl ContentChunk {
    /// Create a new content chunk.
    pub fn new(content: String, order: usize) -> Self {
        Self { content, order }
    }
}

/// Configuration for chunking, in characters.
#[derive(Debug, Clone)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 50,
        }
    }
}

impl From<&ChunkingSettings> for ChunkingConfig {
    fn from(settings: &ChunkingSettings) -> Self {
        Self {
            chunk_size: settings.chunk_size,
            chunk_overlap: settings.chunk_overlap,
        }
    }
}
