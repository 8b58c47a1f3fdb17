//! Transcript retrieval for Recap.
//!
//! Provides a trait-based interface over transcript services so the pipeline
//! can be driven by YouTube in production and by stubs in tests.

mod models;
mod youtube;

pub use models::{canonical_url, Transcript, TranscriptSegment, VideoMetadata};
pub use youtube::YoutubeTranscriptSource;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Transcript languages the tool accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TranscriptLanguage {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "pt-BR")]
    BrazilianPortuguese,
}

impl TranscriptLanguage {
    /// Language code as used by caption tracks.
    pub fn code(&self) -> &'static str {
        match self {
            TranscriptLanguage::English => "en",
            TranscriptLanguage::BrazilianPortuguese => "pt-BR",
        }
    }
}

impl std::str::FromStr for TranscriptLanguage {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(TranscriptLanguage::English),
            "pt-br" | "ptbr" | "pt" => Ok(TranscriptLanguage::BrazilianPortuguese),
            _ => Err(format!("Unknown transcript language: {}", s)),
        }
    }
}

impl std::fmt::Display for TranscriptLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript of a video in the requested language.
    async fn fetch(&self, video_id: &str, language: TranscriptLanguage) -> Result<Transcript>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_str() {
        for input in ["en", "EN", " en "] {
            assert_eq!(input.parse::<TranscriptLanguage>(), Ok(TranscriptLanguage::English));
        }
        for input in ["pt-BR", "pt-br", "ptbr", "pt", "PT"] {
            assert_eq!(
                input.parse::<TranscriptLanguage>(),
                Ok(TranscriptLanguage::BrazilianPortuguese)
            );
        }
        assert!("fr".parse::<TranscriptLanguage>().is_err());
    }

    #[test]
    fn test_language_code() {
        assert_eq!(TranscriptLanguage::English.to_string(), "en");
        assert_eq!(TranscriptLanguage::BrazilianPortuguese.to_string(), "pt-BR");
    }
}
