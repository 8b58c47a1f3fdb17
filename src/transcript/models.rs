//! Data models for transcripts.

use serde::{Deserialize, Serialize};

/// Canonical short URL for a YouTube video.
pub fn canonical_url(video_id: &str) -> String {
    format!("https://youtu.be/{}", video_id)
}

/// Metadata about the video a transcript belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoMetadata {
    /// YouTube video ID.
    pub id: String,
    /// Video title, when the service reported one.
    pub title: Option<String>,
    /// Channel or author name.
    pub author: Option<String>,
    /// Canonical video URL.
    pub url: String,
}

impl VideoMetadata {
    /// Metadata carrying only the ID and URL.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: None,
            author: None,
            url: canonical_url(id),
        }
    }
}

/// A single caption segment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptSegment {
    /// Caption text.
    pub text: String,
    /// Start time in seconds.
    pub start_seconds: f64,
    /// Display duration in seconds.
    pub duration_seconds: f64,
}

impl TranscriptSegment {
    /// Create a new transcript segment.
    pub fn new(text: impl Into<String>, start_seconds: f64, duration_seconds: f64) -> Self {
        Self {
            text: text.into(),
            start_seconds,
            duration_seconds,
        }
    }
}

/// A fetched transcript with its video metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub metadata: VideoMetadata,
    /// Language code of the caption track that was used.
    pub language: String,
    /// Segments in playback order.
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Create a new transcript.
    pub fn new(metadata: VideoMetadata, language: &str, segments: Vec<TranscriptSegment>) -> Self {
        Self {
            metadata,
            language: language.to_string(),
            segments,
        }
    }

    /// All segment texts joined by a single space, in order.
    pub fn full_text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Title if present, otherwise the video ID.
    pub fn display_name(&self) -> &str {
        self.metadata
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.metadata.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_text_preserves_order() {
        let transcript = Transcript::new(
            VideoMetadata::new("abc123"),
            "en",
            vec![
                TranscriptSegment::new("Hello world", 0.0, 2.0),
                TranscriptSegment::new("this is a test", 2.0, 3.5),
            ],
        );

        assert_eq!(transcript.full_text(), "Hello world this is a test");
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let mut transcript = Transcript::new(VideoMetadata::new("abc123"), "en", Vec::new());
        assert_eq!(transcript.display_name(), "abc123");

        transcript.metadata.title = Some("   ".to_string());
        assert_eq!(transcript.display_name(), "abc123");

        transcript.metadata.title = Some("Rust in 100 Seconds".to_string());
        assert_eq!(transcript.display_name(), "Rust in 100 Seconds");
    }

    #[test]
    fn test_canonical_url() {
        assert_eq!(VideoMetadata::new("dQw4w9WgXcQ").url, "https://youtu.be/dQw4w9WgXcQ");
    }
}
