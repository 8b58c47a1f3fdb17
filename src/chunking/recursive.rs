//! Recursive character splitting.
//!
//! Splits on the coarsest separator present in the text, recurses into
//! pieces that are still too long, then greedily packs pieces into chunks
//! while carrying a bounded tail of the previous chunk into the next one.

use super::{ChunkingConfig, ContentChunk};
use crate::error::{RecapError, Result};
use crate::transcript::Transcript;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Separators tried from coarsest to finest. The empty separator splits
/// into single characters.
pub const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Character-based recursive text splitter.
#[derive(Debug, Clone)]
pub struct RecursiveCharacterSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<String>,
}

impl RecursiveCharacterSplitter {
    /// Create a splitter with the default separators.
    pub fn new(config: &ChunkingConfig) -> Result<Self> {
        if config.chunk_size == 0 {
            return Err(RecapError::Chunking("chunk size must be positive".to_string()));
        }
        if config.chunk_overlap >= config.chunk_size {
            return Err(RecapError::Chunking(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                config.chunk_overlap, config.chunk_size
            )));
        }

        Ok(Self {
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Split a transcript into ordered chunks.
    pub fn split_transcript(&self, transcript: &Transcript) -> Vec<ContentChunk> {
        let chunks: Vec<ContentChunk> = self
            .split_text(&transcript.full_text())
            .into_iter()
            .enumerate()
            .map(|(order, content)| ContentChunk::new(content, order))
            .collect();

        debug!(
            "Split {} segments into {} chunks",
            transcript.segments.len(),
            chunks.len()
        );
        chunks
    }

    /// Split text into chunks of at most `chunk_size` characters.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_recursive(text, &self.separators)
    }

    fn split_recursive(&self, text: &str, separators: &[String]) -> Vec<String> {
        let mut final_chunks = Vec::new();

        // Coarsest separator present in the text; finer ones are kept for recursion.
        let mut separator = separators.last().map(String::as_str).unwrap_or("");
        let mut finer: &[String] = &[];
        for (i, candidate) in separators.iter().enumerate() {
            if candidate.is_empty() {
                separator = "";
                break;
            }
            if text.contains(candidate.as_str()) {
                separator = candidate;
                finer = &separators[i + 1..];
                break;
            }
        }

        let splits = split_keeping_separator(text, separator);

        let mut good_splits: Vec<&str> = Vec::new();
        for piece in splits {
            if char_len(piece) < self.chunk_size {
                good_splits.push(piece);
                continue;
            }

            if !good_splits.is_empty() {
                final_chunks.extend(self.merge_splits(&good_splits));
                good_splits.clear();
            }

            if finer.is_empty() {
                final_chunks.push(piece.to_string());
            } else {
                final_chunks.extend(self.split_recursive(piece, finer));
            }
        }

        if !good_splits.is_empty() {
            final_chunks.extend(self.merge_splits(&good_splits));
        }

        final_chunks
    }

    /// Pack pieces into chunks. Separators are already attached to the
    /// pieces, so they are joined without one.
    fn merge_splits(&self, splits: &[&str]) -> Vec<String> {
        let mut docs = Vec::new();
        let mut window: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for &piece in splits {
            let len = char_len(piece);

            if total + len > self.chunk_size {
                if total > self.chunk_size {
                    warn!(
                        "Created a chunk of size {}, which is longer than the specified {}",
                        total, self.chunk_size
                    );
                }

                if !window.is_empty() {
                    if let Some(doc) = join_window(&window) {
                        docs.push(doc);
                    }

                    // Keep at most `chunk_overlap` characters, and make room for the next piece.
                    while let Some(front) = window.front() {
                        if total <= self.chunk_overlap && total + len <= self.chunk_size {
                            break;
                        }
                        total = total.saturating_sub(char_len(front));
                        window.pop_front();
                    }
                }
            }

            window.push_back(piece);
            total += len;
        }

        if let Some(doc) = join_window(&window) {
            docs.push(doc);
        }

        docs
    }
}

/// Split at every occurrence of `separator`, keeping it at the start of the
/// following piece. Empty pieces are dropped.
fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return text
            .char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect();
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    for (index, _) in text.match_indices(separator) {
        if index > start {
            pieces.push(&text[start..index]);
        }
        start = index;
    }
    if start < text.len() {
        pieces.push(&text[start..]);
    }

    pieces.into_iter().filter(|p| !p.is_empty()).collect()
}

fn join_window(window: &VecDeque<&str>) -> Option<String> {
    let joined: String = window.iter().copied().collect();
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{TranscriptSegment, VideoMetadata};

    fn splitter(chunk_size: usize, chunk_overlap: usize) -> RecursiveCharacterSplitter {
        RecursiveCharacterSplitter::new(&ChunkingConfig {
            chunk_size,
            chunk_overlap,
        })
        .unwrap()
    }

    /// Longest prefix of `next` that `prev` ends with.
    fn overlap_len(prev: &str, next: &str) -> usize {
        (1..=next.len().min(prev.len()))
            .rev()
            .find(|&k| next.is_char_boundary(k) && prev.ends_with(&next[..k]))
            .unwrap_or(0)
    }

    #[test]
    fn test_split_keeping_separator() {
        assert_eq!(split_keeping_separator("a b  c", " "), vec!["a", " b", " ", " c"]);
        assert_eq!(split_keeping_separator("ab", ""), vec!["a", "b"]);
        assert_eq!(split_keeping_separator("x\n\ny", "\n\n"), vec!["x", "\n\ny"]);
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunks = splitter(500, 50).split_text("  a short transcript  ");
        assert_eq!(chunks, vec!["a short transcript".to_string()]);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(splitter(500, 50).split_text("").is_empty());
        assert!(splitter(500, 50).split_text("   ").is_empty());
    }

    #[test]
    fn test_chunks_are_bounded_and_overlap() {
        let words: Vec<String> = (0..200).map(|i| format!("word{:04}", i)).collect();
        let text = words.join(" ");

        let chunks = splitter(500, 50).split_text(&text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 500, "chunk too long: {}", chunk.len());
        }
        for pair in chunks.windows(2) {
            let overlap = overlap_len(&pair[0], &pair[1]);
            assert!(overlap > 0, "consecutive chunks should overlap");
            assert!(overlap <= 50, "overlap {} exceeds 50", overlap);
        }

        // Order is preserved: the first chunk starts the text and the last ends it.
        assert!(chunks[0].starts_with("word0000"));
        assert!(chunks.last().unwrap().ends_with("word0199"));
    }

    #[test]
    fn test_first_chunk_packs_to_limit() {
        let words: Vec<String> = (0..200).map(|i| format!("word{:04}", i)).collect();
        let chunks = splitter(500, 50).split_text(&words.join(" "));

        // 55 words of 8 chars plus 54 spaces.
        assert_eq!(chunks[0].len(), 494);
        assert!(chunks[1].starts_with("word0050"));
    }

    #[test]
    fn test_long_word_falls_back_to_characters() {
        let text = "x".repeat(1200);
        let chunks = splitter(500, 50).split_text(&text);

        assert!(chunks.iter().all(|c| c.chars().count() <= 500));
        let total: usize = chunks.iter().map(|c| c.len()).sum();
        assert!(total >= 1200);
    }

    #[test]
    fn test_paragraphs_split_first() {
        let text = format!("{}\n\n{}", "a ".repeat(100).trim(), "b ".repeat(100).trim());
        let chunks = splitter(250, 20).split_text(&text);

        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].chars().all(|c| c == 'a' || c == ' '));
        assert!(chunks[1].chars().all(|c| c == 'b' || c == ' '));
    }

    #[test]
    fn test_multibyte_lengths_use_characters() {
        let text = "é".repeat(30);
        let chunks = splitter(10, 2).split_text(&text);
        assert!(chunks.iter().all(|c| c.chars().count() <= 10));
    }

    #[test]
    fn test_split_transcript_numbers_chunks() {
        let segments = (0..120)
            .map(|i| TranscriptSegment::new(format!("segment number {:03} text", i), i as f64, 1.0))
            .collect();
        let transcript = Transcript::new(VideoMetadata::new("abc123"), "en", segments);

        let chunks = splitter(500, 50).split_transcript(&transcript);
        assert!(chunks.len() > 1);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.order, i);
        }
        assert!(chunks[0].content.starts_with("segment number 000"));
    }

    #[test]
    fn test_rejects_overlap_not_smaller_than_size() {
        let result = RecursiveCharacterSplitter::new(&ChunkingConfig {
            chunk_size: 50,
            chunk_overlap: 50,
        });
        assert!(matches!(result, Err(RecapError::Chunking(_))));
    }
}
