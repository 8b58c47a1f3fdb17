//! Markdown persistence for summaries.
//!
//! Each run writes one file, `<output_dir>/<name>-<timestamp>.md`, and never
//! touches it again.

use crate::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::PathBuf;
use tracing::info;

/// Characters that are not allowed in file names on common platforms.
pub const FORBIDDEN_FILENAME_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Heading placed above the flashcard block.
pub const FLASHCARDS_HEADING: &str = "## Flashcards";

/// Replace every forbidden file name character with `-`.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if FORBIDDEN_FILENAME_CHARS.contains(&c) { '-' } else { c })
        .collect()
}

/// ISO-8601 UTC time with `:` and `.` replaced by `-`,
/// e.g. `2025-01-02T03-04-05-678Z`.
pub fn file_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}

/// Build `<sanitized name>-<timestamp>.md`.
pub fn file_name(name: &str, time: DateTime<Utc>) -> String {
    format!("{}-{}.md", sanitize_title(name), file_timestamp(time))
}

/// Summary, followed by the flashcard section when present.
pub fn compose_document(summary: &str, flashcards: Option<&str>) -> String {
    match flashcards {
        Some(cards) => format!("{}\n\n{}\n\n{}", summary, FLASHCARDS_HEADING, cards),
        None => summary.to_string(),
    }
}

/// Writes Markdown documents into an output directory.
#[derive(Debug, Clone)]
pub struct MarkdownWriter {
    output_dir: PathBuf,
}

impl MarkdownWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write `content` under a timestamped name derived from `name`.
    pub async fn save(&self, name: &str, content: &str) -> Result<PathBuf> {
        self.save_at(name, content, Utc::now()).await
    }

    /// Like [`save`](Self::save) with an explicit timestamp.
    pub async fn save_at(&self, name: &str, content: &str, time: DateTime<Utc>) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        let path = self.output_dir.join(file_name(name, time));
        tokio::fs::write(&path, content).await?;

        info!("Saved summary to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap() + chrono::Duration::milliseconds(678)
    }

    #[test]
    fn test_sanitize_title() {
        assert_eq!(
            sanitize_title(r#"a/b\c:d*e?f"g<h>i|j"#),
            "a-b-c-d-e-f-g-h-i-j"
        );
        assert_eq!(sanitize_title("Plain title"), "Plain title");
    }

    #[test]
    fn test_file_timestamp() {
        assert_eq!(file_timestamp(fixed_time()), "2025-01-02T03-04-05-678Z");
    }

    #[test]
    fn test_file_name_has_no_forbidden_chars() {
        let name = file_name(r#"What is "Rust"? A/B: <intro> | part*1\2"#, fixed_time());

        assert!(name.ends_with("-2025-01-02T03-04-05-678Z.md"));
        assert!(!name.contains(FORBIDDEN_FILENAME_CHARS));
    }

    #[test]
    fn test_compose_document() {
        assert_eq!(compose_document("# Summary", None), "# Summary");
        assert_eq!(
            compose_document("# Summary", Some("Q\n?\nA\n---")),
            "# Summary\n\n## Flashcards\n\nQ\n?\nA\n---"
        );
    }

    #[tokio::test]
    async fn test_save_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let writer = MarkdownWriter::new(dir.path().join("deep").join("summaries"));

        let path = writer.save_at("abc123", "# Hello", fixed_time()).await.unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "abc123-2025-01-02T03-04-05-678Z.md"
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Hello");
    }

    #[tokio::test]
    async fn test_save_fails_when_directory_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("summaries");
        std::fs::write(&blocker, "not a directory").unwrap();

        let writer = MarkdownWriter::new(&blocker);
        assert!(writer.save("abc123", "# Hello").await.is_err());
    }
}
