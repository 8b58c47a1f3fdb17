//! Interactive prompts for a run.
//!
//! Reads the video ID, the flashcards opt-in and the transcript language,
//! one line each, without re-prompting on bad input.

use crate::error::{RecapError, Result};
use crate::pipeline::RunRequest;
use crate::transcript::TranscriptLanguage;
use console::style;
use regex::Regex;
use std::sync::OnceLock;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// `true` only for an affirmative answer (`y` or `yes`, any case).
pub fn parse_flashcards_answer(answer: &str) -> bool {
    static AFFIRMATIVE: OnceLock<Regex> = OnceLock::new();
    AFFIRMATIVE
        .get_or_init(|| Regex::new(r"(?i)^(y|yes)$").expect("affirmative pattern is valid"))
        .is_match(answer.trim())
}

/// Outcome of reading the language answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageChoice {
    pub language: TranscriptLanguage,
    /// Set when the answer was not recognized and the default was used.
    pub warning: Option<String>,
}

/// Resolve the language answer. Empty means `default`; unknown values
/// fall back to English with a warning.
pub fn parse_language(answer: &str, default: TranscriptLanguage) -> LanguageChoice {
    let answer = answer.trim();
    if answer.is_empty() {
        return LanguageChoice {
            language: default,
            warning: None,
        };
    }

    match answer.parse::<TranscriptLanguage>() {
        Ok(language) => LanguageChoice {
            language,
            warning: None,
        },
        Err(_) => LanguageChoice {
            language: TranscriptLanguage::English,
            warning: Some(format!(
                "Unrecognized language '{}', using {}",
                answer,
                TranscriptLanguage::English
            )),
        },
    }
}

/// Collects run inputs from a line-oriented reader.
pub struct PromptCollector<R, W> {
    reader: R,
    writer: W,
    default_language: TranscriptLanguage,
}

impl<R, W> PromptCollector<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            default_language: TranscriptLanguage::default(),
        }
    }

    /// Language used when the answer is left empty.
    pub fn with_default_language(mut self, language: TranscriptLanguage) -> Self {
        self.default_language = language;
        self
    }

    async fn ask(&mut self, question: &str) -> Result<String> {
        self.writer.write_all(question.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        self.reader.read_line(&mut line).await?;
        Ok(line.trim().to_string())
    }

    /// Ask for the video ID. An empty answer is an error.
    pub async fn ask_video_id(&mut self) -> Result<String> {
        let id = self.ask(&format!("{} Enter YouTube video ID: ", style(">>").cyan().bold())).await?;
        if id.is_empty() {
            return Err(RecapError::InvalidInput("a video ID is required".to_string()));
        }
        Ok(id)
    }

    pub async fn ask_flashcards(&mut self) -> Result<bool> {
        let answer = self
            .ask(&format!("{} Generate flashcards? (y/N): ", style(">>").cyan().bold()))
            .await?;
        Ok(parse_flashcards_answer(&answer))
    }

    pub async fn ask_language(&mut self) -> Result<TranscriptLanguage> {
        let answer = self
            .ask(&format!(
                "{} Transcript language [en, pt-BR] ({}): ",
                style(">>").cyan().bold(),
                self.default_language
            ))
            .await?;

        let choice = parse_language(&answer, self.default_language);
        if let Some(message) = &choice.warning {
            debug!("{}", message);
            let line = format!("{} {}\n", style(">>").yellow().bold(), message);
            self.writer.write_all(line.as_bytes()).await?;
            self.writer.flush().await?;
        }
        Ok(choice.language)
    }

    /// Ask all three questions in order.
    pub async fn collect(&mut self) -> Result<RunRequest> {
        let video_id = self.ask_video_id().await?;
        let flashcards = self.ask_flashcards().await?;
        let language = self.ask_language().await?;

        Ok(RunRequest {
            video_id,
            language,
            flashcards,
        })
    }

    /// Consume the collector, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector(input: &'static str) -> PromptCollector<&'static [u8], Vec<u8>> {
        PromptCollector::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn test_affirmative_answers() {
        for answer in ["y", "Y", "yes", "YES", "Yes", " y "] {
            assert!(parse_flashcards_answer(answer), "{answer:?} should be affirmative");
        }
    }

    #[test]
    fn test_non_affirmative_answers() {
        for answer in ["", "n", "no", "yep", "yess", "sure", "y y"] {
            assert!(!parse_flashcards_answer(answer), "{answer:?} should be negative");
        }
    }

    #[test]
    fn test_language_resolution() {
        for answer in ["en", "EN", ""] {
            let choice = parse_language(answer, TranscriptLanguage::English);
            assert_eq!(choice.language, TranscriptLanguage::English);
            assert!(choice.warning.is_none());
        }
        for answer in ["pt-BR", "pt-br", "ptbr", "pt"] {
            let choice = parse_language(answer, TranscriptLanguage::English);
            assert_eq!(choice.language, TranscriptLanguage::BrazilianPortuguese);
            assert!(choice.warning.is_none());
        }
    }

    #[test]
    fn test_unknown_language_warns() {
        let choice = parse_language("fr", TranscriptLanguage::BrazilianPortuguese);
        assert_eq!(choice.language, TranscriptLanguage::English);
        assert!(choice.warning.unwrap().contains("fr"));
    }

    #[test]
    fn test_empty_language_uses_default() {
        let choice = parse_language("  ", TranscriptLanguage::BrazilianPortuguese);
        assert_eq!(choice.language, TranscriptLanguage::BrazilianPortuguese);
    }

    #[tokio::test]
    async fn test_collect_defaults() {
        let mut prompts = collector("  abc123  \n\n\n");
        let request = prompts.collect().await.unwrap();

        assert_eq!(request.video_id, "abc123");
        assert!(!request.flashcards);
        assert_eq!(request.language, TranscriptLanguage::English);
    }

    #[tokio::test]
    async fn test_collect_flashcards_and_portuguese() {
        let mut prompts = collector("abc123\nyes\npt-br\n");
        let request = prompts.collect().await.unwrap();

        assert!(request.flashcards);
        assert_eq!(request.language, TranscriptLanguage::BrazilianPortuguese);
    }

    #[tokio::test]
    async fn test_unknown_language_is_reported() {
        let mut prompts = collector("abc123\nn\nklingon\n");
        let request = prompts.collect().await.unwrap();
        assert_eq!(request.language, TranscriptLanguage::English);

        let output = String::from_utf8(prompts.into_writer()).unwrap();
        assert_eq!(output.matches("Unrecognized language 'klingon'").count(), 1);
    }

    #[tokio::test]
    async fn test_missing_video_id_is_an_error() {
        let mut prompts = collector("\n");
        assert!(matches!(
            prompts.collect().await,
            Err(RecapError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_end_of_input_uses_defaults() {
        let mut prompts = collector("abc123");
        let request = prompts.collect().await.unwrap();
        assert!(!request.flashcards);
        assert_eq!(request.language, TranscriptLanguage::English);
    }
}
