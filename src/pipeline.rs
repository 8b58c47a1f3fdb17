//! Pipeline for Recap.
//!
//! Runs one video through fetch, split, summarize, optional flashcards and
//! write, strictly in that order. Nothing is written unless every model call
//! succeeded.

use crate::chunking::{ChunkingConfig, RecursiveCharacterSplitter};
use crate::config::{Prompts, Settings};
use crate::error::Result;
use crate::llm::{ChatModel, OpenAIChatModel};
use crate::storage::{compose_document, MarkdownWriter};
use crate::summary::{FlashcardGenerator, Summarizer};
use crate::transcript::{TranscriptLanguage, TranscriptSource, YoutubeTranscriptSource};
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// Inputs for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub video_id: String,
    pub language: TranscriptLanguage,
    /// Whether to generate flashcards after the summary.
    pub flashcards: bool,
}

/// Result of a completed run.
#[derive(Debug)]
pub struct RunResult {
    /// Path of the written Markdown file.
    pub path: PathBuf,
    /// Video title, if the transcript service reported one.
    pub title: Option<String>,
    /// Number of transcript segments fetched.
    pub segments: usize,
    /// Number of chunks sent to the model.
    pub chunks: usize,
    /// Whether a flashcard section was appended.
    pub flashcards: bool,
}

/// The summarization pipeline.
pub struct Pipeline {
    source: Arc<dyn TranscriptSource>,
    splitter: RecursiveCharacterSplitter,
    summarizer: Summarizer,
    flashcards: FlashcardGenerator,
    writer: MarkdownWriter,
    progress: Option<ProgressBar>,
}

impl Pipeline {
    /// Create a pipeline backed by YouTube and OpenAI.
    pub fn new(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let source = Arc::new(YoutubeTranscriptSource::new(Duration::from_secs(
            settings.transcript.timeout_secs,
        ))?);
        let model: Arc<dyn ChatModel> = Arc::new(OpenAIChatModel::from_settings(&settings.llm)?);
        info!("Using model {}", model.model_name());

        Self::with_components(
            source,
            model,
            prompts,
            ChunkingConfig::from(&settings.chunking),
            MarkdownWriter::new(settings.output_dir()),
        )
    }

    /// Create a pipeline with custom components.
    pub fn with_components(
        source: Arc<dyn TranscriptSource>,
        model: Arc<dyn ChatModel>,
        prompts: Prompts,
        chunking: ChunkingConfig,
        writer: MarkdownWriter,
    ) -> Result<Self> {
        Ok(Self {
            source,
            splitter: RecursiveCharacterSplitter::new(&chunking)?,
            summarizer: Summarizer::new(model.clone()).with_prompts(prompts.clone()),
            flashcards: FlashcardGenerator::new(model).with_prompts(prompts),
            writer,
            progress: None,
        })
    }

    /// Report step changes on a progress spinner.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    fn report(&self, message: &str) {
        if let Some(progress) = &self.progress {
            progress.set_message(message.to_string());
        }
    }

    /// Run the pipeline for one video.
    #[instrument(skip(self), fields(video_id = %request.video_id))]
    pub async fn run(&self, request: &RunRequest) -> Result<RunResult> {
        self.report(&format!("Fetching transcript for {}...", request.video_id));
        let transcript = self.source.fetch(&request.video_id, request.language).await?;
        if let Some(title) = &transcript.metadata.title {
            self.report(&format!("Title: {}", title));
        }

        self.report(&format!("Splitting {} segments...", transcript.segments.len()));
        let chunks = self.splitter.split_transcript(&transcript);
        info!("Created {} chunks", chunks.len());

        self.report(&format!("Summarizing {} chunks...", chunks.len()));
        let summary = self.summarizer.summarize(&chunks).await?;

        let cards = if request.flashcards {
            self.report("Generating flashcards...");
            Some(self.flashcards.generate(&summary).await?)
        } else {
            None
        };

        let document = compose_document(&summary, cards.as_deref());
        let path = self.writer.save(transcript.display_name(), &document).await?;

        Ok(RunResult {
            path,
            title: transcript.metadata.title.clone(),
            segments: transcript.segments.len(),
            chunks: chunks.len(),
            flashcards: cards.is_some(),
        })
    }
}
