//! Recap - YouTube transcript summaries
//!
//! A CLI tool that turns a YouTube video's transcript into Markdown notes,
//! with optional flashcards, using a hosted language model.
//!
//! # Architecture
//!
//! - `cli` - Interactive prompts, pre-flight checks and terminal output
//! - `config` - Settings and prompt templates
//! - `transcript` - Transcript retrieval (YouTube caption tracks)
//! - `chunking` - Recursive character splitting
//! - `llm` - Chat model abstraction and the OpenAI implementation
//! - `summary` - Summary and flashcard generation
//! - `storage` - Markdown file output
//! - `pipeline` - Runs the steps in order
//!
//! # Example
//!
//! ```rust,no_run
//! use recap::config::Settings;
//! use recap::pipeline::{Pipeline, RunRequest};
//! use recap::transcript::TranscriptLanguage;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(&settings)?;
//!
//!     let request = RunRequest {
//!         video_id: "dQw4w9WgXcQ".to_string(),
//!         language: TranscriptLanguage::English,
//!         flashcards: true,
//!     };
//!     let result = pipeline.run(&request).await?;
//!     println!("Saved to {}", result.path.display());
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod openai;
pub mod pipeline;
pub mod storage;
pub mod summary;
pub mod transcript;

pub use error::{RecapError, Result};
