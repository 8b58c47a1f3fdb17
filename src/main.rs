//! Recap CLI entry point.

use anyhow::Result;
use clap::Parser;
use recap::cli::{log_filter, preflight, Cli, Output, PromptCollector};
use recap::config::Settings;
use recap::pipeline::Pipeline;
use recap::transcript::TranscriptLanguage;
use tokio::io::BufReader;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        Output::error(&format!("Unexpected error: {:#}", e));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env before anything reads the environment
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| {
            log_filter(cli.verbose, &settings.general.log_level)
        })))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!("Failed to load .env file: {}", e);
        }
    }

    preflight::check_api_key()?;

    let default_language = settings
        .transcript
        .language
        .parse::<TranscriptLanguage>()
        .unwrap_or_else(|e| {
            Output::warning(&format!("{}, defaulting to {}", e, TranscriptLanguage::English));
            TranscriptLanguage::English
        });

    let mut prompts = PromptCollector::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .with_default_language(default_language);
    let request = prompts.collect().await?;

    let pipeline = Pipeline::new(&settings)?;

    Output::info(&format!(
        "Summarizing {} ({}{})",
        request.video_id,
        request.language,
        if request.flashcards { ", with flashcards" } else { "" }
    ));

    let spinner = Output::spinner("Starting...");
    let result = pipeline.with_progress(spinner.clone()).run(&request).await;
    spinner.finish_and_clear();
    let result = result?;

    Output::success(&format!("Summary saved to {}", result.path.display()));
    if let Some(title) = &result.title {
        Output::kv("Title", title);
    }
    Output::kv("Segments", &result.segments.to_string());
    Output::kv("Chunks", &result.chunks.to_string());
    Output::kv("Flashcards", if result.flashcards { "yes" } else { "no" });

    Ok(())
}
