//! CLI module for Recap.

mod output;
pub mod preflight;
pub mod prompt;

pub use output::Output;
pub use prompt::PromptCollector;

use clap::Parser;

/// Recap - YouTube transcript summaries
///
/// Fetches a video transcript, summarizes it into Markdown with an LLM and
/// optionally appends flashcards. The video ID, flashcards choice and
/// transcript language are asked for interactively.
#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Tracing filter directive for the `recap` target.
///
/// Each `-v` raises the level from `info` to `trace`; without one the
/// configured level is used.
pub fn log_filter(verbose: u8, configured: &str) -> String {
    let level = match verbose {
        0 => configured.to_lowercase(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    format!("recap={}", level)
}
