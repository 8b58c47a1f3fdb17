//! Pre-flight checks before any network call.
//!
//! Fails fast when the model credential is missing instead of after the
//! transcript has already been downloaded.

use crate::error::{RecapError, Result};

/// Environment variable holding the OpenAI API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Check that the OpenAI API key is configured.
pub fn check_api_key() -> Result<()> {
    validate_api_key(std::env::var(API_KEY_ENV).ok().as_deref())
}

fn validate_api_key(value: Option<&str>) -> Result<()> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(()),
        Some(_) => Err(RecapError::Config(format!(
            "{} is empty. Set it in .env or with: export {}='sk-...'",
            API_KEY_ENV, API_KEY_ENV
        ))),
        None => Err(RecapError::Config(format!(
            "{} not set. Set it in .env or with: export {}='sk-...'",
            API_KEY_ENV, API_KEY_ENV
        ))),
    }
}
