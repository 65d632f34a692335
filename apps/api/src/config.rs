use std::str::FromStr;

use anyhow::{Context, Result};

use crate::review::ReviewLimits;

/// Application configuration loaded from environment variables.
/// Every variable is optional; unparsable values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Enables the generated-review path when set.
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    /// Selects the shared Redis throttle instead of the in-process one.
    pub redis_url: Option<String>,
    pub throttle_max_requests: u32,
    pub throttle_window_secs: u64,
    pub min_text_chars: usize,
    pub max_text_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            openai_api_key: None,
            openai_model: crate::llm_client::DEFAULT_MODEL.to_string(),
            redis_url: None,
            throttle_max_requests: 20,
            throttle_window_secs: 60,
            min_text_chars: 200,
            max_text_chars: 25_000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let config = Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_model: optional_env("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            redis_url: optional_env("REDIS_URL"),
            throttle_max_requests: parse_env(
                "THROTTLE_MAX_REQUESTS",
                defaults.throttle_max_requests,
            )?,
            throttle_window_secs: parse_env("THROTTLE_WINDOW_SECS", defaults.throttle_window_secs)?,
            min_text_chars: parse_env("MIN_TEXT_CHARS", defaults.min_text_chars)?,
            max_text_chars: parse_env("MAX_TEXT_CHARS", defaults.max_text_chars)?,
        };

        anyhow::ensure!(
            config.min_text_chars <= config.max_text_chars,
            "MIN_TEXT_CHARS ({}) must not exceed MAX_TEXT_CHARS ({})",
            config.min_text_chars,
            config.max_text_chars
        );

        Ok(config)
    }

    pub fn limits(&self) -> ReviewLimits {
        ReviewLimits {
            min_chars: self.min_text_chars,
            max_chars: self.max_text_chars,
        }
    }
}

/// Reads a variable, treating unset and blank values the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
