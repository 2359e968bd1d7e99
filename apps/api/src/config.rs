use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 120;
const DEFAULT_GITHUB_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Read once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub openrouter_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on the single model call. Expiry surfaces as a transport error.
    pub model_timeout: Duration,
    pub github_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openrouter_api_key: require_env("OPENROUTER_API_KEY")?,
            port: parse_env("PORT", DEFAULT_PORT)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            model_timeout: Duration::from_secs(parse_env(
                "MODEL_TIMEOUT_SECS",
                DEFAULT_MODEL_TIMEOUT_SECS,
            )?),
            github_timeout: Duration::from_secs(parse_env(
                "GITHUB_TIMEOUT_SECS",
                DEFAULT_GITHUB_TIMEOUT_SECS,
            )?),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
