use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Which feedback engine serves requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackBackend {
    /// Keyword heuristic only. No network calls.
    #[default]
    Heuristic,
    /// Chat-completion API, falling back to the heuristic on failure.
    Remote,
}

impl FromStr for FeedbackBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heuristic" => Ok(FeedbackBackend::Heuristic),
            "remote" => Ok(FeedbackBackend::Remote),
            other => bail!("FEEDBACK_BACKEND must be 'heuristic' or 'remote', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup on malformed values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub feedback_backend: FeedbackBackend,
    pub openai_api_key: Option<String>,
    pub openai_api_url: String,
    /// Optional JSON file replacing the built-in keyword table.
    pub knowledge_base_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let feedback_backend = match optional_env("FEEDBACK_BACKEND") {
            Some(raw) => raw.parse()?,
            None => FeedbackBackend::default(),
        };

        let openai_api_key = optional_env("OPENAI_API_KEY");
        if feedback_backend == FeedbackBackend::Remote && openai_api_key.is_none() {
            bail!("OPENAI_API_KEY is required when FEEDBACK_BACKEND=remote");
        }

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            feedback_backend,
            openai_api_key,
            openai_api_url: optional_env("OPENAI_API_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_API_URL.to_string()),
            knowledge_base_path: optional_env("KNOWLEDGE_BASE_PATH").map(PathBuf::from),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            feedback_backend: FeedbackBackend::Heuristic,
            openai_api_key: None,
            openai_api_url: DEFAULT_OPENAI_API_URL.to_string(),
            knowledge_base_path: None,
        }
    }
}

/// Unset and blank variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parses_case_insensitively() {
        assert_eq!(
            "Remote".parse::<FeedbackBackend>().unwrap(),
            FeedbackBackend::Remote
        );
        assert_eq!(
            " heuristic ".parse::<FeedbackBackend>().unwrap(),
            FeedbackBackend::Heuristic
        );
    }

    #[test]
    fn test_backend_rejects_unknown_value() {
        let err = "gpt".parse::<FeedbackBackend>().unwrap_err();
        assert!(err.to_string().contains("gpt"));
    }

    #[test]
    fn test_default_config_is_offline() {
        let config = Config::default();
        assert_eq!(config.feedback_backend, FeedbackBackend::Heuristic);
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.openai_api_url, DEFAULT_OPENAI_API_URL);
    }
}
