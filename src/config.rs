//! Configuration management

use crate::client::MAX_COMMENTS;
use crate::error::{AnalyzerError, Result};
use crate::sentiment::FailurePolicy;
use serde::Deserialize;
use std::path::Path;

/// Environment variable the API key is read from when no config sets it
pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub youtube: YouTubeConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YouTubeConfig {
    /// Data API v3 key
    #[serde(default)]
    pub api_key: String,
    /// API endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Comments fetched per video (capped at 100)
    #[serde(default = "default_max_comments")]
    pub max_comments: u32,
    /// How unscorable comments are handled
    #[serde(default)]
    pub sentiment_failure_policy: FailurePolicy,
}

fn default_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_comments() -> u32 {
    MAX_COMMENTS
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_comments: default_max_comments(),
            sentiment_failure_policy: FailurePolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, overlaid with `RATER_*` environment
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("RATER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut config: Config = settings.try_deserialize()?;
        config.apply_env_key();
        config.validate()?;
        Ok(config)
    }

    /// Load from default locations, falling back to defaults plus environment
    pub fn load_default() -> anyhow::Result<Self> {
        let paths = ["config.toml", "~/.config/study-video-rater/config.toml"];

        for path in paths {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                return Self::load(expanded.as_ref());
            }
        }

        tracing::debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        config.apply_env_key();
        config.validate()?;
        Ok(config)
    }

    /// Fill the API key from `YOUTUBE_API_KEY` when the config left it blank
    fn apply_env_key(&mut self) {
        if self.youtube.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                self.youtube.api_key = key;
            }
        }
    }

    /// Reject values the analyzer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.analysis.max_comments == 0 || self.analysis.max_comments > MAX_COMMENTS {
            return Err(AnalyzerError::Config(format!(
                "analysis.max_comments must be within 1..={}, got {}",
                MAX_COMMENTS, self.analysis.max_comments
            )));
        }
        if self.youtube.timeout_secs == 0 {
            return Err(AnalyzerError::Config(
                "youtube.timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// API key, or a configuration error naming where to set it
    pub fn require_api_key(&self) -> Result<&str> {
        let key = self.youtube.api_key.trim();
        if key.is_empty() {
            return Err(AnalyzerError::Config(format!(
                "{} not found; set it in the environment or youtube.api_key",
                API_KEY_ENV
            )));
        }
        Ok(key)
    }
}
