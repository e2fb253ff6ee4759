//! Error types for the video rater

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid video URL: {0}")]
    InvalidUrl(String),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Quota exceeded: {0}")]
    Quota(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sentiment scoring failed for comment {index}: {reason}")]
    Sentiment { index: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
