//! Video platform collaborators
//!
//! This module provides the data sources the analyzer depends on:
//! - Metadata provider: title and public counters for a video
//! - Comment provider: top-level comment texts
//! - Identifier extraction from a watch/share URL
//!
//! Both providers are traits so the analyzer can run against the YouTube
//! Data API or against in-memory fakes.

mod youtube;
mod url;
pub mod mock;

pub use url::extract_video_id;
pub use youtube::YouTubeClient;

use crate::error::{AnalyzerError, Result};
use crate::types::{CommentSet, VideoMetadata};
use async_trait::async_trait;
use thiserror::Error;

/// Hard cap on comments per analysis (one API page)
pub const MAX_COMMENTS: u32 = 100;

/// Source of video metadata
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch metadata, `Ok(None)` when the platform has no such video
    async fn fetch_metadata(&self, video_id: &str) -> Result<Option<VideoMetadata>>;
}

/// Source of top-level comments
#[async_trait]
pub trait CommentProvider: Send + Sync {
    /// Fetch up to `max` comments. Failures are returned, never swallowed;
    /// the caller decides whether to degrade to an empty set.
    async fn fetch_comments(
        &self,
        video_id: &str,
        max: u32,
    ) -> std::result::Result<CommentSet, CommentFetchError>;
}

/// Why a comment fetch failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommentFetchError {
    #[error("comments are disabled for this video")]
    Disabled,

    #[error("video not found")]
    NotFound,

    #[error("comments not accessible: {0}")]
    Restricted(String),

    #[error("quota exceeded: {0}")]
    Quota(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("network failure: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("server error: {0}")]
    Server(String),
}

impl CommentFetchError {
    /// Whether analysis can continue with an empty comment set.
    ///
    /// Quota and auth failures also break every later request, so they are
    /// surfaced instead of hidden behind a neutral sentiment.
    pub fn is_degradable(&self) -> bool {
        !matches!(self, CommentFetchError::Quota(_) | CommentFetchError::Auth(_))
    }
}

impl From<CommentFetchError> for AnalyzerError {
    fn from(err: CommentFetchError) -> Self {
        match err {
            CommentFetchError::Quota(msg) => AnalyzerError::Quota(msg),
            CommentFetchError::Auth(msg) => AnalyzerError::Auth(msg),
            other => AnalyzerError::Api(other.to_string()),
        }
    }
}
