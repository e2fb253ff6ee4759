//! YouTube Data API v3 client
//!
//! Fetches video statistics and top-level comment threads.

use super::{CommentFetchError, CommentProvider, MetadataProvider, MAX_COMMENTS};
use crate::config::YouTubeConfig;
use crate::error::{AnalyzerError, Result};
use crate::types::{CommentSet, VideoMetadata};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// YouTube Data API client
pub struct YouTubeClient {
    http: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: VideoSnippet,
    #[serde(default)]
    statistics: VideoStatistics,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    title: String,
}

// Counters arrive as strings and are omitted when hidden by the uploader
#[derive(Debug, Default, Deserialize)]
struct VideoStatistics {
    #[serde(rename = "viewCount")]
    view_count: Option<String>,
    #[serde(rename = "likeCount")]
    like_count: Option<String>,
    #[serde(rename = "commentCount")]
    comment_count: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CommentThreadsResponse {
    #[serde(default)]
    items: Vec<CommentThread>,
}

#[derive(Debug, Deserialize)]
struct CommentThread {
    snippet: ThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThreadSnippet {
    top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
struct TopLevelComment {
    snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    text_display: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    reason: String,
}

/// Classified API failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ApiFailure {
    CommentsDisabled(String),
    NotFound,
    /// Access denied to this one resource; the key itself is fine
    Forbidden(String),
    Quota(String),
    /// Key-level failure, every request will fail the same way
    Auth(String),
    Other(String),
}

impl YouTubeClient {
    /// Create a new YouTube client
    pub fn new(config: &YouTubeConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AnalyzerError::Config("YouTube API key is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn get_text(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<(StatusCode, String), reqwest::Error> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let resp = self
            .http
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        Ok((status, body))
    }
}

#[async_trait]
impl MetadataProvider for YouTubeClient {
    async fn fetch_metadata(&self, video_id: &str) -> Result<Option<VideoMetadata>> {
        let (status, body) = self
            .get_text("videos", &[("part", "snippet,statistics"), ("id", video_id)])
            .await?;

        if !status.is_success() {
            return match classify_error(status, &body) {
                ApiFailure::NotFound => Ok(None),
                ApiFailure::Quota(msg) => Err(AnalyzerError::Quota(msg)),
                ApiFailure::Auth(msg) => Err(AnalyzerError::Auth(msg)),
                ApiFailure::CommentsDisabled(msg)
                | ApiFailure::Forbidden(msg)
                | ApiFailure::Other(msg) => Err(AnalyzerError::Api(msg)),
            };
        }

        let resp: VideosResponse = serde_json::from_str(&body)?;
        Ok(parse_metadata(resp))
    }
}

#[async_trait]
impl CommentProvider for YouTubeClient {
    async fn fetch_comments(
        &self,
        video_id: &str,
        max: u32,
    ) -> std::result::Result<CommentSet, CommentFetchError> {
        let max_results = max.min(MAX_COMMENTS).to_string();
        let (status, body) = self
            .get_text(
                "commentThreads",
                &[
                    ("part", "snippet"),
                    ("videoId", video_id),
                    ("maxResults", max_results.as_str()),
                    ("textFormat", "plainText"),
                ],
            )
            .await
            .map_err(|e| CommentFetchError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(match classify_error(status, &body) {
                ApiFailure::CommentsDisabled(_) => CommentFetchError::Disabled,
                ApiFailure::NotFound => CommentFetchError::NotFound,
                ApiFailure::Forbidden(msg) => CommentFetchError::Restricted(msg),
                ApiFailure::Quota(msg) => CommentFetchError::Quota(msg),
                ApiFailure::Auth(msg) => CommentFetchError::Auth(msg),
                ApiFailure::Other(msg) => CommentFetchError::Server(msg),
            });
        }

        let resp: CommentThreadsResponse = serde_json::from_str(&body)
            .map_err(|e| CommentFetchError::Malformed(e.to_string()))?;
        let mut comments = parse_comments(resp);
        comments.truncate(max as usize);

        tracing::debug!("Fetched {} comments for {}", comments.len(), video_id);
        Ok(comments)
    }
}

fn parse_count(raw: &Option<String>) -> u64 {
    raw.as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

/// First item of a `videos.list` response, counters defaulting to 0
pub(super) fn parse_metadata(resp: VideosResponse) -> Option<VideoMetadata> {
    let item = resp.items.into_iter().next()?;
    let stats = &item.statistics;

    Some(VideoMetadata {
        title: item.snippet.title,
        views: parse_count(&stats.view_count),
        likes: parse_count(&stats.like_count),
        comments: parse_count(&stats.comment_count),
    })
}

pub(super) fn parse_comments(resp: CommentThreadsResponse) -> CommentSet {
    resp.items
        .into_iter()
        .map(|t| t.snippet.top_level_comment.snippet.text_display)
        .collect()
}

/// Map an error response onto the failures callers care about
pub(super) fn classify_error(status: StatusCode, body: &str) -> ApiFailure {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body);
    let (message, reasons): (String, Vec<String>) = match parsed {
        Ok(env) => (
            env.error.message,
            env.error.errors.into_iter().map(|e| e.reason).collect(),
        ),
        Err(_) => (format!("HTTP {}", status), Vec::new()),
    };
    let message = if message.is_empty() {
        format!("HTTP {}", status)
    } else {
        message
    };

    for reason in &reasons {
        match reason.as_str() {
            "commentsDisabled" => return ApiFailure::CommentsDisabled(message),
            "videoNotFound" => return ApiFailure::NotFound,
            "forbidden" => return ApiFailure::Forbidden(message),
            "quotaExceeded" | "dailyLimitExceeded" | "rateLimitExceeded" => {
                return ApiFailure::Quota(message)
            }
            "keyInvalid" | "keyExpired" | "accessNotConfigured" | "ipRefererBlocked" => {
                return ApiFailure::Auth(message)
            }
            _ => {}
        }
    }

    match status {
        StatusCode::NOT_FOUND => ApiFailure::NotFound,
        StatusCode::UNAUTHORIZED => ApiFailure::Auth(message),
        StatusCode::FORBIDDEN => ApiFailure::Forbidden(message),
        StatusCode::TOO_MANY_REQUESTS => ApiFailure::Quota(message),
        _ => ApiFailure::Other(message),
    }
}
