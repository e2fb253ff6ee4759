//! In-memory video platform for testing
//!
//! Implements both provider traits over fixed data so the analyzer can be
//! exercised without network access.

use super::{CommentFetchError, CommentProvider, MetadataProvider};
use crate::error::{AnalyzerError, Result};
use crate::types::{CommentSet, VideoMetadata};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::RwLock;

/// Scripted metadata and comment responses keyed by video id
#[derive(Default)]
pub struct MockPlatform {
    videos: RwLock<HashMap<String, VideoMetadata>>,
    comments: RwLock<HashMap<String, std::result::Result<CommentSet, CommentFetchError>>>,
    metadata_failure: RwLock<Option<String>>,
    metadata_calls: AtomicU32,
    comment_calls: AtomicU32,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a video with its comments
    pub fn with_video(self, video_id: &str, metadata: VideoMetadata, comments: &[&str]) -> Self {
        self.add_video(video_id, metadata);
        self.set_comments(video_id, Ok(comments.iter().map(|c| c.to_string()).collect()));
        self
    }

    pub fn add_video(&self, video_id: &str, metadata: VideoMetadata) {
        if let Ok(mut videos) = self.videos.write() {
            videos.insert(video_id.to_string(), metadata);
        }
    }

    /// Script the comment fetch outcome for a video
    pub fn set_comments(
        &self,
        video_id: &str,
        outcome: std::result::Result<CommentSet, CommentFetchError>,
    ) {
        if let Ok(mut comments) = self.comments.write() {
            comments.insert(video_id.to_string(), outcome);
        }
    }

    /// Make every metadata fetch fail with an API error
    pub fn fail_metadata(&self, message: &str) {
        if let Ok(mut failure) = self.metadata_failure.write() {
            *failure = Some(message.to_string());
        }
    }

    pub fn metadata_calls(&self) -> u32 {
        self.metadata_calls.load(Ordering::SeqCst)
    }

    pub fn comment_calls(&self) -> u32 {
        self.comment_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataProvider for MockPlatform {
    async fn fetch_metadata(&self, video_id: &str) -> Result<Option<VideoMetadata>> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);

        let failure = self
            .metadata_failure
            .read()
            .map_err(|_| AnalyzerError::Api("mock state poisoned".to_string()))?
            .clone();
        if let Some(message) = failure {
            return Err(AnalyzerError::Api(message));
        }

        let videos = self
            .videos
            .read()
            .map_err(|_| AnalyzerError::Api("mock state poisoned".to_string()))?;
        Ok(videos.get(video_id).cloned())
    }
}

#[async_trait]
impl CommentProvider for MockPlatform {
    async fn fetch_comments(
        &self,
        video_id: &str,
        max: u32,
    ) -> std::result::Result<CommentSet, CommentFetchError> {
        self.comment_calls.fetch_add(1, Ordering::SeqCst);

        let comments = self
            .comments
            .read()
            .map_err(|_| CommentFetchError::Malformed("mock state poisoned".to_string()))?;

        match comments.get(video_id) {
            Some(Ok(set)) => Ok(set.iter().take(max as usize).cloned().collect()),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(Vec::new()),
        }
    }
}
