//! End-to-end video analysis
//!
//! URL -> video id -> metadata -> comments -> sentiment -> score -> label.
//! Every collaborator is injected, so the pipeline runs the same way
//! against the live API and against in-memory fakes.

use crate::client::{extract_video_id, CommentProvider, MetadataProvider, MAX_COMMENTS};
use crate::config::AnalysisConfig;
use crate::error::{AnalyzerError, Result};
use crate::scoring;
use crate::sentiment::SentimentAggregator;
use crate::types::{CommentSet, VideoReport};
use std::sync::Arc;

pub struct VideoAnalyzer {
    metadata: Arc<dyn MetadataProvider>,
    comments: Arc<dyn CommentProvider>,
    sentiment: SentimentAggregator,
    max_comments: u32,
}

impl VideoAnalyzer {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        comments: Arc<dyn CommentProvider>,
        sentiment: SentimentAggregator,
    ) -> Self {
        Self {
            metadata,
            comments,
            sentiment,
            max_comments: MAX_COMMENTS,
        }
    }

    /// Apply the `[analysis]` config section
    pub fn with_config(mut self, config: &AnalysisConfig) -> Self {
        self.max_comments = config.max_comments.clamp(1, MAX_COMMENTS);
        self.sentiment = self.sentiment.with_policy(config.sentiment_failure_policy);
        self
    }

    /// Analyze the video behind a user-supplied URL
    pub async fn analyze(&self, url: &str) -> Result<VideoReport> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AnalyzerError::Validation(
                "please enter a video URL".to_string(),
            ));
        }

        let video_id =
            extract_video_id(url).ok_or_else(|| AnalyzerError::InvalidUrl(url.to_string()))?;

        self.analyze_id(&video_id).await
    }

    /// Analyze a video by platform id
    pub async fn analyze_id(&self, video_id: &str) -> Result<VideoReport> {
        let metadata = self
            .metadata
            .fetch_metadata(video_id)
            .await?
            .ok_or_else(|| AnalyzerError::VideoNotFound(video_id.to_string()))?;

        let mut warnings = Vec::new();
        let comments = self.fetch_comments(video_id, &mut warnings).await?;

        let summary = self.sentiment.aggregate(&comments)?;
        if summary.skipped > 0 {
            warnings.push(format!(
                "{} of {} comments could not be scored",
                summary.skipped,
                comments.len()
            ));
        }

        let effectiveness = scoring::evaluate(&metadata, summary.mean);
        if scoring::is_low_data(&metadata) {
            warnings.push("Too little engagement data; low-data floor score applied".to_string());
        }

        tracing::info!(
            video_id,
            score = effectiveness.score,
            label = %effectiveness.label,
            sentiment = summary.mean,
            comments = summary.scored,
            "Analysis complete"
        );

        Ok(VideoReport {
            video_id: video_id.to_string(),
            metadata,
            comment_count: summary.scored,
            sentiment: summary.mean,
            effectiveness,
            warnings,
        })
    }

    /// Fetch comments, degrading recoverable failures to an empty set
    async fn fetch_comments(
        &self,
        video_id: &str,
        warnings: &mut Vec<String>,
    ) -> Result<CommentSet> {
        match self.comments.fetch_comments(video_id, self.max_comments).await {
            Ok(comments) => Ok(comments),
            Err(e) if e.is_degradable() => {
                tracing::warn!("Comments unavailable for {}: {}", video_id, e);
                warnings.push(format!("Comments unavailable ({}); sentiment treated as neutral", e));
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockPlatform;
    use crate::client::CommentFetchError;
    use crate::sentiment::{FailurePolicy, PolarityScorer};
    use crate::types::{EffectivenessLabel, VideoMetadata};

    const ID: &str = "dQw4w9WgXcQ";
    const URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    /// "+" comments score 0.5, "-" comments -0.5, "!" fails
    struct SignScorer;

    impl PolarityScorer for SignScorer {
        fn polarity(&self, text: &str) -> Result<f64> {
            match text {
                "+" => Ok(0.5),
                "-" => Ok(-0.5),
                "!" => Err(AnalyzerError::Api("unscorable".to_string())),
                _ => Ok(0.0),
            }
        }
    }

    fn analyzer(platform: Arc<MockPlatform>) -> VideoAnalyzer {
        VideoAnalyzer::new(
            platform.clone(),
            platform,
            SentimentAggregator::new(Arc::new(SignScorer)),
        )
    }

    #[tokio::test]
    async fn test_full_pipeline() {
        let platform = Arc::new(MockPlatform::new().with_video(
            ID,
            VideoMetadata::new("Linear Algebra", 10_000, 2000, 500),
            &["+", "+", "+"],
        ));

        let report = analyzer(platform).analyze(URL).await.unwrap();
        assert_eq!(report.video_id, ID);
        assert_eq!(report.comment_count, 3);
        assert!((report.sentiment - 0.5).abs() < 1e-12);
        // Sentiment clamps to 0.2 -> ln(31) * 1.2 * 25
        assert!((report.effectiveness.score - 103.02).abs() < 0.01);
        assert_eq!(report.effectiveness.label, EffectivenessLabel::HighlyEffective);
        assert!(report.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_blank_url_is_validation_error() {
        let platform = Arc::new(MockPlatform::new());
        let err = analyzer(platform.clone()).analyze("   ").await.unwrap_err();
        assert!(matches!(err, AnalyzerError::Validation(_)));
        assert_eq!(platform.metadata_calls(), 0);
    }

    #[tokio::test]
    async fn test_unrecognised_url() {
        let platform = Arc::new(MockPlatform::new());
        let err = analyzer(platform.clone())
            .analyze("https://example.com/about")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidUrl(_)));
        assert_eq!(platform.metadata_calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_video_stops_before_scoring() {
        let platform = Arc::new(MockPlatform::new());
        let err = analyzer(platform.clone()).analyze(URL).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::VideoNotFound(ref id) if id == ID));
        assert_eq!(platform.comment_calls(), 0);
    }

    #[tokio::test]
    async fn test_metadata_failure_propagates() {
        let platform = Arc::new(MockPlatform::new());
        platform.fail_metadata("backend down");
        let err = analyzer(platform).analyze_id(ID).await.unwrap_err();
        assert!(err.to_string().contains("backend down"));
    }

    #[tokio::test]
    async fn test_disabled_comments_degrade_to_neutral() {
        let platform = Arc::new(MockPlatform::new());
        platform.add_video(ID, VideoMetadata::new("Calculus", 1000, 50, 10));
        platform.set_comments(ID, Err(CommentFetchError::Disabled));

        let report = analyzer(platform).analyze_id(ID).await.unwrap();
        assert_eq!(report.sentiment, 0.0);
        assert_eq!(report.comment_count, 0);
        assert!((report.effectiveness.score - 51.99).abs() < 0.01);
        assert_eq!(report.effectiveness.label, EffectivenessLabel::ModeratelyEffective);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("disabled"));
    }

    #[tokio::test]
    async fn test_network_failure_degrades() {
        let platform = Arc::new(MockPlatform::new());
        platform.add_video(ID, VideoMetadata::new("Calculus", 1000, 50, 10));
        platform.set_comments(ID, Err(CommentFetchError::Network("timeout".to_string())));

        let report = analyzer(platform).analyze_id(ID).await.unwrap();
        assert_eq!(report.sentiment, 0.0);
        assert!(!report.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_restricted_thread_degrades() {
        let platform = Arc::new(MockPlatform::new());
        platform.add_video(ID, VideoMetadata::new("Calculus", 1000, 50, 10));
        platform.set_comments(
            ID,
            Err(CommentFetchError::Restricted("insufficient permissions".to_string())),
        );

        let report = analyzer(platform).analyze_id(ID).await.unwrap();
        assert_eq!(report.sentiment, 0.0);
        assert_eq!(report.effectiveness.label, EffectivenessLabel::ModeratelyEffective);
        assert!(report.warnings[0].contains("insufficient permissions"));
    }

    #[tokio::test]
    async fn test_server_error_degrades() {
        let platform = Arc::new(MockPlatform::new());
        platform.add_video(ID, VideoMetadata::new("Calculus", 1000, 50, 10));
        platform.set_comments(ID, Err(CommentFetchError::Server("HTTP 503".to_string())));

        let report = analyzer(platform).analyze_id(ID).await.unwrap();
        assert_eq!(report.comment_count, 0);
        assert!(report.warnings[0].contains("server error"));
    }

    #[tokio::test]
    async fn test_quota_failure_propagates() {
        let platform = Arc::new(MockPlatform::new());
        platform.add_video(ID, VideoMetadata::new("Calculus", 1000, 50, 10));
        platform.set_comments(ID, Err(CommentFetchError::Quota("daily".to_string())));

        let err = analyzer(platform).analyze_id(ID).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::Quota(_)));
    }

    #[tokio::test]
    async fn test_auth_failure_propagates() {
        let platform = Arc::new(MockPlatform::new());
        platform.add_video(ID, VideoMetadata::new("Calculus", 1000, 50, 10));
        platform.set_comments(ID, Err(CommentFetchError::Auth("bad key".to_string())));

        let err = analyzer(platform).analyze_id(ID).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::Auth(_)));
    }

    #[tokio::test]
    async fn test_low_data_floor() {
        let platform = Arc::new(MockPlatform::new().with_video(
            ID,
            VideoMetadata::new("Tiny channel", 100, 5, 1),
            &["+"],
        ));

        let report = analyzer(platform).analyze_id(ID).await.unwrap();
        assert_eq!(report.effectiveness.score, 10.0);
        assert_eq!(report.effectiveness.label, EffectivenessLabel::LowEffectiveness);
        assert!(report.warnings.iter().any(|w| w.contains("low-data")));
    }

    #[tokio::test]
    async fn test_unscorable_comments_skipped_by_default() {
        let platform = Arc::new(MockPlatform::new().with_video(
            ID,
            VideoMetadata::new("Calculus", 1000, 50, 10),
            &["+", "!", "-", "+"],
        ));

        let report = analyzer(platform).analyze_id(ID).await.unwrap();
        assert_eq!(report.comment_count, 3);
        assert!((report.sentiment - 0.5 / 3.0).abs() < 1e-12);
        assert!(report.warnings.iter().any(|w| w.contains("1 of 4")));
    }

    #[tokio::test]
    async fn test_abort_policy_from_config() {
        let platform = Arc::new(MockPlatform::new().with_video(
            ID,
            VideoMetadata::new("Calculus", 1000, 50, 10),
            &["+", "!"],
        ));

        let config = AnalysisConfig {
            max_comments: 100,
            sentiment_failure_policy: FailurePolicy::Abort,
        };
        let err = analyzer(platform)
            .with_config(&config)
            .analyze_id(ID)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::Sentiment { index: 1, .. }));
    }

    #[tokio::test]
    async fn test_max_comments_from_config() {
        let platform = Arc::new(MockPlatform::new().with_video(
            ID,
            VideoMetadata::new("Calculus", 1000, 50, 10),
            &["+", "-", "-", "-"],
        ));

        let config = AnalysisConfig {
            max_comments: 1,
            ..AnalysisConfig::default()
        };
        let report = analyzer(platform)
            .with_config(&config)
            .analyze_id(ID)
            .await
            .unwrap();
        assert_eq!(report.comment_count, 1);
        assert!((report.sentiment - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_analyze_blocking() {
        let platform = Arc::new(MockPlatform::new().with_video(
            ID,
            VideoMetadata::new("Calculus", 1000, 50, 10),
            &[],
        ));
        let report = tokio_test::block_on(analyzer(platform).analyze(URL)).unwrap();
        assert_eq!(report.sentiment, 0.0);
        assert_eq!(report.metadata.title, "Calculus");
    }
}
