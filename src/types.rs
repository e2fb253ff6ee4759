//! Core data types shared by the scorer, the providers and the CLI

use serde::{Deserialize, Serialize};
use std::fmt;

/// Public statistics of a single video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
}

impl VideoMetadata {
    pub fn new(title: impl Into<String>, views: u64, likes: u64, comments: u64) -> Self {
        Self {
            title: title.into(),
            views,
            likes,
            comments,
        }
    }
}

/// Raw top-level comment texts in platform order
pub type CommentSet = Vec<String>;

/// Mean compound polarity in [-1, 1]
pub type SentimentScore = f64;

/// Three-tier effectiveness classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectivenessLabel {
    HighlyEffective,
    ModeratelyEffective,
    LowEffectiveness,
}

impl EffectivenessLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectivenessLabel::HighlyEffective => "Highly Effective",
            EffectivenessLabel::ModeratelyEffective => "Moderately Effective",
            EffectivenessLabel::LowEffectiveness => "Low Effectiveness",
        }
    }
}

impl fmt::Display for EffectivenessLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score and label for one video
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectivenessResult {
    pub score: f64,
    pub label: EffectivenessLabel,
}

/// Everything the presentation layer needs about one analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoReport {
    pub video_id: String,
    pub metadata: VideoMetadata,
    /// Number of comments that fed the sentiment mean
    pub comment_count: usize,
    pub sentiment: SentimentScore,
    pub effectiveness: EffectivenessResult,
    /// Degraded-data notices (e.g. comments unavailable)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_display() {
        assert_eq!(EffectivenessLabel::HighlyEffective.to_string(), "Highly Effective");
        assert_eq!(
            EffectivenessLabel::ModeratelyEffective.to_string(),
            "Moderately Effective"
        );
        assert_eq!(EffectivenessLabel::LowEffectiveness.to_string(), "Low Effectiveness");
    }

    #[test]
    fn test_label_serialization() {
        assert_eq!(
            serde_json::to_string(&EffectivenessLabel::HighlyEffective).unwrap(),
            "\"highly_effective\""
        );
        assert_eq!(
            serde_json::to_string(&EffectivenessLabel::LowEffectiveness).unwrap(),
            "\"low_effectiveness\""
        );
    }

    #[test]
    fn test_report_omits_empty_warnings() {
        let report = VideoReport {
            video_id: "abcdefghijk".to_string(),
            metadata: VideoMetadata::new("Intro to Rust", 1000, 50, 10),
            comment_count: 0,
            sentiment: 0.0,
            effectiveness: EffectivenessResult {
                score: 10.0,
                label: EffectivenessLabel::LowEffectiveness,
            },
            warnings: Vec::new(),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"video_id\":\"abcdefghijk\""));
        assert!(!json.contains("warnings"));
    }
}
