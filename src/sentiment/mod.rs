//! Comment sentiment aggregation
//!
//! Reduces a set of comment texts to a single mean compound polarity.
//! The per-comment scorer is injected via [`PolarityScorer`] so tests and
//! alternative models can be swapped in without touching the aggregator.

pub mod lexicon;

pub use lexicon::LexiconScorer;

use crate::error::{AnalyzerError, Result};
use serde::Deserialize;
use std::sync::Arc;

/// Per-comment sentiment capability
#[cfg_attr(test, mockall::automock)]
pub trait PolarityScorer: Send + Sync {
    /// Compound polarity of one text, in [-1, 1] with 0.0 meaning neutral
    fn polarity(&self, text: &str) -> Result<f64>;
}

/// What to do when a single comment cannot be scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log and leave the comment out of the mean
    #[default]
    Skip,
    /// Fail the whole aggregation
    Abort,
}

/// Mean-polarity aggregator over a comment set
#[derive(Clone)]
pub struct SentimentAggregator {
    scorer: Arc<dyn PolarityScorer>,
    policy: FailurePolicy,
}

impl SentimentAggregator {
    pub fn new(scorer: Arc<dyn PolarityScorer>) -> Self {
        Self {
            scorer,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Mean compound polarity of `comments`.
    ///
    /// An empty set is neutral (0.0). Under [`FailurePolicy::Skip`] this never
    /// errors; if every comment fails the result is also 0.0.
    pub fn compute_sentiment<S: AsRef<str>>(&self, comments: &[S]) -> Result<f64> {
        Ok(self.aggregate(comments)?.mean)
    }

    /// Like [`compute_sentiment`](Self::compute_sentiment) but also reports
    /// how many comments contributed.
    pub fn aggregate<S: AsRef<str>>(&self, comments: &[S]) -> Result<SentimentSummary> {
        let mut total = 0.0;
        let mut scored = 0usize;
        let mut skipped = 0usize;

        for (index, comment) in comments.iter().enumerate() {
            match self.score_one(comment.as_ref()) {
                Ok(p) => {
                    total += p;
                    scored += 1;
                }
                Err(reason) => match self.policy {
                    FailurePolicy::Abort => {
                        return Err(AnalyzerError::Sentiment { index, reason });
                    }
                    FailurePolicy::Skip => {
                        tracing::warn!(
                            index,
                            "Skipping unscorable comment: {}",
                            reason
                        );
                        skipped += 1;
                    }
                },
            }
        }

        let mean = if scored == 0 { 0.0 } else { total / scored as f64 };

        Ok(SentimentSummary {
            mean,
            scored,
            skipped,
        })
    }

    fn score_one(&self, text: &str) -> std::result::Result<f64, String> {
        match self.scorer.polarity(text) {
            Ok(p) if p.is_finite() && (-1.0..=1.0).contains(&p) => Ok(p),
            Ok(p) => Err(format!("polarity {} outside [-1, 1]", p)),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Result of one aggregation pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentSummary {
    /// Mean polarity over scored comments, 0.0 when none
    pub mean: f64,
    pub scored: usize,
    pub skipped: usize,
}
