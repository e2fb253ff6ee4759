//! Effectiveness scoring
//!
//! Maps video engagement plus mean comment sentiment to a score and a
//! three-tier label. Pure functions, no state.


use crate::types::{EffectivenessLabel, EffectivenessResult, SentimentScore, VideoMetadata};

/// Score returned when there is too little data to trust the metrics
pub const LOW_DATA_FLOOR: f64 = 10.0;
/// Below this many views the floor applies
pub const MIN_VIEWS: u64 = 500;
/// Below this many likes + comments the floor applies
pub const MIN_INTERACTIONS: u64 = 20;
/// Comments count double relative to likes
pub const COMMENT_WEIGHT: f64 = 2.0;
/// Density scale applied before log compression
pub const DENSITY_SCALE: f64 = 100.0;
/// Sentiment can move the score by at most this fraction either way
pub const SENTIMENT_CLAMP: f64 = 0.2;
/// Maps log-engagement onto a roughly 0-100 scale
pub const CALIBRATION: f64 = 25.0;

pub const HIGHLY_EFFECTIVE_MIN: f64 = 60.0;
pub const MODERATELY_EFFECTIVE_MIN: f64 = 30.0;

/// Whether the metadata is too sparse to score
pub fn is_low_data(metadata: &VideoMetadata) -> bool {
    metadata.views < MIN_VIEWS
        || metadata.likes.saturating_add(metadata.comments) < MIN_INTERACTIONS
}

/// Weighted interactions per view
pub fn engagement_density(metadata: &VideoMetadata) -> f64 {
    (metadata.likes as f64 + COMMENT_WEIGHT * metadata.comments as f64) / metadata.views as f64
}

/// `1 + clamp(sentiment, -0.2, 0.2)`
pub fn sentiment_factor(avg_sentiment: SentimentScore) -> f64 {
    1.0 + avg_sentiment.clamp(-SENTIMENT_CLAMP, SENTIMENT_CLAMP)
}

/// Compute the effectiveness score.
///
/// Sparse data short-circuits to [`LOW_DATA_FLOOR`] without looking at
/// sentiment. Otherwise the score is
/// `ln(1 + density * 100) * (1 + clamp(sentiment, ±0.2)) * 25`, with no
/// upper bound. Videos that pass the guard with very low density can score
/// below the floor; the formula is not clamped to it.
pub fn compute_effectiveness(metadata: &VideoMetadata, avg_sentiment: SentimentScore) -> f64 {
    if is_low_data(metadata) {
        return LOW_DATA_FLOOR;
    }

    let engagement_score = (engagement_density(metadata) * DENSITY_SCALE).ln_1p();
    engagement_score * sentiment_factor(avg_sentiment) * CALIBRATION
}

/// Classify a score. Lower bounds are inclusive.
pub fn classify(score: f64) -> EffectivenessLabel {
    if score >= HIGHLY_EFFECTIVE_MIN {
        EffectivenessLabel::HighlyEffective
    } else if score >= MODERATELY_EFFECTIVE_MIN {
        EffectivenessLabel::ModeratelyEffective
    } else {
        EffectivenessLabel::LowEffectiveness
    }
}

/// Score and classify in one step
pub fn evaluate(metadata: &VideoMetadata, avg_sentiment: SentimentScore) -> EffectivenessResult {
    let score = compute_effectiveness(metadata, avg_sentiment);
    let label = classify(score);

    tracing::debug!(
        views = metadata.views,
        likes = metadata.likes,
        comments = metadata.comments,
        avg_sentiment,
        score,
        %label,
        "Scored video"
    );

    EffectivenessResult { score, label }
}
