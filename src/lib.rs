//! Study Video Effectiveness Rater
//!
//! Estimates how effective an educational video is for learning from its
//! public engagement counters and the sentiment of its top comments.

pub mod analyzer;
pub mod client;
pub mod config;
pub mod error;
pub mod scoring;
pub mod sentiment;
pub mod types;


pub use analyzer::VideoAnalyzer;
pub use error::{AnalyzerError, Result};
pub use types::{EffectivenessLabel, EffectivenessResult, VideoMetadata, VideoReport};
