//! Video identifier extraction

use regex::Regex;
use std::sync::OnceLock;

fn video_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("video id pattern is valid")
    })
}

/// Extract the 11-character video id from a watch, share or embed URL.
///
/// Returns the first match, `None` when the URL carries no id.
pub fn extract_video_id(url: &str) -> Option<String> {
    video_id_pattern()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
