//! Lexicon sentiment scorer
//!
//! VADER-style compound polarity tuned for comments under study and
//! tutorial videos. Handles boosters, negation and a handful of emojis.

use super::PolarityScorer;
use crate::error::Result;
use std::collections::HashMap;

/// VADER normalisation constant
const ALPHA: f64 = 15.0;
/// Negated valences flip and shrink by this factor
const NEGATION_SCALAR: f64 = -0.74;
/// How many preceding tokens can modify a valence
const MODIFIER_WINDOW: usize = 3;

/// Lexicon-based polarity scorer
pub struct LexiconScorer {
    /// Word valences, roughly -4.0..=4.0 as in VADER
    lexicon: HashMap<String, f64>,
    emoji_lexicon: HashMap<char, f64>,
    /// Intensity multipliers (very, extremely, ...)
    boosters: HashMap<String, f64>,
    negations: Vec<String>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        let mut scorer = Self {
            lexicon: HashMap::new(),
            emoji_lexicon: HashMap::new(),
            boosters: HashMap::new(),
            negations: Vec::new(),
        };
        scorer.init_lexicons();
        scorer
    }

    fn init_lexicons(&mut self) {
        let positive_words = [
            ("good", 1.9),
            ("great", 3.1),
            ("excellent", 2.7),
            ("amazing", 2.8),
            ("awesome", 3.1),
            ("fantastic", 2.6),
            ("wonderful", 2.7),
            ("best", 3.2),
            ("love", 3.2),
            ("loved", 2.9),
            ("like", 1.5),
            ("nice", 1.8),
            ("thanks", 1.9),
            ("thank", 1.5),
            ("helpful", 1.8),
            ("useful", 1.9),
            ("clear", 1.6),
            ("clearly", 1.3),
            ("understand", 1.1),
            ("understood", 1.3),
            ("easy", 1.9),
            ("simple", 1.0),
            ("perfect", 2.7),
            ("brilliant", 2.8),
            ("learned", 1.4),
            ("learnt", 1.4),
            ("insightful", 2.0),
            ("informative", 1.7),
            ("engaging", 1.6),
            ("saved", 1.5),
            ("passed", 1.6),
            ("recommend", 1.5),
            ("interesting", 1.7),
            ("happy", 2.7),
            ("enjoyed", 2.3),
            ("well", 1.1),
        ];

        let negative_words = [
            ("bad", -2.5),
            ("terrible", -2.1),
            ("awful", -2.0),
            ("horrible", -2.5),
            ("poor", -2.1),
            ("worst", -3.1),
            ("hate", -2.7),
            ("dislike", -1.6),
            ("boring", -1.3),
            ("confusing", -1.3),
            ("confused", -1.3),
            ("unclear", -1.0),
            ("useless", -1.8),
            ("wrong", -2.1),
            ("mistake", -1.4),
            ("mistakes", -1.5),
            ("slow", -0.9),
            ("waste", -1.8),
            ("wasted", -2.2),
            ("annoying", -1.7),
            ("lost", -1.3),
            ("difficult", -1.0),
            ("hard", -0.4),
            ("fail", -2.5),
            ("failed", -2.3),
            ("misleading", -1.7),
            ("clickbait", -1.5),
            ("sad", -2.1),
            ("stupid", -2.4),
            ("problem", -1.7),
        ];

        for (word, score) in positive_words.iter().chain(negative_words.iter()) {
            self.lexicon.insert(word.to_string(), *score);
        }

        let emojis = [
            ('\u{1F44D}', 1.8),  // thumbs up
            ('\u{1F44E}', -1.8), // thumbs down
            ('\u{2764}', 2.5),   // heart
            ('\u{1F525}', 1.5),  // fire
            ('\u{1F64F}', 1.4),  // folded hands
            ('\u{1F60A}', 2.0),  // smiling face
            ('\u{1F622}', -1.9), // crying face
            ('\u{1F634}', -1.2), // sleeping face
            ('\u{1F92F}', 1.2),  // mind blown
        ];

        for (emoji, score) in emojis {
            self.emoji_lexicon.insert(emoji, score);
        }

        let boosters = [
            ("very", 1.3),
            ("really", 1.3),
            ("extremely", 1.5),
            ("absolutely", 1.4),
            ("so", 1.2),
            ("super", 1.3),
            ("incredibly", 1.4),
            ("highly", 1.3),
            ("totally", 1.3),
            ("most", 1.2),
        ];

        for (word, factor) in boosters {
            self.boosters.insert(word.to_string(), factor);
        }

        self.negations = [
            "not", "no", "never", "nothing", "isn't", "aren't", "wasn't", "weren't",
            "doesn't", "don't", "didn't", "won't", "wouldn't", "can't", "cannot",
            "couldn't", "shouldn't", "hardly",
        ]
        .iter()
        .map(|w| w.to_string())
        .collect();
    }

    /// Compound polarity of `text` in [-1, 1]
    pub fn compound(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        let words: Vec<String> = lower.split_whitespace().map(clean_word).collect();

        let mut sum: f64 = text
            .chars()
            .filter_map(|c| self.emoji_lexicon.get(&c))
            .sum();

        for (i, word) in words.iter().enumerate() {
            if let Some(&valence) = self.lexicon.get(word) {
                sum += self.apply_modifiers(&words, i, valence);
            }
        }

        normalize(sum)
    }

    /// Apply boosters and negations from up to three preceding words
    fn apply_modifiers(&self, words: &[String], index: usize, mut valence: f64) -> f64 {
        let start = index.saturating_sub(MODIFIER_WINDOW);

        for prev in &words[start..index] {
            if let Some(&factor) = self.boosters.get(prev) {
                valence *= factor;
            }
            if self.negations.contains(prev) {
                valence *= NEGATION_SCALAR;
            }
        }

        valence
    }

    /// Human label for a compound score, using VADER's ±0.05 thresholds
    pub fn label(compound: f64) -> &'static str {
        if compound >= 0.05 {
            "positive"
        } else if compound <= -0.05 {
            "negative"
        } else {
            "neutral"
        }
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> Result<f64> {
        Ok(self.compound(text))
    }
}

/// Strip punctuation, keeping apostrophes for contractions
fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric() || *c == '\'')
        .collect()
}

/// Map an unbounded valence sum into [-1, 1]
fn normalize(sum: f64) -> f64 {
    if sum == 0.0 {
        return 0.0;
    }
    (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
}
