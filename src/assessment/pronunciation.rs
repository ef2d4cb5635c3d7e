//! Pronunciation-proxy / complexity heuristic.
//!
//! There is no audio analysis here. The complexity score is a linear function
//! of word and sentence counts, and the three "spoken" scores are constants
//! kept apart in [`PlaceholderScores`] until a real audio scorer exists.

use serde::Serialize;

use super::tokenizer;

/// Stand-in values returned for every input.
pub const PLACEHOLDER_SCORES: PlaceholderScores = PlaceholderScores {
  pronunciation_score: 85.0,
  fluency_score: 78.0,
  clarity_score: 92.0,
};

/// Scores that are NOT derived from the text. Consumers should display them
/// as "not yet measured" rather than as feedback.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlaceholderScores {
  pub pronunciation_score: f64,
  pub fluency_score: f64,
  pub clarity_score: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PronunciationComplexityReport {
  pub word_count: usize,
  pub sentence_count: usize,
  pub average_word_length: f64,
  /// min(100, words * 2 + sentences * 5)
  pub complexity_score: f64,
  pub placeholder: PlaceholderScores,
}

pub fn score(text: &str) -> PronunciationComplexityReport {
  let words = tokenizer::words(text);
  let word_count = words.len();
  let sentence_count = tokenizer::sentences(text).len();

  let average_word_length = if word_count == 0 {
    0.0
  } else {
    let chars: usize = words.iter().map(|w| w.chars().count()).sum();
    chars as f64 / word_count as f64
  };

  let raw = word_count
    .saturating_mul(2)
    .saturating_add(sentence_count.saturating_mul(5));
  let complexity_score = (raw as f64).min(100.0);

  PronunciationComplexityReport {
    word_count,
    sentence_count,
    average_word_length,
    complexity_score,
    placeholder: PLACEHOLDER_SCORES,
  }
}
