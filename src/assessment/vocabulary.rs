//! Vocabulary-richness heuristic.

use std::collections::HashSet;

use serde::Serialize;

use super::tokenizer;

/// Closed list of very common function words that never count as "uncommon".
pub const STOP_WORDS: [&str; 20] = [
  "the", "be", "to", "of", "and", "a", "in", "that", "have", "i",
  "it", "for", "not", "on", "with", "he", "as", "you", "do", "at",
];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VocabularyReport {
  pub total_words: usize,
  pub unique_word_count: usize,
  pub uncommon_word_count: usize,
  pub vocabulary_score: f64,
}

/// The score divides distinct uncommon words by *total* occurrences, so
/// repetition dilutes it and each new rare word weighs double.
pub fn score(text: &str) -> VocabularyReport {
  let lowered = text.to_lowercase();
  let words = tokenizer::words(&lowered);
  let total_words = words.len();

  let unique: HashSet<&str> = words.iter().copied().collect();
  let uncommon_word_count = unique
    .iter()
    .copied()
    .filter(|w| w.chars().all(char::is_alphabetic) && !STOP_WORDS.contains(w))
    .count();

  let vocabulary_score = if total_words > 0 {
    (uncommon_word_count as f64 / total_words as f64 * 200.0).min(100.0)
  } else {
    0.0
  };

  VocabularyReport {
    total_words,
    unique_word_count: unique.len(),
    uncommon_word_count,
    vocabulary_score,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_text_is_all_zero() {
    assert_eq!(
      score(""),
      VocabularyReport { total_words: 0, unique_word_count: 0, uncommon_word_count: 0, vocabulary_score: 0.0 }
    );
  }

  #[test]
  fn repetition_dilutes_rare_word() {
    let r = score("the the the the serendipity");
    assert_eq!(r.total_words, 5);
    assert_eq!(r.unique_word_count, 2);
    assert_eq!(r.uncommon_word_count, 1);
    assert!((r.vocabulary_score - 40.0).abs() < 1e-9);
  }

  #[test]
  fn case_is_folded_and_digits_are_not_uncommon() {
    let r = score("Serendipity SERENDIPITY 2024 abc123");
    assert_eq!(r.total_words, 4);
    assert_eq!(r.unique_word_count, 3);
    assert_eq!(r.uncommon_word_count, 1);
  }

  #[test]
  fn score_is_clamped_to_one_hundred() {
    let r = score("ephemeral luminous cascade");
    assert_eq!(r.uncommon_word_count, 3);
    assert_eq!(r.vocabulary_score, 100.0);
  }

  #[test]
  fn swapping_stop_words_for_rare_words_never_lowers_score() {
    const RARE: [&str; 10] = [
      "zephyr", "quixotic", "lambent", "sonder", "petrichor",
      "halcyon", "ineffable", "vellichor", "limerence", "aurora",
    ];
    for total in 1..=RARE.len() {
      let mut previous = -1.0;
      for rare in 0..=total {
        let mut tokens: Vec<&str> = RARE[..rare].to_vec();
        tokens.extend(std::iter::repeat("the").take(total - rare));
        let r = score(&tokens.join(" "));
        assert_eq!(r.total_words, total);
        assert!(r.vocabulary_score >= previous, "total={total} rare={rare}");
        assert!((0.0..=100.0).contains(&r.vocabulary_score));
        previous = r.vocabulary_score;
      }
    }
  }
}
