//! Pattern-based grammar heuristics. Not a parser: each rule is a regex over
//! the raw text and contributes at most one issue, however often it matches.
//!
//! The article rule flags "a"/"an" before any vowel letter, so it misfires on
//! both "an apple" and "a university". It stays that way on purpose until the
//! product side decides what it should report.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::tokenizer;

pub const SUBJECT_VERB: &str = "Subject-verb agreement error";
pub const ARTICLE_USAGE: &str = "Article usage error";
pub const LOWERCASE_I: &str = "Use 'I' instead of 'i'";
pub const CONTRACTIONS: &str = "Use contractions properly: don't, can't, won't";
pub const THEIR_THERE: &str = "Check usage of their/there/they're";
pub const YOUR_YOURE: &str = "Check usage of your/you're";

const PENALTY_PER_ISSUE: f64 = 20.0;

struct Rule {
  pattern: Regex,
  issue: &'static str,
}

// Order matters: issues are reported in the order their rule is listed.
static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
  [
    (r"(?i)\b(I|you|we|they)\s+(is|was)", SUBJECT_VERB),
    (r"(?i)\b(a|an)\s+[aeiou]", ARTICLE_USAGE),
    // Only the lowercase pronoun is a mistake.
    (r"\bi\b", LOWERCASE_I),
    (r"(?i)\b(dont|cant|wont)\b", CONTRACTIONS),
    (r"(?i)\b(their|there|they're)\b", THEIR_THERE),
    (r"(?i)\b(your|you're)\b", YOUR_YOURE),
  ]
  .into_iter()
  .map(|(p, issue)| Rule { pattern: Regex::new(p).expect("grammar pattern compiles"), issue })
  .collect()
});

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GrammarReport {
  pub error_count: usize,
  /// Distinct issues in the order they were first detected.
  pub issues: Vec<String>,
  pub sentence_count: usize,
  pub grammar_score: f64,
}

pub fn score(text: &str) -> GrammarReport {
  let mut issues: Vec<String> = Vec::new();
  for rule in RULES.iter() {
    if rule.pattern.is_match(text) && !issues.iter().any(|i| i == rule.issue) {
      issues.push(rule.issue.to_string());
    }
  }

  let error_count = issues.len();
  let sentence_count = tokenizer::sentences(text).len();
  // Nothing to judge: treated as clean.
  let grammar_score = if sentence_count > 0 {
    (100.0 - error_count as f64 * PENALTY_PER_ISSUE).max(0.0)
  } else {
    100.0
  };

  GrammarReport { error_count, issues, sentence_count, grammar_score }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_text_is_perfect() {
    let r = score("");
    assert_eq!(r.error_count, 0);
    assert!(r.issues.is_empty());
    assert_eq!(r.sentence_count, 0);
    assert_eq!(r.grammar_score, 100.0);
  }

  #[test]
  fn lowercase_i_and_missing_apostrophe() {
    let r = score("i dont know.");
    assert_eq!(r.issues, vec![LOWERCASE_I.to_string(), CONTRACTIONS.to_string()]);
    assert_eq!(r.error_count, 2);
    assert_eq!(r.sentence_count, 1);
    assert_eq!(r.grammar_score, 60.0);
  }

  #[test]
  fn clean_sentence_has_no_issues() {
    let r = score("I am happy.");
    assert_eq!(r.error_count, 0);
    assert_eq!(r.grammar_score, 100.0);
  }

  #[test]
  fn repeated_matches_count_once() {
    let r = score("you is late. we was there. they is here.");
    assert_eq!(r.issues.first().map(String::as_str), Some(SUBJECT_VERB));
    assert_eq!(r.issues.iter().filter(|i| *i == SUBJECT_VERB).count(), 1);
    // "there" also trips the homophone reminder.
    assert_eq!(r.issues, vec![SUBJECT_VERB.to_string(), THEIR_THERE.to_string()]);
    assert_eq!(r.sentence_count, 3);
  }

  #[test]
  fn article_rule_flags_any_vowel_after_a_or_an() {
    assert_eq!(score("I ate an apple.").issues, vec![ARTICLE_USAGE.to_string()]);
    assert_eq!(score("She is a engineer.").issues, vec![ARTICLE_USAGE.to_string()]);
    assert!(score("He has a car.").issues.is_empty());
    assert_eq!(score("A apple fell.").issues, vec![ARTICLE_USAGE.to_string()]);
    assert_eq!(score("AN ORANGE.").issues, vec![ARTICLE_USAGE.to_string()]);
  }

  #[test]
  fn capitalised_pronouns_still_disagree() {
    assert_eq!(score("They was late.").issues, vec![SUBJECT_VERB.to_string()]);
    assert_eq!(score("You is here.").issues, vec![SUBJECT_VERB.to_string()]);
    assert_eq!(score("WE WAS HOME.").issues, vec![SUBJECT_VERB.to_string()]);
  }

  #[test]
  fn capital_i_is_not_a_lowercase_i() {
    assert!(score("I think I can.").issues.is_empty());
    assert_eq!(score("Yes, i can.").issues, vec![LOWERCASE_I.to_string()]);
  }

  #[test]
  fn issues_follow_rule_order_not_text_order() {
    let r = score("Is that your book? they was here and i cant stay.");
    assert_eq!(
      r.issues,
      vec![
        SUBJECT_VERB.to_string(),
        LOWERCASE_I.to_string(),
        CONTRACTIONS.to_string(),
        YOUR_YOURE.to_string(),
      ]
    );
    assert_eq!(r.grammar_score, 20.0);
  }

  #[test]
  fn score_floors_at_zero() {
    let r = score("they was there and i dont know your an orange.");
    assert_eq!(r.error_count, 6);
    assert_eq!(r.grammar_score, 0.0);
  }

  #[test]
  fn punctuation_only_text_scores_one_hundred() {
    let r = score("...");
    assert_eq!(r.sentence_count, 0);
    assert_eq!(r.grammar_score, 100.0);
  }
}
