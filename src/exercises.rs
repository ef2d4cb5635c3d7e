//! Grammar drills and vocabulary games: answer checking, quiz picks and the
//! word of the day. Everything here is pure; session credit happens in `logic`.

use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::domain::{Exercise, ExerciseCategory, ExerciseView, WordOfDay};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AnswerCheck {
  pub exercise_id: String,
  pub correct: bool,
  pub expected: String,
  pub explanation: String,
}

/// Trimmed, whitespace-collapsed, lowercased.
fn normalize(s: &str) -> String {
  s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Compares ignoring case and spacing. The explanation is returned either way
/// so a wrong answer doubles as a hint.
pub fn check_answer(exercise: &Exercise, given: &str) -> AnswerCheck {
  let correct = normalize(given) == normalize(&exercise.answer);
  let explanation = if exercise.explanation.is_empty() {
    format!("The correct answer is '{}'", exercise.answer)
  } else {
    exercise.explanation.clone()
  };
  AnswerCheck { exercise_id: exercise.id.clone(), correct, expected: exercise.answer.clone(), explanation }
}

pub fn list(exercises: &[Exercise], category: Option<ExerciseCategory>) -> Vec<ExerciseView> {
  exercises
    .iter()
    .filter(|e| category.map_or(true, |c| e.category == c))
    .map(ExerciseView::from)
    .collect()
}

/// Up to `count` vocabulary questions in random order.
pub fn quiz<R: Rng + ?Sized>(exercises: &[Exercise], count: usize, rng: &mut R) -> Vec<ExerciseView> {
  let mut pool = list(exercises, Some(ExerciseCategory::Vocabulary));
  pool.shuffle(rng);
  pool.truncate(count);
  pool
}

/// Same word all day, next word tomorrow.
pub fn word_of_day(words: &[WordOfDay], date: NaiveDate) -> Option<&WordOfDay> {
  if words.is_empty() {
    return None;
  }
  let day = date.num_days_from_ce().unsigned_abs() as usize;
  words.get(day % words.len())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::seeds::{seed_exercises, seed_words_of_day};
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn exercise(id: &str) -> Exercise {
    seed_exercises().into_iter().find(|e| e.id == id).expect("seeded exercise")
  }

  #[test]
  fn answers_compare_ignoring_case_and_spacing() {
    let ex = exercise("tenses-2");
    assert!(check_answer(&ex, "  Is   STUDYING ").correct);

    let wrong = check_answer(&ex, "studies");
    assert!(!wrong.correct);
    assert_eq!(wrong.expected, "is studying");
    assert_eq!(wrong.explanation, "Present continuous for actions happening now");
  }

  #[test]
  fn no_article_expects_a_blank() {
    let ex = exercise("articles-5");
    assert!(check_answer(&ex, "   ").correct);
    assert!(!check_answer(&ex, "an").correct);
  }

  #[test]
  fn choice_answers_are_option_text() {
    let ex = exercise("prepositions-2");
    assert_eq!(ex.options, vec!["at", "on", "in"]);
    assert!(check_answer(&ex, "In").correct);
  }

  #[test]
  fn missing_explanation_names_the_answer() {
    let ex = Exercise {
      id: "x".into(),
      category: ExerciseCategory::Tenses,
      prompt: "He ______ (be) tired.".into(),
      options: vec![],
      answer: "was".into(),
      explanation: String::new(),
    };
    assert_eq!(check_answer(&ex, "is").explanation, "The correct answer is 'was'");
  }

  #[test]
  fn seeded_ids_are_unique_and_choices_contain_their_answer() {
    let all = seed_exercises();
    let mut ids: Vec<&str> = all.iter().map(|e| e.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), all.len());
    assert!(all.iter().filter(|e| !e.options.is_empty()).all(|e| e.options.contains(&e.answer)));
  }

  #[test]
  fn listing_filters_by_category() {
    let all = seed_exercises();
    let articles = list(&all, Some(ExerciseCategory::Articles));
    assert_eq!(articles.len(), 10);
    assert!(articles.iter().all(|v| v.category == ExerciseCategory::Articles));
    assert_eq!(list(&all, None).len(), all.len());
  }

  #[test]
  fn quiz_draws_distinct_vocabulary_questions() {
    let all = seed_exercises();
    let mut rng = StdRng::seed_from_u64(9);
    let picked = quiz(&all, 4, &mut rng);
    assert_eq!(picked.len(), 4);
    assert!(picked.iter().all(|v| v.category == ExerciseCategory::Vocabulary));
    let mut ids: Vec<&str> = picked.iter().map(|v| v.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 4);

    assert_eq!(quiz(&all, 100, &mut rng).len(), 9);
  }

  #[test]
  fn word_of_day_rotates_daily() {
    let words = seed_words_of_day();
    let d = NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date");
    let today = word_of_day(&words, d).expect("word");
    assert_eq!(word_of_day(&words, d), Some(today));
    let tomorrow = word_of_day(&words, d.succ_opt().expect("next day")).expect("word");
    assert_ne!(today.word, tomorrow.word);
    assert!(word_of_day(&[], d).is_none());
  }
}
