//! Domain models used by the backend: practice content, vocabulary entries,
//! conversation turns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Practice level used for phrases and vocabulary entries.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
  Beginner,
  Intermediate,
  Advanced,
}
impl Default for Difficulty {
  fn default() -> Self { Difficulty::Intermediate }
}

/// Conversation scenario with a role-play pairing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Topic {
  pub name: String,
  #[serde(default)] pub icon: String,
  #[serde(default)] pub scenes: Vec<String>,
  pub learner_role: String,
  pub tutor_role: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PracticePhrase {
  pub difficulty: Difficulty,
  pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TargetSound {
  pub symbol: String,
  pub example: String,
  pub description: String,
}

/// A word saved by the learner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VocabularyEntry {
  pub word: String,
  #[serde(default)] pub meaning: String,
  #[serde(default)] pub phonetic: String,
  #[serde(default)] pub example: String,
  #[serde(default)] pub category: String,
  #[serde(default)] pub difficulty: Difficulty,
  /// 0..=100
  #[serde(default)] pub mastery: u8,
  pub added_at: DateTime<Utc>,
}

/// Where a tutor reply came from.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReplyOrigin {
  Generated, // answered by the configured response generator
  Fallback,  // canned text after a missing/failed generator
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConversationTurn {
  pub topic: String,
  pub user_input: String,
  pub ai_response: String,
  pub origin: ReplyOrigin,
  pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
  Tenses,
  Articles,
  Prepositions,
  Vocabulary,
}

/// A practice question with one accepted answer. `options` is empty for
/// fill-in-the-blank questions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
  pub id: String,
  pub category: ExerciseCategory,
  pub prompt: String,
  #[serde(default)] pub options: Vec<String>,
  pub answer: String,
  #[serde(default)] pub explanation: String,
}

/// What the learner sees before answering.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ExerciseView {
  pub id: String,
  pub category: ExerciseCategory,
  pub prompt: String,
  pub options: Vec<String>,
}

impl From<&Exercise> for ExerciseView {
  fn from(e: &Exercise) -> Self {
    Self { id: e.id.clone(), category: e.category, prompt: e.prompt.clone(), options: e.options.clone() }
  }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WordOfDay {
  pub word: String,
  pub phonetic: String,
  pub part_of_speech: String,
  pub meaning: String,
  pub example: String,
  #[serde(default)] pub synonyms: Vec<String>,
  #[serde(default)] pub antonyms: Vec<String>,
  #[serde(default)] pub origin: String,
  #[serde(default)] pub difficulty: Difficulty,
  #[serde(default)] pub category: String,
}
