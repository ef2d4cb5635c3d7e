//! Learner sessions: vocabulary list, conversation history, progress counters.
//!
//! A `Session` is a plain value mutated only through its methods. The
//! `SessionStore` owns the live ones: created at session start, changed via
//! `update`, dropped by `end`. Nothing is persisted.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{ConversationTurn, Difficulty, VocabularyEntry};

const POINTS_PER_TURN: u32 = 10;
const POINTS_PER_WORD: u32 = 5;
const POINTS_PER_ASSESSMENT: u32 = 2;
const POINTS_PER_CORRECT_ANSWER: u32 = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
  #[error("unknown session: {0}")]
  NotFound(Uuid),
  #[error("'{0}' is already in the vocabulary list")]
  DuplicateWord(String),
  #[error("'{0}' is not in the vocabulary list")]
  UnknownWord(String),
  #[error("word must not be empty")]
  EmptyWord,
}

/// Input for `Session::add_word`; timestamps are set by the session.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewWord {
  pub word: String,
  #[serde(default)] pub meaning: String,
  #[serde(default)] pub phonetic: String,
  #[serde(default)] pub example: String,
  #[serde(default)] pub category: String,
  #[serde(default)] pub difficulty: Difficulty,
}

/// Vocabulary list query: case-insensitive substring search plus difficulty.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct WordFilter {
  #[serde(default)] pub search: Option<String>,
  #[serde(default)] pub difficulty: Option<Difficulty>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SessionStats {
  pub id: Uuid,
  pub username: String,
  pub level: String,
  pub started_at: DateTime<Utc>,
  pub points: u32,
  pub vocabulary: usize,
  pub conversations: usize,
  pub assessments: u32,
  pub exercises_attempted: u32,
  pub exercises_correct: u32,
}

#[derive(Clone, Debug)]
pub struct Session {
  id: Uuid,
  username: String,
  level: String,
  created_at: DateTime<Utc>,
  vocabulary: Vec<VocabularyEntry>,
  history: Vec<ConversationTurn>,
  assessments: u32,
  exercises_attempted: u32,
  exercises_correct: u32,
  points: u32,
}

impl Session {
  pub fn new(username: impl Into<String>, level: impl Into<String>) -> Self {
    Self {
      id: Uuid::new_v4(),
      username: username.into(),
      level: level.into(),
      created_at: Utc::now(),
      vocabulary: Vec::new(),
      history: Vec::new(),
      assessments: 0,
      exercises_attempted: 0,
      exercises_correct: 0,
      points: 0,
    }
  }

  pub fn id(&self) -> Uuid { self.id }
  pub fn level(&self) -> &str { &self.level }

  pub fn add_word(&mut self, new: NewWord) -> Result<VocabularyEntry, SessionError> {
    let word = new.word.trim().to_string();
    if word.is_empty() {
      return Err(SessionError::EmptyWord);
    }
    if self.vocabulary.iter().any(|e| e.word.to_lowercase() == word.to_lowercase()) {
      return Err(SessionError::DuplicateWord(word));
    }
    self.vocabulary.push(VocabularyEntry {
      word,
      meaning: new.meaning,
      phonetic: new.phonetic,
      example: new.example,
      category: new.category,
      difficulty: new.difficulty,
      mastery: 0,
      added_at: Utc::now(),
    });
    self.points += POINTS_PER_WORD;
    Ok(self.vocabulary[self.vocabulary.len() - 1].clone())
  }

  /// Mastery is clamped to 100.
  pub fn set_mastery(&mut self, word: &str, mastery: u8) -> Result<(), SessionError> {
    let needle = word.trim().to_lowercase();
    let entry = self.vocabulary
      .iter_mut()
      .find(|e| e.word.to_lowercase() == needle)
      .ok_or_else(|| SessionError::UnknownWord(word.trim().to_string()))?;
    entry.mastery = mastery.min(100);
    Ok(())
  }

  /// Matching entries in insertion order.
  pub fn words(&self, filter: &WordFilter) -> Vec<VocabularyEntry> {
    let search = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_lowercase);
    self.vocabulary
      .iter()
      .filter(|e| search.as_deref().map_or(true, |s| e.word.to_lowercase().contains(s)))
      .filter(|e| filter.difficulty.map_or(true, |d| e.difficulty == d))
      .cloned()
      .collect()
  }

  pub fn record_turn(&mut self, turn: ConversationTurn) {
    self.history.push(turn);
    self.points += POINTS_PER_TURN;
  }

  /// Wrong answers count as attempts but earn nothing.
  pub fn record_exercise(&mut self, correct: bool) {
    self.exercises_attempted += 1;
    if correct {
      self.exercises_correct += 1;
      self.points += POINTS_PER_CORRECT_ANSWER;
    }
  }

  pub fn record_assessment(&mut self) {
    self.assessments += 1;
    self.points += POINTS_PER_ASSESSMENT;
  }

  pub fn history(&self) -> &[ConversationTurn] { &self.history }

  pub fn stats(&self) -> SessionStats {
    SessionStats {
      id: self.id,
      username: self.username.clone(),
      level: self.level.clone(),
      started_at: self.created_at,
      points: self.points,
      vocabulary: self.vocabulary.len(),
      conversations: self.history.len(),
      assessments: self.assessments,
      exercises_attempted: self.exercises_attempted,
      exercises_correct: self.exercises_correct,
    }
  }
}

/// In-memory registry of live sessions.
#[derive(Default)]
pub struct SessionStore {
  sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionStore {
  #[instrument(level = "info", skip(self))]
  pub async fn create(&self, username: &str, level: &str) -> SessionStats {
    let session = Session::new(username, level);
    let stats = session.stats();
    self.sessions.write().await.insert(session.id(), session);
    info!(target: "english_tutor", id = %stats.id, "Session started");
    stats
  }

  /// Snapshot copy; mutations go through `update`.
  pub async fn get(&self, id: Uuid) -> Result<Session, SessionError> {
    self.sessions.read().await.get(&id).cloned().ok_or(SessionError::NotFound(id))
  }

  pub async fn update<T>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> T) -> Result<T, SessionError> {
    let mut sessions = self.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
    Ok(f(session))
  }

  #[instrument(level = "info", skip(self))]
  pub async fn end(&self, id: Uuid) -> Result<SessionStats, SessionError> {
    let session = self.sessions.write().await.remove(&id).ok_or(SessionError::NotFound(id))?;
    info!(target: "english_tutor", %id, "Session ended");
    Ok(session.stats())
  }
}
