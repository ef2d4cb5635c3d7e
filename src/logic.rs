//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Assessing text (one or all scorers), crediting the session if any
//!   - Conversation turns: tutor reply + heuristic feedback, recorded on the session
//!   - Grammar correction via the tutor, paired with the heuristic report
//!   - Exercise answers, vocabulary quiz, word of the day, achievements

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::assessment::{Assessment, AssessmentKind};
use crate::domain::{ConversationTurn, ExerciseView, ReplyOrigin, WordOfDay};
use crate::error::ApiError;
use crate::exercises::{self, AnswerCheck};
use crate::progress::{achievements, Achievement};
use crate::protocol::{ConversationOut, GrammarCorrectionOut};
use crate::state::AppState;
use crate::tutor::ConversationRequest;
use crate::util::trunc_for_log;

/// How many previous turns are sent to the generator as context.
const HISTORY_TURNS: usize = 6;
const DEFAULT_LEVEL: &str = "B1 Intermediate";
const DEFAULT_QUIZ_LEN: usize = 5;

#[instrument(level = "info", skip(state, text), fields(text_len = text.len(), has_session = session_id.is_some()))]
pub async fn assess_text(
  state: &AppState,
  session_id: Option<Uuid>,
  kind: AssessmentKind,
  text: &str,
) -> Result<Assessment, ApiError> {
  credit_assessment(state, session_id).await?;
  Ok(state.assessor.assess(kind, text))
}

/// Counts an assessment towards the session's progress, if one is given.
pub async fn credit_assessment(state: &AppState, session_id: Option<Uuid>) -> Result<(), ApiError> {
  if let Some(id) = session_id {
    state.sessions.update(id, |s| s.record_assessment()).await?;
  }
  Ok(())
}

#[instrument(level = "info", skip(state, text), fields(text_len = text.len(), has_session = session_id.is_some()))]
pub async fn converse(
  state: &AppState,
  session_id: Option<Uuid>,
  topic: Option<&str>,
  text: &str,
) -> Result<ConversationOut, ApiError> {
  let text = text.trim();
  if text.is_empty() {
    return Err(ApiError::InvalidRequest("text must not be empty".into()));
  }
  let topic = state.topic(topic.unwrap_or_default());

  // Unknown sessions fail before we spend a model call.
  let (level, history) = match session_id {
    Some(id) => {
      let session = state.sessions.get(id).await?;
      (session.level().to_string(), render_history(session.history()))
    }
    None => (DEFAULT_LEVEL.to_string(), String::new()),
  };

  let req = ConversationRequest { topic: topic.clone(), level, history, text: text.to_string() };
  let reply = state.tutor.converse(&state.prompts, &req).await;
  let feedback = state.assessor.assess_grammar(text);
  debug!(target: "tutor", reply = %trunc_for_log(&reply.text, 80), origin = ?reply.origin, "Tutor replied");

  if let Some(id) = session_id {
    let turn = ConversationTurn {
      topic: topic.name.clone(),
      user_input: text.to_string(),
      ai_response: reply.text.clone(),
      origin: reply.origin,
      timestamp: Utc::now(),
    };
    state.sessions.update(id, |s| s.record_turn(turn)).await?;
  }

  info!(target: "tutor", topic = %topic.name, origin = ?reply.origin, issues = feedback.error_count, "Conversation turn served");
  Ok(ConversationOut { topic: topic.name, reply, feedback })
}

#[instrument(level = "info", skip(state, text), fields(text_len = text.len()))]
pub async fn correct_grammar(state: &AppState, text: &str) -> GrammarCorrectionOut {
  let reply = state.tutor.correct_grammar(&state.prompts, text).await;
  let report = state.assessor.assess_grammar(text);
  let feedback = match reply.origin {
    ReplyOrigin::Generated => "Grammar checked by AI".to_string(),
    ReplyOrigin::Fallback => "No grammar check available. Please check with a teacher.".to_string(),
  };
  GrammarCorrectionOut {
    original: text.to_string(),
    corrected: reply.text,
    origin: reply.origin,
    feedback,
    report,
    error: reply.error,
  }
}

#[instrument(level = "info", skip(state, answer), fields(has_session = session_id.is_some()))]
pub async fn check_exercise(
  state: &AppState,
  session_id: Option<Uuid>,
  exercise_id: &str,
  answer: &str,
) -> Result<AnswerCheck, ApiError> {
  let exercise = state
    .exercise(exercise_id)
    .ok_or_else(|| ApiError::NotFound(format!("unknown exercise: {exercise_id}")))?;
  let check = exercises::check_answer(exercise, answer);
  if let Some(id) = session_id {
    state.sessions.update(id, |s| s.record_exercise(check.correct)).await?;
  }
  info!(target: "english_tutor", exercise = %exercise.id, correct = check.correct, "Exercise answer checked");
  Ok(check)
}

pub fn vocabulary_quiz(state: &AppState, count: Option<usize>) -> Vec<ExerciseView> {
  exercises::quiz(&state.exercises, count.unwrap_or(DEFAULT_QUIZ_LEN), &mut rand::thread_rng())
}

pub fn todays_word(state: &AppState) -> Result<WordOfDay, ApiError> {
  exercises::word_of_day(&state.words_of_day, Utc::now().date_naive())
    .cloned()
    .ok_or_else(|| ApiError::NotFound("no word of the day configured".into()))
}

pub async fn session_achievements(state: &AppState, session_id: Uuid) -> Result<Vec<Achievement>, ApiError> {
  let stats = state.sessions.get(session_id).await?.stats();
  Ok(achievements(&stats))
}

fn render_history(turns: &[ConversationTurn]) -> String {
  let start = turns.len().saturating_sub(HISTORY_TURNS);
  turns[start..]
    .iter()
    .map(|t| format!("Student: {}\nTutor: {}", t.user_input, t.ai_response))
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;
  use std::time::Duration;

  use super::*;
  use crate::config::AgentConfig;
  use crate::assessment::grammar::{CONTRACTIONS, LOWERCASE_I};
  use crate::session::SessionError;
  use crate::tutor::tests::StubGenerator;
  use crate::tutor::ResponseGenerator;

  fn offline_state() -> AppState {
    let mut cfg = AgentConfig::default();
    cfg.tutor.fallback_seed = Some(3);
    AppState::from_config(cfg, None)
  }

  fn online_state() -> AppState {
    let generator: Arc<dyn ResponseGenerator> = Arc::new(StubGenerator { delay: Duration::ZERO, fail: false });
    AppState::from_config(AgentConfig::default(), Some(generator))
  }

  #[tokio::test]
  async fn assessment_credits_the_session() {
    let state = offline_state();
    let stats = state.sessions.create("Student", "B1").await;
    let a = assess_text(&state, Some(stats.id), AssessmentKind::All, "I am happy.").await.expect("assessed");
    assert_eq!(a.pronunciation.map(|p| p.complexity_score), Some(11.0));
    assert_eq!(state.sessions.get(stats.id).await.expect("live").stats().assessments, 1);
  }

  #[tokio::test]
  async fn assessment_with_unknown_session_fails() {
    let state = offline_state();
    let id = Uuid::new_v4();
    let err = assess_text(&state, Some(id), AssessmentKind::Grammar, "hi").await.unwrap_err();
    assert!(matches!(err, ApiError::Session(SessionError::NotFound(x)) if x == id));
  }

  #[tokio::test]
  async fn offline_conversation_uses_fallback_and_records_turn() {
    let state = offline_state();
    let stats = state.sessions.create("Student", "B1").await;
    let out = converse(&state, Some(stats.id), Some("restaurant"), "i dont know what to order").await.expect("served");

    assert_eq!(out.topic, "Restaurant");
    assert_eq!(out.reply.origin, ReplyOrigin::Fallback);
    assert_eq!(out.feedback.issues, vec![LOWERCASE_I.to_string(), CONTRACTIONS.to_string()]);

    let session = state.sessions.get(stats.id).await.expect("live");
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history()[0].ai_response, out.reply.text);
  }

  #[tokio::test]
  async fn conversation_rejects_blank_text() {
    let state = offline_state();
    let err = converse(&state, None, None, "   ").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest(_)));
  }

  #[tokio::test]
  async fn generated_correction_is_reported_as_such() {
    let state = online_state();
    let out = correct_grammar(&state, "yesterday i go home").await;
    assert_eq!(out.origin, ReplyOrigin::Generated);
    assert_eq!(out.corrected, "yesterday I go home");
    assert_eq!(out.feedback, "Grammar checked by AI");
    assert_eq!(out.report.issues, vec![LOWERCASE_I.to_string()]);
  }

  #[tokio::test]
  async fn exercise_answers_credit_the_session() {
    let state = offline_state();
    let stats = state.sessions.create("Student", "B1").await;

    let hit = check_exercise(&state, Some(stats.id), "tenses-3", "Visited").await.expect("checked");
    assert!(hit.correct);
    let miss = check_exercise(&state, Some(stats.id), "articles-1", "a").await.expect("checked");
    assert!(!miss.correct);
    assert_eq!(miss.expected, "an");

    let after = state.sessions.get(stats.id).await.expect("live").stats();
    assert_eq!((after.exercises_attempted, after.exercises_correct), (2, 1));
  }

  #[tokio::test]
  async fn unknown_exercise_is_not_found() {
    let state = offline_state();
    let err = check_exercise(&state, None, "tenses-99", "go").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(ref m) if m.contains("tenses-99")));
  }

  #[tokio::test]
  async fn achievements_follow_session_progress() {
    let state = offline_state();
    let stats = state.sessions.create("Student", "B1").await;
    converse(&state, Some(stats.id), Some("Travel"), "Where is the station?").await.expect("served");

    let list = session_achievements(&state, stats.id).await.expect("listed");
    let first = list.iter().find(|a| a.id == "first_conversation").expect("listed");
    assert!(first.unlocked);
    assert!(session_achievements(&state, Uuid::new_v4()).await.is_err());
  }

  #[test]
  fn quiz_defaults_to_five_questions() {
    let state = offline_state();
    assert_eq!(vocabulary_quiz(&state, None).len(), DEFAULT_QUIZ_LEN);
    assert_eq!(vocabulary_quiz(&state, Some(2)).len(), 2);
    assert!(todays_word(&state).is_ok());
  }

  #[test]
  fn history_keeps_only_recent_turns() {
    let turns: Vec<ConversationTurn> = (0..10)
      .map(|i| ConversationTurn {
        topic: "Travel".into(),
        user_input: format!("q{i}"),
        ai_response: format!("a{i}"),
        origin: ReplyOrigin::Generated,
        timestamp: Utc::now(),
      })
      .collect();
    let rendered = render_history(&turns);
    assert!(rendered.starts_with("Student: q4\nTutor: a4"));
    assert!(rendered.ends_with("Student: q9\nTutor: a9"));
    assert_eq!(render_history(&[]), "");
  }
}
