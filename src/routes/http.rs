//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs basic request/result info.

use std::sync::Arc;
use axum::{extract::{Path, Query, State}, http::StatusCode, Json, response::IntoResponse};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::assessment::{Assessment, GrammarReport, PronunciationComplexityReport, VocabularyReport};
use crate::domain::{ConversationTurn, ExerciseView, PracticePhrase, TargetSound, Topic, VocabularyEntry, WordOfDay};
use crate::error::ApiError;
use crate::exercises::{self, AnswerCheck};
use crate::progress::Achievement;
use crate::logic::*;
use crate::protocol::*;
use crate::session::{NewWord, SessionStats, WordFilter};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthOut { ok: true, generator: state.tutor.generator_name().map(str::to_string) })
}

// --- Assessment ---

#[instrument(level = "info", skip(state, body), fields(kind = ?body.kind, text_len = body.text.len()))]
pub async fn http_post_assess(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AssessIn>,
) -> Result<Json<Assessment>, ApiError> {
  let assessment = assess_text(&state, body.session_id, body.kind, &body.text).await?;
  Ok(Json(assessment))
}

#[instrument(level = "info", skip(state, body), fields(text_len = body.text.len()))]
pub async fn http_post_assess_pronunciation(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AssessIn>,
) -> Result<Json<PronunciationComplexityReport>, ApiError> {
  credit_assessment(&state, body.session_id).await?;
  Ok(Json(state.assessor.assess_pronunciation(&body.text)))
}

#[instrument(level = "info", skip(state, body), fields(text_len = body.text.len()))]
pub async fn http_post_assess_vocabulary(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AssessIn>,
) -> Result<Json<VocabularyReport>, ApiError> {
  credit_assessment(&state, body.session_id).await?;
  Ok(Json(state.assessor.assess_vocabulary(&body.text)))
}

#[instrument(level = "info", skip(state, body), fields(text_len = body.text.len()))]
pub async fn http_post_assess_grammar(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AssessIn>,
) -> Result<Json<GrammarReport>, ApiError> {
  credit_assessment(&state, body.session_id).await?;
  Ok(Json(state.assessor.assess_grammar(&body.text)))
}

// --- Tutor ---

#[instrument(level = "info", skip(state, body), fields(text_len = body.text.len()))]
pub async fn http_post_grammar_correct(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GrammarIn>,
) -> impl IntoResponse {
  let out = correct_grammar(&state, &body.text).await;
  info!(target: "tutor", origin = ?out.origin, issues = out.report.error_count, "HTTP grammar correction served");
  Json(out)
}

#[instrument(level = "info", skip(state, body), fields(topic = ?body.topic, text_len = body.text.len()))]
pub async fn http_post_conversation(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ConversationIn>,
) -> Result<Json<ConversationOut>, ApiError> {
  let out = converse(&state, body.session_id, body.topic.as_deref(), &body.text).await?;
  Ok(Json(out))
}

// --- Practice content ---

#[instrument(level = "info", skip(state))]
pub async fn http_get_topics(State(state): State<Arc<AppState>>) -> Json<Vec<Topic>> {
  Json(state.topics.clone())
}

#[instrument(level = "info", skip(state), fields(difficulty = ?q.difficulty))]
pub async fn http_get_phrases(
  State(state): State<Arc<AppState>>,
  Query(q): Query<PhrasesQuery>,
) -> Json<Vec<PracticePhrase>> {
  Json(state.phrases_for(q.difficulty))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_sounds(State(state): State<Arc<AppState>>) -> Json<Vec<TargetSound>> {
  Json(state.sounds.clone())
}

// --- Exercises & vocabulary games ---

#[instrument(level = "info", skip(state), fields(category = ?q.category))]
pub async fn http_get_exercises(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ExercisesQuery>,
) -> Json<Vec<ExerciseView>> {
  Json(exercises::list(&state.exercises, q.category))
}

#[instrument(level = "info", skip(state, body), fields(has_session = body.session_id.is_some()))]
pub async fn http_post_exercise_answer(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(body): Json<AnswerIn>,
) -> Result<Json<AnswerCheck>, ApiError> {
  Ok(Json(check_exercise(&state, body.session_id, &id, &body.answer).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_word_of_day(State(state): State<Arc<AppState>>) -> Result<Json<WordOfDay>, ApiError> {
  Ok(Json(todays_word(&state)?))
}

#[instrument(level = "info", skip(state), fields(count = ?q.count))]
pub async fn http_get_quiz(
  State(state): State<Arc<AppState>>,
  Query(q): Query<QuizQuery>,
) -> Json<Vec<ExerciseView>> {
  Json(vocabulary_quiz(&state, q.count))
}

// --- Sessions ---

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_session(
  State(state): State<Arc<AppState>>,
  body: Option<Json<CreateSessionIn>>,
) -> impl IntoResponse {
  let body = body.map(|Json(b)| b).unwrap_or_default();
  let username = body.username.unwrap_or_else(|| "Student".into());
  let level = body.level.unwrap_or_else(|| "B1 Intermediate".into());
  let stats = state.sessions.create(&username, &level).await;
  (StatusCode::CREATED, Json(stats))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SessionStats>, ApiError> {
  Ok(Json(state.sessions.get(id).await?.stats()))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SessionStats>, ApiError> {
  Ok(Json(state.sessions.end(id).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_vocabulary(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Query(filter): Query<WordFilter>,
) -> Result<Json<Vec<VocabularyEntry>>, ApiError> {
  Ok(Json(state.sessions.get(id).await?.words(&filter)))
}

#[instrument(level = "info", skip(state, body), fields(word = %body.word))]
pub async fn http_post_vocabulary(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NewWord>,
) -> Result<impl IntoResponse, ApiError> {
  let entry = state.sessions.update(id, |s| s.add_word(body)).await??;
  Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(level = "info", skip(state, body), fields(word = %body.word, mastery = body.mastery))]
pub async fn http_put_mastery(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(body): Json<MasteryIn>,
) -> Result<StatusCode, ApiError> {
  state.sessions.update(id, |s| s.set_mastery(&body.word, body.mastery)).await??;
  Ok(StatusCode::NO_CONTENT)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_history(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<ConversationTurn>>, ApiError> {
  Ok(Json(state.sessions.get(id).await?.history().to_vec()))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_achievements(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Achievement>>, ApiError> {
  Ok(Json(session_achievements(&state, id).await?))
}
