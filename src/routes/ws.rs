//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::exercises;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::logic::*;
use crate::state::AppState;

#[instrument(level = "info", skip(ws, state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "english_tutor", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "english_tutor", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match respond(msg, &state).await {
      Step::Reply(reply) => {
        if let Err(e) = socket.send(reply).await {
          error!(target: "english_tutor", error = %e, "WS send error");
          break;
        }
      }
      Step::Skip => {}
      Step::Close => break,
    }
  }
  info!(target: "english_tutor", "WebSocket disconnected");
}

/// What the connection loop does with one incoming frame.
#[derive(Debug)]
enum Step {
  Reply(Message),
  Skip,
  Close,
}

async fn respond(msg: Message, state: &AppState) -> Step {
  match msg {
    Message::Text(txt) => Step::Reply(Message::Text(dispatch_text(&txt, state).await)),
    Message::Ping(payload) => Step::Reply(Message::Pong(payload)),
    Message::Close(_) => Step::Close,
    _ => Step::Skip,
  }
}

/// Parse, dispatch, serialize response.
async fn dispatch_text(txt: &str, state: &AppState) -> String {
  let reply_msg = match serde_json::from_str::<ClientWsMessage>(txt) {
    Ok(incoming) => {
      debug!(target: "english_tutor", "WS received: {:?}", &incoming);
      handle_client_ws(incoming, state).await
    }
    Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
  };

  serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  })
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::Assess { text, kind, session_id } => {
      match assess_text(state, session_id, kind, &text).await {
        Ok(assessment) => ServerWsMessage::Assessment { assessment },
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      }
    }

    ClientWsMessage::Converse { session_id, topic, text } => {
      match converse(state, session_id, topic.as_deref(), &text).await {
        Ok(out) => ServerWsMessage::Conversation(out),
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      }
    }

    ClientWsMessage::CorrectGrammar { text } => {
      ServerWsMessage::GrammarCorrection(correct_grammar(state, &text).await)
    }

    ClientWsMessage::ListTopics => ServerWsMessage::Topics { topics: state.topics.clone() },

    ClientWsMessage::ListPhrases { difficulty } => {
      ServerWsMessage::Phrases { phrases: state.phrases_for(difficulty) }
    }

    ClientWsMessage::ListExercises { category } => {
      ServerWsMessage::Exercises { exercises: exercises::list(&state.exercises, category) }
    }

    ClientWsMessage::CheckAnswer { exercise_id, answer, session_id } => {
      match check_exercise(state, session_id, &exercise_id, &answer).await {
        Ok(check) => ServerWsMessage::AnswerChecked(check),
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      }
    }

    ClientWsMessage::VocabularyQuiz { count } => {
      ServerWsMessage::Exercises { exercises: vocabulary_quiz(state, count) }
    }

    ClientWsMessage::WordOfDay => match todays_word(state) {
      Ok(word) => ServerWsMessage::WordOfDay { word },
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },
  }
}
