//! Minimal OpenAI client for our use-cases.
//!
//! We only call chat.completions and request plain text.
//! Calls are instrumented and log model names, latencies, and token usage (not contents).
//!
//! NOTE: We never log the API key.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::Prompts;
use crate::tutor::{ConversationRequest, ResponseGenerator, TutorError};
use crate::util::fill_template;

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl OpenAI {
  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  /// A client that fails to build is logged and also yields None.
  pub fn from_env(timeout: Duration) -> Option<Self> {
    let Some(api_key) = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.trim().is_empty()) else {
      info!(target: "english_tutor", "OpenAI disabled (no OPENAI_API_KEY).");
      return None;
    };
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let model =
      std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());

    match Self::new(api_key, &base_url, model, timeout) {
      Ok(oa) => Some(oa),
      Err(e) => {
        error!(target: "english_tutor", error = %e, "OpenAI disabled: HTTP client could not be built.");
        None
      }
    }
  }

  pub fn new(api_key: String, base_url: &str, model: String, timeout: Duration) -> Result<Self, TutorError> {
    let client = reqwest::Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| TutorError::Transport(e.to_string()))?;
    let base_url = base_url.trim_end_matches('/').to_string();
    Ok(Self { client, api_key, base_url, model })
  }

  /// Plain-text chat completion.
  #[instrument(level = "info", skip(self, system, user), fields(model = %self.model))]
  async fn chat_plain(
    &self,
    system: &str,
    user: &str,
    temperature: f32,
    max_tokens: u32,
  ) -> Result<String, TutorError> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: self.model.clone(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature,
      max_tokens: Some(max_tokens),
    };

    let start = Instant::now();
    let res = self.client.post(&url)
      .header(USER_AGENT, "english-tutor-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await.map_err(|e| TutorError::Transport(e.to_string()))?;

    if !res.status().is_success() {
      let status = res.status().as_u16();
      let body = res.text().await.unwrap_or_default();
      let message = extract_openai_error(&body).unwrap_or(body);
      return Err(TutorError::Http { status, message });
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| TutorError::Decode(e.to_string()))?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, elapsed = ?start.elapsed(), "OpenAI usage");
    }
    let text = body.choices.first()
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default().trim().to_string();

    Ok(text)
  }
}

#[async_trait]
impl ResponseGenerator for OpenAI {
  fn name(&self) -> &str { "openai" }

  #[instrument(level = "info", skip(self, prompts, req), fields(topic = %req.topic.name, text_len = req.text.len()))]
  async fn conversation_reply(&self, prompts: &Prompts, req: &ConversationRequest) -> Result<String, TutorError> {
    let system = fill_template(
      &prompts.conversation_system,
      &[("tutor_role", req.topic.tutor_role.as_str()), ("learner_role", req.topic.learner_role.as_str())],
    );
    let history = if req.history.is_empty() { "(none)" } else { req.history.as_str() };
    let user = fill_template(
      &prompts.conversation_user_template,
      &[
        ("level", req.level.as_str()),
        ("topic", req.topic.name.as_str()),
        ("history", history),
        ("text", req.text.as_str()),
      ],
    );
    self.chat_plain(&system, &user, 0.7, 150).await
  }

  // Only the first line is kept; models like to append commentary.
  #[instrument(level = "info", skip(self, prompts, text), fields(text_len = text.len()))]
  async fn correct_grammar(&self, prompts: &Prompts, text: &str) -> Result<String, TutorError> {
    let user = fill_template(&prompts.grammar_user_template, &[("text", text)]);
    let out = self.chat_plain(&prompts.grammar_system, &user, 0.0, 100).await?;
    Ok(out.lines().next().unwrap_or_default().to_string())
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  max_tokens: Option<u32>,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
