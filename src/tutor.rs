//! Tutor capability seam.
//!
//! `ResponseGenerator` is whatever produces conversation replies and grammar
//! corrections (the OpenAI client in production, stubs in tests). `Tutor`
//! wraps an optional generator with a hard timeout and an injected
//! `FallbackPolicy`, and always answers: callers get a `TutorReply` that says
//! whether the text is generated or canned, and why.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::config::Prompts;
use crate::domain::{ReplyOrigin, Topic};
use crate::seeds::seed_fallback_replies;

#[derive(Debug, Error)]
pub enum TutorError {
  #[error("no response generator configured")]
  Unavailable,
  #[error("response generator timed out after {0:?}")]
  Timeout(Duration),
  #[error("upstream HTTP {status}: {message}")]
  Http { status: u16, message: String },
  #[error("transport error: {0}")]
  Transport(String),
  #[error("could not decode upstream response: {0}")]
  Decode(String),
  #[error("upstream returned an empty reply")]
  EmptyReply,
}

/// Everything a generator needs to answer one learner message.
#[derive(Clone, Debug)]
pub struct ConversationRequest {
  pub topic: Topic,
  pub level: String,
  /// Recent turns already rendered as "Student: ... / Tutor: ..." lines.
  pub history: String,
  pub text: String,
}

#[async_trait]
pub trait ResponseGenerator: Send + Sync {
  /// Short label for logs.
  fn name(&self) -> &str;

  async fn conversation_reply(&self, prompts: &Prompts, req: &ConversationRequest) -> Result<String, TutorError>;

  async fn correct_grammar(&self, prompts: &Prompts, text: &str) -> Result<String, TutorError>;
}

/// What to answer when the generator is missing or fails.
pub struct FallbackPolicy {
  replies: Vec<String>,
  rng: Mutex<StdRng>,
}

impl FallbackPolicy {
  /// Empty `replies` falls back to the built-in list.
  pub fn new(replies: Vec<String>, rng: StdRng) -> Self {
    let replies = if replies.is_empty() { seed_fallback_replies() } else { replies };
    Self { replies, rng: Mutex::new(rng) }
  }

  pub fn seeded(replies: Vec<String>, seed: u64) -> Self {
    Self::new(replies, StdRng::seed_from_u64(seed))
  }

  pub fn from_entropy(replies: Vec<String>) -> Self {
    Self::new(replies, StdRng::from_entropy())
  }

  pub fn conversation_reply(&self) -> String {
    let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    self.replies
      .choose(&mut *rng)
      .cloned()
      .unwrap_or_default()
  }

  /// Without a generator the best we can do is hand the text back unchanged.
  pub fn grammar_correction(&self, text: &str) -> String {
    text.trim().to_string()
  }
}

#[derive(Clone, Debug, Serialize)]
pub struct TutorReply {
  pub text: String,
  pub origin: ReplyOrigin,
  /// Why the fallback was used, if it was.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

pub struct Tutor {
  generator: Option<Arc<dyn ResponseGenerator>>,
  fallback: FallbackPolicy,
  timeout: Duration,
}

impl Tutor {
  pub fn new(generator: Option<Arc<dyn ResponseGenerator>>, fallback: FallbackPolicy, timeout: Duration) -> Self {
    Self { generator, fallback, timeout }
  }

  pub fn generator_name(&self) -> Option<&str> {
    self.generator.as_deref().map(|g| g.name())
  }

  #[instrument(target = "tutor", level = "info", skip(self, prompts, req), fields(topic = %req.topic.name, text_len = req.text.len()))]
  pub async fn converse(&self, prompts: &Prompts, req: &ConversationRequest) -> TutorReply {
    let result = match &self.generator {
      Some(g) => self.guarded(g.conversation_reply(prompts, req)).await,
      None => Err(TutorError::Unavailable),
    };
    self.settle(result, "conversation", || self.fallback.conversation_reply())
  }

  #[instrument(target = "tutor", level = "info", skip(self, prompts, text), fields(text_len = text.len()))]
  pub async fn correct_grammar(&self, prompts: &Prompts, text: &str) -> TutorReply {
    let result = match &self.generator {
      Some(g) => self.guarded(g.correct_grammar(prompts, text)).await,
      None => Err(TutorError::Unavailable),
    };
    self.settle(result, "grammar", || self.fallback.grammar_correction(text))
  }

  async fn guarded<F>(&self, call: F) -> Result<String, TutorError>
  where
    F: Future<Output = Result<String, TutorError>>,
  {
    match tokio::time::timeout(self.timeout, call).await {
      Ok(Ok(text)) if text.trim().is_empty() => Err(TutorError::EmptyReply),
      Ok(Ok(text)) => Ok(text.trim().to_string()),
      Ok(Err(e)) => Err(e),
      Err(_) => Err(TutorError::Timeout(self.timeout)),
    }
  }

  fn settle(&self, result: Result<String, TutorError>, task: &str, fallback: impl FnOnce() -> String) -> TutorReply {
    match result {
      Ok(text) => TutorReply { text, origin: ReplyOrigin::Generated, error: None },
      Err(e) => {
        if matches!(e, TutorError::Unavailable) {
          debug!(target: "tutor", %task, "No generator; serving fallback.");
        } else {
          error!(target: "tutor", %task, generator = ?self.generator_name(), error = %e, "Generator failed; serving fallback.");
        }
        TutorReply { text: fallback(), origin: ReplyOrigin::Fallback, error: Some(e.to_string()) }
      }
    }
  }
}
