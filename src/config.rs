//! Loading agent configuration (prompts, tutor policy, practice content) from TOML.
//!
//! See `AgentConfig`, `Prompts` and `TutorCfg` for the expected schema.

use serde::Deserialize;
use tracing::{info, error};

use crate::domain::{Exercise, PracticePhrase, Topic};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AgentConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub tutor: TutorCfg,
  /// Replaces the built-in topics when non-empty.
  #[serde(default)]
  pub topics: Vec<Topic>,
  /// Replaces the built-in pronunciation phrases when non-empty.
  #[serde(default)]
  pub phrases: Vec<PracticePhrase>,
  /// Replaces the built-in grammar and vocabulary exercises when non-empty.
  #[serde(default)]
  pub exercises: Vec<Exercise>,
}

/// Fallback and timeout policy for the tutor.
#[derive(Clone, Debug, Deserialize)]
pub struct TutorCfg {
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
  /// Fixes the canned-reply sequence (tests, demos). Random when absent.
  #[serde(default)]
  pub fallback_seed: Option<u64>,
  /// Canned conversation replies; built-in list when empty.
  #[serde(default)]
  pub fallback_replies: Vec<String>,
}

fn default_timeout_secs() -> u64 { 20 }

impl Default for TutorCfg {
  fn default() -> Self {
    Self { timeout_secs: default_timeout_secs(), fallback_seed: None, fallback_replies: Vec::new() }
  }
}

/// Prompts used by the response generator. Defaults suit an English tutor;
/// override them in TOML to tune tone/structure.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub conversation_system: String,
  pub conversation_user_template: String,
  pub grammar_system: String,
  pub grammar_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      conversation_system: "You are a friendly English tutor helping a student practice. You play the {tutor_role}; the student is the {learner_role}.".into(),
      conversation_user_template: "Student level: {level}\nTopic: {topic}\n\nPrevious conversation:\n{history}\n\nStudent says: \"{text}\"\n\nRespond naturally as a tutor:\n1. First, correct any mistakes gently if needed\n2. Then continue the conversation naturally\n3. Ask open-ended questions to encourage speaking\n4. Keep responses concise (2-3 sentences)".into(),
      grammar_system: "You are an English teacher. Correct any grammar mistakes in the following text. Return only the corrected text.".into(),
      grammar_user_template: "{text}".into(),
    }
  }
}

/// Attempt to load `AgentConfig` from AGENT_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_agent_config_from_env() -> Option<AgentConfig> {
  let path = std::env::var("AGENT_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_agent_config(&s) {
      Ok(cfg) => {
        info!(target: "english_tutor", %path, topics = cfg.topics.len(), phrases = cfg.phrases.len(), "Loaded agent config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "english_tutor", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "english_tutor", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

pub fn parse_agent_config(s: &str) -> Result<AgentConfig, toml::de::Error> {
  toml::from_str::<AgentConfig>(s)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Difficulty;

  #[test]
  fn empty_file_gives_defaults() {
    let cfg = parse_agent_config("").expect("empty TOML parses");
    assert_eq!(cfg.tutor.timeout_secs, 20);
    assert!(cfg.tutor.fallback_seed.is_none());
    assert!(cfg.topics.is_empty());
    assert!(cfg.exercises.is_empty());
    assert!(cfg.prompts.grammar_system.contains("English teacher"));
  }

  #[test]
  fn partial_sections_keep_other_defaults() {
    let cfg = parse_agent_config(
      r#"
        [prompts]
        grammar_system = "Fix it."

        [tutor]
        timeout_secs = 3
        fallback_seed = 7
        fallback_replies = ["Tell me more."]

        [[topics]]
        name = "Sports"
        learner_role = "Fan"
        tutor_role = "Coach"

        [[phrases]]
        difficulty = "advanced"
        text = "Red lorry, yellow lorry."

        [[exercises]]
        id = "idioms-1"
        category = "vocabulary"
        prompt = "It's raining cats and ______."
        answer = "dogs"
      "#,
    )
    .expect("config parses");

    assert_eq!(cfg.prompts.grammar_system, "Fix it.");
    assert!(cfg.prompts.conversation_system.contains("English tutor"));
    assert_eq!(cfg.tutor.timeout_secs, 3);
    assert_eq!(cfg.tutor.fallback_seed, Some(7));
    assert_eq!(cfg.tutor.fallback_replies, vec!["Tell me more.".to_string()]);
    assert_eq!(cfg.topics[0].tutor_role, "Coach");
    assert!(cfg.topics[0].scenes.is_empty());
    assert_eq!(cfg.phrases[0].difficulty, Difficulty::Advanced);
    assert_eq!(cfg.exercises[0].answer, "dogs");
    assert!(cfg.exercises[0].options.is_empty());
    assert!(cfg.exercises[0].explanation.is_empty());
  }

  #[test]
  fn malformed_file_is_an_error() {
    assert!(parse_agent_config("[tutor]\ntimeout_secs = \"soon\"").is_err());
  }
}
