//! Application state: assessor, tutor, live sessions, prompts and practice content.
//!
//! This module owns:
//!   - the stateless text assessor
//!   - the tutor (optional OpenAI generator + fallback policy)
//!   - the session store
//!   - prompts and practice content (from TOML or built-in seeds)

use std::{sync::Arc, time::Duration};
use tracing::{info, instrument};

use crate::assessment::TextAssessor;
use crate::config::{load_agent_config_from_env, AgentConfig, Prompts};
use crate::domain::{Difficulty, Exercise, PracticePhrase, TargetSound, Topic, WordOfDay};
use crate::openai::OpenAI;
use crate::seeds::{default_topic, seed_exercises, seed_phrases, seed_sounds, seed_topics, seed_words_of_day};
use crate::session::SessionStore;
use crate::tutor::{FallbackPolicy, ResponseGenerator, Tutor};

pub struct AppState {
    pub assessor: TextAssessor,
    pub tutor: Tutor,
    pub sessions: SessionStore,
    pub prompts: Prompts,
    pub topics: Vec<Topic>,
    pub phrases: Vec<PracticePhrase>,
    pub sounds: Vec<TargetSound>,
    pub exercises: Vec<Exercise>,
    pub words_of_day: Vec<WordOfDay>,
}

impl AppState {
    /// Build state from env: load config, init OpenAI if a key is present.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_agent_config_from_env().unwrap_or_default();
        let timeout = Duration::from_secs(cfg.tutor.timeout_secs);

        let generator = OpenAI::from_env(timeout).map(|oa| {
            info!(target: "english_tutor", base_url = %oa.base_url, model = %oa.model, "OpenAI enabled.");
            Arc::new(oa) as Arc<dyn ResponseGenerator>
        });
        if generator.is_none() {
            info!(target: "english_tutor", "No response generator. Using canned replies.");
        }

        Self::from_config(cfg, generator)
    }

    /// Assemble state from an already-loaded config and an injected generator.
    pub fn from_config(cfg: AgentConfig, generator: Option<Arc<dyn ResponseGenerator>>) -> Self {
        let AgentConfig { prompts, tutor, topics, phrases, exercises } = cfg;

        let fallback = match tutor.fallback_seed {
            Some(seed) => FallbackPolicy::seeded(tutor.fallback_replies, seed),
            None => FallbackPolicy::from_entropy(tutor.fallback_replies),
        };
        let tutor = Tutor::new(generator, fallback, Duration::from_secs(tutor.timeout_secs));

        let topics = if topics.is_empty() { seed_topics() } else { topics };
        let phrases = if phrases.is_empty() { seed_phrases() } else { phrases };
        let exercises = if exercises.is_empty() { seed_exercises() } else { exercises };
        info!(
            target: "english_tutor",
            topics = topics.len(),
            phrases = phrases.len(),
            exercises = exercises.len(),
            "Practice content ready"
        );

        Self {
            assessor: TextAssessor::new(),
            tutor,
            sessions: SessionStore::default(),
            prompts,
            topics,
            phrases,
            sounds: seed_sounds(),
            exercises,
            words_of_day: seed_words_of_day(),
        }
    }

    /// Case-insensitive topic lookup; unknown names get the general tutor.
    pub fn topic(&self, name: &str) -> Topic {
        self.topics
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
            .cloned()
            .unwrap_or_else(default_topic)
    }

    pub fn exercise(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    pub fn phrases_for(&self, difficulty: Option<Difficulty>) -> Vec<PracticePhrase> {
        self.phrases
            .iter()
            .filter(|p| difficulty.map_or(true, |d| p.difficulty == d))
            .cloned()
            .collect()
    }
}
