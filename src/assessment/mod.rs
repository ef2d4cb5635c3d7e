//! Heuristic text assessment: tokenization plus three independent scorers.
//!
//! Every function here is pure and total. Empty or punctuation-only input
//! produces zero/neutral reports, never an error. Input size is not bounded
//! here; the HTTP layer's body limit is the only cap.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

pub mod grammar;
pub mod pronunciation;
pub mod tokenizer;
pub mod vocabulary;

pub use grammar::GrammarReport;
pub use pronunciation::PronunciationComplexityReport;
pub use vocabulary::VocabularyReport;

/// Which scorer(s) a caller wants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
  Pronunciation,
  Vocabulary,
  Grammar,
  #[default]
  All,
}

/// Reports for one text sample. Fields are `None` when that scorer was not requested.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Assessment {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pronunciation: Option<PronunciationComplexityReport>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub vocabulary: Option<VocabularyReport>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub grammar: Option<GrammarReport>,
}

/// Stateless entry point. Cheap to copy and safe to share across tasks.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextAssessor;

impl TextAssessor {
  pub fn new() -> Self {
    Self
  }

  #[instrument(target = "assessment", level = "debug", skip(self, text), fields(text_len = text.len()))]
  pub fn assess_pronunciation(&self, text: &str) -> PronunciationComplexityReport {
    let report = pronunciation::score(text);
    debug!(target: "assessment", words = report.word_count, complexity = report.complexity_score, "pronunciation scored");
    report
  }

  #[instrument(target = "assessment", level = "debug", skip(self, text), fields(text_len = text.len()))]
  pub fn assess_vocabulary(&self, text: &str) -> VocabularyReport {
    let report = vocabulary::score(text);
    debug!(target: "assessment", total = report.total_words, uncommon = report.uncommon_word_count, score = report.vocabulary_score, "vocabulary scored");
    report
  }

  #[instrument(target = "assessment", level = "debug", skip(self, text), fields(text_len = text.len()))]
  pub fn assess_grammar(&self, text: &str) -> GrammarReport {
    let report = grammar::score(text);
    debug!(target: "assessment", errors = report.error_count, score = report.grammar_score, "grammar scored");
    report
  }

  pub fn assess(&self, kind: AssessmentKind, text: &str) -> Assessment {
    let wants = |k: AssessmentKind| kind == k || kind == AssessmentKind::All;
    Assessment {
      pronunciation: wants(AssessmentKind::Pronunciation).then(|| self.assess_pronunciation(text)),
      vocabulary: wants(AssessmentKind::Vocabulary).then(|| self.assess_vocabulary(text)),
      grammar: wants(AssessmentKind::Grammar).then(|| self.assess_grammar(text)),
    }
  }
}
