//! Locale-naive English tokenization shared by every scorer.
//!
//! No handling of abbreviations, decimal numbers or non-Latin scripts:
//! "Dr. Smith" is two sentences and "3.5" is two words.

/// Maximal alphanumeric runs, in order of appearance, case preserved.
pub fn words(text: &str) -> Vec<&str> {
  text
    .split(|c: char| !c.is_alphanumeric())
    .filter(|w| !w.is_empty())
    .collect()
}

/// Fragments bounded by runs of `.`, `!`, `?` (or the text edges), trimmed.
/// A trailing fragment without terminal punctuation still counts.
pub fn sentences(text: &str) -> Vec<&str> {
  text
    .split(|c: char| matches!(c, '.' | '!' | '?'))
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .collect()
}
