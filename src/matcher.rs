//! Answer Matching
//!
//! Decides whether a user's attempt satisfies a concept's canonical answer.

use crate::catalog::{Concept, RenderStyle};
use crate::core::TextNormalizer;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How attempts are compared with the canonical answer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Case-folded text must equal the rendered answer verbatim.
    /// Sequence answers therefore have to be typed as a list literal.
    #[default]
    Exact,
    /// Both sides are normalized and compared word by word
    Normalized,
}

/// Grades attempts against a concept
#[derive(Debug, Clone)]
pub struct AnswerMatcher {
    mode: MatchMode,
    style: RenderStyle,
    normalizer: TextNormalizer,
}

impl AnswerMatcher {
    pub fn new(mode: MatchMode, style: RenderStyle, normalizer: TextNormalizer) -> Self {
        Self {
            mode,
            style,
            normalizer,
        }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Rendered canonical answer, as shown to the user
    pub fn render(&self, concept: &Concept) -> String {
        concept.answer.render(&self.style)
    }

    pub fn matches(&self, user_text: &str, concept: &Concept) -> bool {
        let matched = match self.mode {
            MatchMode::Exact => user_text.to_lowercase() == self.render(concept).to_lowercase(),
            MatchMode::Normalized => {
                let attempt: Vec<String> = self.normalizer.normalize(user_text).words().collect();
                let expected: Vec<String> = concept
                    .answer
                    .items()
                    .into_iter()
                    .flat_map(|item| self.normalizer.normalize(item).words().collect::<Vec<_>>())
                    .collect();
                !expected.is_empty() && attempt == expected
            }
        };

        debug!(
            "Graded attempt for {} ({:?}): {}",
            concept.key,
            self.mode,
            if matched { "match" } else { "mismatch" }
        );
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CanonicalAnswer, ConceptCatalog, ConceptKey};
    use crate::core::LinguisticResources;
    use std::sync::Arc;

    fn matcher(mode: MatchMode) -> AnswerMatcher {
        let normalizer = TextNormalizer::new(Arc::new(LinguisticResources::bundled()));
        AnswerMatcher::new(mode, RenderStyle::default(), normalizer)
    }

    fn concept(key: &str) -> Concept {
        ConceptCatalog::bundled()
            .unwrap()
            .get(&ConceptKey::new(key))
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_exact_scalar_is_case_insensitive() {
        let m = matcher(MatchMode::Exact);
        assert_eq!(m.mode(), MatchMode::Exact);
        let sentiment = concept("SENTIMENT_ANALYSIS");
        assert!(m.matches("positive", &sentiment));
        assert!(m.matches("POSITIVE", &sentiment));
        assert!(!m.matches("positive!", &sentiment));
        assert!(!m.matches("negative", &sentiment));
    }

    #[test]
    fn test_exact_sequence_needs_list_literal() {
        let m = matcher(MatchMode::Exact);
        let lemma = concept("LEMMATIZATION");
        assert_eq!(m.render(&lemma), "['good', 'child']");
        assert!(m.matches("['good', 'child']", &lemma));
        assert!(m.matches("['GOOD', 'Child']", &lemma));
        assert!(!m.matches("good child", &lemma));
        assert!(!m.matches("good, child", &lemma));
    }

    #[test]
    fn test_normalized_sequence() {
        let m = matcher(MatchMode::Normalized);
        let tokenization = concept("TOKENIZATION");
        assert!(m.matches("Text, analysis, splits, text, into, manageable, parts", &tokenization));
        assert!(m.matches("text analysis splits text into manageable parts", &tokenization));
        assert!(m.matches("['Text', 'analysis', 'splits', 'text', 'into', 'manageable', 'parts']", &tokenization));
        assert!(!m.matches("analysis text splits text into manageable parts", &tokenization));
    }

    #[test]
    fn test_normalized_scalar() {
        let m = matcher(MatchMode::Normalized);
        assert!(m.matches("Positive.", &concept("SENTIMENT_ANALYSIS")));
        assert!(m.matches("virtual assistant like siri or alexa", &concept("SPEECH_RECOGNITION")));
        assert!(!m.matches("", &concept("SENTIMENT_ANALYSIS")));
    }

    #[test]
    fn test_normalized_inflection_reaches_dictionary_form() {
        let m = matcher(MatchMode::Normalized);
        let mut film = concept("SENTIMENT_ANALYSIS");
        film.answer = CanonicalAnswer::Scalar("movie".to_string());
        assert!(m.matches("Movies", &film));

        film.answer = CanonicalAnswer::Sequence(vec!["TV".to_string(), "series".to_string()]);
        assert!(m.matches("tv series", &film));
        assert!(!m.matches("tv sery", &film));
    }
}
