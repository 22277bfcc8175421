//! Emotional Lexicon
//!
//! Supportive phrases grouped by emotion.

use crate::error::{TutorError, TutorResult};
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

const BUNDLED_LEXICON: &str = include_str!("../data/lexicon.json");

/// Emotion categories the tutor can respond to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmotionTag {
    Stress,
    Frustration,
    Motivation,
    Confidence,
}

impl fmt::Display for EmotionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EmotionTag::Stress => "STRESS",
            EmotionTag::Frustration => "FRUSTRATION",
            EmotionTag::Motivation => "MOTIVATION",
            EmotionTag::Confidence => "CONFIDENCE",
        };
        f.write_str(name)
    }
}

/// Emotion tag -> candidate phrases
#[derive(Debug, Clone)]
pub struct EmotionalLexicon {
    entries: BTreeMap<EmotionTag, Vec<String>>,
}

impl EmotionalLexicon {
    pub fn new(entries: BTreeMap<EmotionTag, Vec<String>>) -> TutorResult<Self> {
        if let Some((tag, _)) = entries.iter().find(|(_, phrases)| phrases.is_empty()) {
            return Err(TutorError::Config(format!(
                "emotion '{}' has no phrases",
                tag
            )));
        }
        Ok(Self { entries })
    }

    pub fn bundled() -> TutorResult<Self> {
        Self::from_json(BUNDLED_LEXICON)
    }

    pub fn from_json(json: &str) -> TutorResult<Self> {
        let entries: BTreeMap<EmotionTag, Vec<String>> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn load(path: &Path) -> TutorResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let lexicon = Self::from_json(&content)?;
        info!("💬 Loaded {} emotion entries from {:?}", lexicon.entries.len(), path);
        Ok(lexicon)
    }

    pub fn phrases(&self, tag: EmotionTag) -> &[String] {
        self.entries.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Draw one phrase uniformly at random
    pub fn pick(&self, tag: EmotionTag, rng: &mut dyn RngCore) -> Option<&str> {
        let phrase = self.phrases(tag).choose(rng).map(String::as_str);
        debug!("Picked {} phrase: {:?}", tag, phrase);
        phrase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bundled_lexicon() {
        let lexicon = EmotionalLexicon::bundled().expect("bundled lexicon must parse");
        for tag in [
            EmotionTag::Stress,
            EmotionTag::Frustration,
            EmotionTag::Motivation,
            EmotionTag::Confidence,
        ] {
            assert_eq!(lexicon.phrases(tag).len(), 3, "{} phrases", tag);
        }
    }

    #[test]
    fn test_pick_is_member_and_seeded() {
        let lexicon = EmotionalLexicon::bundled().unwrap();
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);

        for _ in 0..10 {
            let pa = lexicon.pick(EmotionTag::Frustration, &mut a).unwrap();
            let pb = lexicon.pick(EmotionTag::Frustration, &mut b).unwrap();
            assert_eq!(pa, pb);
            assert!(lexicon
                .phrases(EmotionTag::Frustration)
                .iter()
                .any(|p| p == pa));
        }
    }

    #[test]
    fn test_missing_tag_yields_none() {
        let mut entries = BTreeMap::new();
        entries.insert(EmotionTag::Stress, vec!["Breathe.".to_string()]);
        let lexicon = EmotionalLexicon::new(entries).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(lexicon.pick(EmotionTag::Confidence, &mut rng).is_none());
        assert_eq!(lexicon.pick(EmotionTag::Stress, &mut rng), Some("Breathe."));
    }

    #[test]
    fn test_rejects_empty_phrase_list() {
        let json = r#"{"STRESS": []}"#;
        assert!(matches!(
            EmotionalLexicon::from_json(json),
            Err(TutorError::Config(_))
        ));
    }

    #[test]
    fn test_unknown_tag_is_json_error() {
        let json = r#"{"BOREDOM": ["zzz"]}"#;
        assert!(matches!(
            EmotionalLexicon::from_json(json),
            Err(TutorError::Json(_))
        ));
    }
}
