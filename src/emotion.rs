//! Emotion Classifier
//!
//! Keyword detector that flags a request for emotional support.

use crate::lexicon::EmotionTag;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A trigger word and the emotion it signals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionTrigger {
    pub word: String,
    pub emotion: EmotionTag,
}

impl EmotionTrigger {
    pub fn new(word: &str, emotion: EmotionTag) -> Self {
        Self {
            word: word.to_lowercase(),
            emotion,
        }
    }
}

/// Default trigger vocabulary, in priority order
pub fn default_triggers() -> Vec<EmotionTrigger> {
    vec![
        EmotionTrigger::new("stressed", EmotionTag::Stress),
        EmotionTrigger::new("frustrated", EmotionTag::Frustration),
        EmotionTrigger::new("motivation", EmotionTag::Motivation),
        EmotionTrigger::new("confidence", EmotionTag::Confidence),
    ]
}

#[derive(Debug, Clone)]
pub struct EmotionClassifier {
    triggers: Vec<EmotionTrigger>,
}

impl Default for EmotionClassifier {
    fn default() -> Self {
        Self::new(default_triggers())
    }
}

impl EmotionClassifier {
    pub fn new(triggers: Vec<EmotionTrigger>) -> Self {
        let triggers = triggers
            .into_iter()
            .filter(|t| !t.word.trim().is_empty())
            .map(|t| EmotionTrigger::new(&t.word, t.emotion))
            .collect();
        Self { triggers }
    }

    /// First emotion whose trigger word occurs anywhere in the message
    pub fn classify(&self, text: &str) -> Option<EmotionTag> {
        let text = text.to_lowercase();
        let found = self
            .triggers
            .iter()
            .find(|t| text.contains(&t.word))
            .map(|t| t.emotion);

        if let Some(emotion) = found {
            debug!("Emotion detected: {}", emotion);
        }
        found
    }
}
