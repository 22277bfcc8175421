//! Dialogue State Machine
//!
//! Routes each incoming message to the right handler and decides the
//! next session state.
//!
//! **Routing order:**
//! 1. "teach me the basics" → list the catalog
//! 2. Concept name → start teaching that concept
//! 3. "hint" / "answer" while a concept is active
//! 4. Any other text while a concept is active → grade it
//! 5. Emotion trigger → supportive phrase
//! 6. Help message

use crate::catalog::{Concept, ConceptCatalog, ConceptKey};
use crate::emotion::EmotionClassifier;
use crate::error::{TutorError, TutorResult};
use crate::lexicon::{EmotionTag, EmotionalLexicon};
use crate::matcher::AnswerMatcher;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;
use tracing::{debug, info, warn};

const START_PHRASE: &str = "teach me the basics";
const HINT_COMMAND: &str = "hint";
const ANSWER_COMMAND: &str = "answer";

const RETRY_MESSAGE: &str = "That's not quite right. Try again or type 'hint' for help, or 'answer' for the solution and explanation.";
const HELP_MESSAGE: &str = "I'm here to help! Type 'teach me the basics' to start learning or ask for 'hint' if you need help.";

/// Conversation state for one learner
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    active_concept: Option<ConceptKey>,
}

/// Observable state of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueState {
    /// No concept is being taught
    Idle,
    /// Waiting for an answer to this concept's task
    AwaitingAnswer(ConceptKey),
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_concept(&self) -> Option<&ConceptKey> {
        self.active_concept.as_ref()
    }

    pub fn state(&self) -> DialogueState {
        match &self.active_concept {
            Some(key) => DialogueState::AwaitingAnswer(key.clone()),
            None => DialogueState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.active_concept.is_none()
    }

    fn start(&mut self, key: ConceptKey) {
        info!("📖 Teaching {}", key);
        self.active_concept = Some(key);
    }

    fn clear(&mut self) {
        if let Some(key) = self.active_concept.take() {
            debug!("Session cleared (was {})", key);
        }
    }
}

/// What the learner meant by a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    StartSession,
    SelectConcept(ConceptKey),
    RequestHint,
    RequestAnswer,
    Attempt { correct: bool },
    Emotion(EmotionTag),
    Unrecognized,
}

/// One response to one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub intent: Intent,
    pub text: String,
}

impl Reply {
    fn new(intent: Intent, text: impl Into<String>) -> Self {
        Self {
            intent,
            text: text.into(),
        }
    }
}

/// The tutor: catalog, grading and emotional support behind one entry point
pub struct Tutor {
    catalog: Arc<ConceptCatalog>,
    lexicon: Arc<EmotionalLexicon>,
    matcher: AnswerMatcher,
    classifier: EmotionClassifier,
    rng: Box<dyn RngCore + Send>,
}

impl Tutor {
    pub fn new(
        catalog: Arc<ConceptCatalog>,
        lexicon: Arc<EmotionalLexicon>,
        matcher: AnswerMatcher,
        classifier: EmotionClassifier,
    ) -> Self {
        Self {
            catalog,
            lexicon,
            matcher,
            classifier,
            rng: Box::new(StdRng::from_entropy()),
        }
    }

    /// Replace the random source used to pick supportive phrases
    pub fn with_rng(mut self, rng: Box<dyn RngCore + Send>) -> Self {
        self.rng = rng;
        self
    }

    /// Seeded random source, for reproducible runs
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(Box::new(StdRng::seed_from_u64(seed)))
    }

    pub fn catalog(&self) -> &ConceptCatalog {
        &self.catalog
    }

    /// Handle one line of user input.
    ///
    /// Produces exactly one reply and mutates `session` at most once. The
    /// only error is a session pointing at a concept this catalog lacks; the
    /// session is reset to idle before it is returned.
    pub fn process_message(&mut self, session: &mut Session, raw: &str) -> TutorResult<Reply> {
        let text = raw.trim().to_lowercase();
        debug!("Processing message: '{}'", text);

        let active = match session.active_concept() {
            Some(key) => match self.catalog.get(key) {
                Some(concept) => Some(concept),
                None => {
                    let key = key.clone();
                    warn!("⚠️ Session refers to unknown concept {}, resetting", key);
                    session.clear();
                    return Err(TutorError::UnknownConceptKey(key));
                }
            },
            None => None,
        };

        if text.contains(START_PHRASE) {
            return Ok(Reply::new(Intent::StartSession, self.catalog_overview()));
        }

        if let Some(concept) = self.catalog.find_by_name(&text) {
            session.start(concept.key.clone());
            return Ok(Reply::new(
                Intent::SelectConcept(concept.key.clone()),
                format!("{}\nTask: {}", concept.explanation, concept.task),
            ));
        }

        if let Some(concept) = active {
            return Ok(self.handle_active(session, concept, &text));
        }

        if let Some(emotion) = self.classifier.classify(&text) {
            if let Some(phrase) = self.lexicon.pick(emotion, self.rng.as_mut()) {
                return Ok(Reply::new(Intent::Emotion(emotion), phrase));
            }
            warn!("No phrases configured for {}", emotion);
        }

        Ok(Reply::new(Intent::Unrecognized, HELP_MESSAGE))
    }

    /// Like [`Tutor::process_message`], returning only the response text
    pub fn respond(&mut self, session: &mut Session, raw: &str) -> TutorResult<String> {
        self.process_message(session, raw).map(|reply| reply.text)
    }

    fn handle_active(&self, session: &mut Session, concept: &Concept, text: &str) -> Reply {
        match text {
            HINT_COMMAND => Reply::new(
                Intent::RequestHint,
                format!("Hint: {}", concept.explanation),
            ),
            ANSWER_COMMAND => {
                let answer = self.matcher.render(concept);
                session.clear();
                Reply::new(
                    Intent::RequestAnswer,
                    format!(
                        "The answer is: {}\nExplanation: {}",
                        answer, concept.answer_explanation
                    ),
                )
            }
            attempt => {
                if self.matcher.matches(attempt, concept) {
                    info!("✅ Correct answer for {}", concept.key);
                    session.clear();
                    Reply::new(
                        Intent::Attempt { correct: true },
                        format!("Correct! {}", concept.answer_explanation),
                    )
                } else {
                    debug!("Incorrect attempt for {}", concept.key);
                    Reply::new(Intent::Attempt { correct: false }, RETRY_MESSAGE)
                }
            }
        }
    }

    fn catalog_overview(&self) -> String {
        let names: Vec<&str> = self.catalog.names().collect();
        format!(
            "These are the basic concepts in Text and Speech Analysis:\n- {}\nWhich concept would you like to learn about?",
            names.join("\n- ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RenderStyle;
    use crate::core::{LinguisticResources, TextNormalizer};
    use crate::matcher::MatchMode;

    fn tutor() -> Tutor {
        let normalizer = TextNormalizer::new(Arc::new(LinguisticResources::bundled()));
        Tutor::new(
            Arc::new(ConceptCatalog::bundled().unwrap()),
            Arc::new(EmotionalLexicon::bundled().unwrap()),
            AnswerMatcher::new(MatchMode::Exact, RenderStyle::default(), normalizer),
            EmotionClassifier::default(),
        )
        .with_seed(42)
    }

    #[test]
    fn test_start_phrase_keeps_state() {
        let mut t = tutor();
        let mut s = Session::new();
        let reply = t.process_message(&mut s, "Please teach me the basics").unwrap();
        assert_eq!(reply.intent, Intent::StartSession);
        assert!(reply.text.contains("- Tokenization\n"));
        assert!(s.is_idle());
    }

    #[test]
    fn test_hint_and_answer_need_active_concept() {
        let mut t = tutor();
        let mut s = Session::new();
        assert_eq!(
            t.process_message(&mut s, "hint").unwrap().intent,
            Intent::Unrecognized
        );
        assert_eq!(
            t.process_message(&mut s, "answer").unwrap().intent,
            Intent::Unrecognized
        );
    }

    #[test]
    fn test_reveal_renders_sequence() {
        let mut t = tutor();
        let mut s = Session::new();
        t.process_message(&mut s, "stemming").unwrap();
        let reply = t.process_message(&mut s, "ANSWER").unwrap();
        assert_eq!(reply.intent, Intent::RequestAnswer);
        assert!(reply.text.starts_with("The answer is: ['run', 'happili']\nExplanation: "));
        assert!(s.is_idle());
    }

    #[test]
    fn test_selecting_another_concept_switches() {
        let mut t = tutor();
        let mut s = Session::new();
        t.process_message(&mut s, "stemming").unwrap();
        t.process_message(&mut s, "Lemmatization").unwrap();
        assert_eq!(
            s.state(),
            DialogueState::AwaitingAnswer(ConceptKey::new("LEMMATIZATION"))
        );
    }

    #[test]
    fn test_emotion_ignored_while_awaiting() {
        let mut t = tutor();
        let mut s = Session::new();
        t.process_message(&mut s, "sentiment analysis").unwrap();
        let reply = t.process_message(&mut s, "I'm frustrated").unwrap();
        assert_eq!(reply.intent, Intent::Attempt { correct: false });
        assert!(!s.is_idle());
    }

    #[test]
    fn test_unknown_key_resets_session() {
        let mut t = tutor();
        let mut s = Session {
            active_concept: Some(ConceptKey::new("MACHINE_TRANSLATION")),
        };
        let err = t.process_message(&mut s, "hint").unwrap_err();
        assert!(matches!(err, TutorError::UnknownConceptKey(ref k) if k.as_str() == "MACHINE_TRANSLATION"));
        assert!(s.is_idle());
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        let mut t = tutor();
        let mut s = Session::new();
        let reply = t.process_message(&mut s, "  Tokenization \n").unwrap();
        assert_eq!(
            reply.intent,
            Intent::SelectConcept(ConceptKey::new("TOKENIZATION"))
        );
    }
}
