use nlp_tutor::config::Config;
use nlp_tutor::matcher::MatchMode;
use nlp_tutor::{Session, Tutor};

/// A tutor built from the bundled content with a fixed seed
pub struct TestContext {
    pub tutor: Tutor,
    pub session: Session,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_mode(MatchMode::Exact)
    }

    pub fn with_mode(match_mode: MatchMode) -> Self {
        let config = Config {
            match_mode,
            rng_seed: Some(1234),
            transcript_enabled: false,
            ..Config::default()
        };
        let tutor = config.build_tutor().expect("Failed to build tutor");
        Self {
            tutor,
            session: Session::new(),
        }
    }

    /// Send a message and return the reply text
    pub fn say(&mut self, message: &str) -> String {
        self.tutor
            .respond(&mut self.session, message)
            .expect("Tutor returned an error")
    }
}
