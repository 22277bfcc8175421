use crate::catalog::{ConceptCatalog, RenderStyle};
use crate::core::{LinguisticResources, TextNormalizer};
use crate::dialogue::Tutor;
use crate::emotion::{default_triggers, EmotionClassifier, EmotionTrigger};
use crate::error::TutorResult;
use crate::lexicon::EmotionalLexicon;
use crate::matcher::{AnswerMatcher, MatchMode};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Content
    /// Concept catalog JSON; bundled catalog when unset
    pub catalog_path: Option<PathBuf>,
    /// Emotional lexicon JSON; bundled lexicon when unset
    pub lexicon_path: Option<PathBuf>,
    /// Directory with stopwords.txt and lemma_exceptions.txt
    pub resource_dir: Option<PathBuf>,

    // Grading
    pub match_mode: MatchMode,
    pub render_style: RenderStyle,
    pub emotion_triggers: Vec<EmotionTrigger>,
    pub rng_seed: Option<u64>,

    // Transcript
    pub transcript_enabled: bool,
    pub transcript_path: Option<PathBuf>,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            lexicon_path: None,
            resource_dir: None,
            match_mode: MatchMode::Exact,
            render_style: RenderStyle::default(),
            emotion_triggers: default_triggers(),
            rng_seed: None,
            transcript_enabled: true,
            transcript_path: None,
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from a file. A corrupt file is moved aside and defaults
    /// are used instead.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                // Graceful degradation: log warning and use defaults
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                // Backup corrupt file for debugging
                let backup_path = config_path.with_extension("json.corrupt");
                let _ = std::fs::rename(config_path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Where exchanges are appended
    pub fn transcript_file(&self) -> PathBuf {
        self.transcript_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("nlp-tutor")
                .join("transcript.log")
        })
    }

    /// Tracing filter directive: `--verbose` wins, then `RUST_LOG`, then
    /// the configured level
    pub fn log_directive(&self, verbose: bool, rust_log: Option<&str>) -> String {
        if verbose {
            return "debug".to_string();
        }
        match rust_log.map(str::trim) {
            Some(env) if !env.is_empty() => env.to_string(),
            _ => self.log_level.to_lowercase(),
        }
    }

    /// Load all content and assemble a tutor. Fails fast when linguistic
    /// resources or content files cannot be loaded.
    pub fn build_tutor(&self) -> TutorResult<Tutor> {
        let resources = match &self.resource_dir {
            Some(dir) => LinguisticResources::load_dir(dir)?,
            None => LinguisticResources::bundled(),
        };

        let catalog = match &self.catalog_path {
            Some(path) => ConceptCatalog::load(path)?,
            None => ConceptCatalog::bundled()?,
        };

        let lexicon = match &self.lexicon_path {
            Some(path) => EmotionalLexicon::load(path)?,
            None => EmotionalLexicon::bundled()?,
        };

        let normalizer = TextNormalizer::new(Arc::new(resources));
        let matcher = AnswerMatcher::new(self.match_mode, self.render_style.clone(), normalizer);

        info!(
            "🎓 Tutor ready: {} concepts, match mode {:?}",
            catalog.len(),
            matcher.mode()
        );
        let classifier = EmotionClassifier::new(self.emotion_triggers.clone());

        let tutor = Tutor::new(Arc::new(catalog), Arc::new(lexicon), matcher, classifier);
        Ok(match self.rng_seed {
            Some(seed) => tutor.with_seed(seed),
            None => tutor,
        })
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nlp-tutor")
        .join("config.json")
}
