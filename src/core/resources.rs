//! Linguistic Resources
//!
//! Stop-word list and irregular lemma table used by the normalizer.

use crate::error::{TutorError, TutorResult};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;

pub const STOPWORDS_FILE: &str = "stopwords.txt";
pub const LEMMA_EXCEPTIONS_FILE: &str = "lemma_exceptions.txt";

const BUNDLED_STOPWORDS: &str = include_str!("../../data/stopwords.txt");
const BUNDLED_LEMMA_EXCEPTIONS: &str = include_str!("../../data/lemma_exceptions.txt");

/// Data the text normalizer depends on
#[derive(Debug, Clone)]
pub struct LinguisticResources {
    stop_words: HashSet<String>,
    lemma_exceptions: HashMap<String, String>,
}

impl LinguisticResources {
    /// English resources compiled into the binary
    pub fn bundled() -> Self {
        Self {
            stop_words: parse_stop_words(BUNDLED_STOPWORDS),
            lemma_exceptions: parse_exceptions(BUNDLED_LEMMA_EXCEPTIONS),
        }
    }

    /// Load resources from a directory holding `stopwords.txt` and
    /// `lemma_exceptions.txt`. Missing or empty files are fatal.
    pub fn load_dir(dir: &Path) -> TutorResult<Self> {
        let stop_words = parse_stop_words(&read_resource(dir, STOPWORDS_FILE)?);
        if stop_words.is_empty() {
            return Err(TutorError::ResourceUnavailable(format!(
                "{} in {:?} contains no words",
                STOPWORDS_FILE, dir
            )));
        }

        let lemma_exceptions = parse_exceptions(&read_resource(dir, LEMMA_EXCEPTIONS_FILE)?);
        if lemma_exceptions.is_empty() {
            return Err(TutorError::ResourceUnavailable(format!(
                "{} in {:?} contains no entries",
                LEMMA_EXCEPTIONS_FILE, dir
            )));
        }

        info!(
            "🔤 Loaded {} stop words and {} lemma exceptions from {:?}",
            stop_words.len(),
            lemma_exceptions.len(),
            dir
        );

        Ok(Self {
            stop_words,
            lemma_exceptions,
        })
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    pub fn lemma_exception(&self, token: &str) -> Option<&str> {
        self.lemma_exceptions.get(token).map(String::as_str)
    }
}

fn read_resource(dir: &Path, file: &str) -> TutorResult<String> {
    let path = dir.join(file);
    std::fs::read_to_string(&path).map_err(|e| {
        TutorError::ResourceUnavailable(format!("cannot read {:?}: {}", path, e))
    })
}

fn is_content_line(line: &&str) -> bool {
    !line.is_empty() && !line.starts_with('#')
}

fn parse_stop_words(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(is_content_line)
        .map(str::to_lowercase)
        .collect()
}

/// One `inflected<TAB or spaces>base` pair per line
fn parse_exceptions(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(is_content_line)
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some(form), Some(base)) => Some((form.to_lowercase(), base.to_lowercase())),
                _ => None,
            }
        })
        .collect()
}
