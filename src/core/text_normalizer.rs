//! Text Normalization
//!
//! Lower-cases, tokenizes, removes stop words and lemmatizes free-text
//! input before it is compared with an expected answer.

use super::resources::LinguisticResources;
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

lazy_static! {
    /// Word runs, apostrophe clitics ('m, 's) and single punctuation marks
    static ref TOKEN_RE: Regex = Regex::new(r"\w+|'\w+|[^\w\s]").expect("valid token regex");
}

/// Noun inflection rules, tried in order
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zes", "z"),
    ("men", "man"),
    ("s", ""),
];

/// Endings that look plural but are not
const PROTECTED_ENDINGS: &[&str] = &["ss", "us", "is"];

/// Normalizes free text into lemma tokens
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    resources: Arc<LinguisticResources>,
}

impl TextNormalizer {
    pub fn new(resources: Arc<LinguisticResources>) -> Self {
        Self { resources }
    }

    /// Normalize text. Nothing is computed until the tokens are iterated.
    pub fn normalize(&self, text: &str) -> Tokens<'_> {
        Tokens {
            lowered: text.to_lowercase(),
            normalizer: self,
        }
    }

    /// Reduce a lower-case token to its base form
    pub fn lemmatize(&self, token: &str) -> String {
        if let Some(base) = self.resources.lemma_exception(token) {
            return base.to_string();
        }

        if token.chars().count() <= 3 || !token.chars().all(char::is_alphabetic) {
            return token.to_string();
        }

        if PROTECTED_ENDINGS.iter().any(|end| token.ends_with(end)) {
            return token.to_string();
        }

        for (suffix, replacement) in SUFFIX_RULES {
            if let Some(stem) = token.strip_suffix(suffix) {
                if stem.len() >= 2 {
                    return format!("{}{}", stem, replacement);
                }
            }
        }

        token.to_string()
    }
}

/// Lazily evaluated, restartable token sequence
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    lowered: String,
    normalizer: &'a TextNormalizer,
}

impl<'a> Tokens<'a> {
    /// Start a fresh pass over the tokens
    pub fn iter(&self) -> impl Iterator<Item = String> + '_ {
        let resources = &self.normalizer.resources;
        let text = self.lowered.as_str();
        TOKEN_RE
            .find_iter(text)
            .flat_map(move |m| split_open_quote(text, m))
            .filter(move |token| !resources.is_stop_word(token))
            .map(move |token| self.normalizer.lemmatize(token))
    }

    /// Tokens that contain at least one word character
    pub fn words(&self) -> impl Iterator<Item = String> + '_ {
        self.iter()
            .filter(|token| token.chars().any(char::is_alphanumeric))
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.iter().collect()
    }
}

/// An apostrophe not attached to a preceding word is an opening quote,
/// not a clitic: `'text` becomes `'` and `text`.
fn split_open_quote<'t>(text: &'t str, m: regex::Match<'t>) -> Vec<&'t str> {
    let token = m.as_str();
    let attached = text[..m.start()]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '_');

    if token.len() > 1 && token.starts_with('\'') && !attached {
        vec![&token[..1], &token[1..]]
    } else {
        vec![token]
    }
}
