//! Concept Catalog
//!
//! The static table of teachable concepts. Loaded once at startup from
//! JSON (bundled or user supplied) and never mutated afterwards.

use crate::error::{TutorError, TutorResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// Catalog shipped with the binary
const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");

/// Unique identifier of a concept (e.g. `TOKENIZATION`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptKey(String);

impl ConceptKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConceptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How sequence answers are turned into a single display string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub open: String,
    pub close: String,
    pub separator: String,
    /// Quote placed around each item; empty disables quoting
    pub quote: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            open: "[".to_string(),
            close: "]".to_string(),
            separator: ", ".to_string(),
            quote: "'".to_string(),
        }
    }
}

impl RenderStyle {
    fn quote_item(&self, item: &str) -> String {
        if self.quote.is_empty() {
            return item.to_string();
        }

        // Same rule as a Python list literal: switch to double quotes when
        // the item holds the quote character but no double quote.
        let quote = if self.quote == "'" && item.contains('\'') && !item.contains('"') {
            "\""
        } else {
            self.quote.as_str()
        };

        let mut body = String::with_capacity(item.len());
        for c in item.chars() {
            match c {
                '\\' => body.push_str("\\\\"),
                '\n' => body.push_str("\\n"),
                '\r' => body.push_str("\\r"),
                '\t' => body.push_str("\\t"),
                c if c.is_control() && (c as u32) < 0x100 => {
                    body.push_str(&format!("\\x{:02x}", c as u32))
                }
                c if c.is_control() => body.push_str(&format!("\\u{:04x}", c as u32)),
                c if quote.starts_with(c) => {
                    body.push('\\');
                    body.push(c);
                }
                c => body.push(c),
            }
        }

        format!("{}{}{}", quote, body, quote)
    }
}

/// The authoritative correct response for a concept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CanonicalAnswer {
    Scalar(String),
    Sequence(Vec<String>),
}

impl CanonicalAnswer {
    /// Textual form used both for display and for exact comparison
    pub fn render(&self, style: &RenderStyle) -> String {
        match self {
            CanonicalAnswer::Scalar(value) => value.clone(),
            CanonicalAnswer::Sequence(items) => {
                let quoted: Vec<String> = items.iter().map(|i| style.quote_item(i)).collect();
                format!("{}{}{}", style.open, quoted.join(&style.separator), style.close)
            }
        }
    }

    /// The answer as authored, one entry per item
    pub fn items(&self) -> Vec<&str> {
        match self {
            CanonicalAnswer::Scalar(value) => vec![value.as_str()],
            CanonicalAnswer::Sequence(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

/// One teachable unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concept {
    pub key: ConceptKey,
    pub name: String,
    /// Teaching material, reused as the hint
    pub explanation: String,
    pub task: String,
    pub answer: CanonicalAnswer,
    pub answer_explanation: String,
}

/// Ordered, immutable set of concepts
#[derive(Debug, Clone)]
pub struct ConceptCatalog {
    concepts: Vec<Concept>,
}

impl ConceptCatalog {
    /// Build a catalog, rejecting duplicate keys or names
    pub fn new(concepts: Vec<Concept>) -> TutorResult<Self> {
        if concepts.is_empty() {
            return Err(TutorError::Config("concept catalog is empty".to_string()));
        }

        let mut keys = HashSet::new();
        let mut names = HashSet::new();
        for concept in &concepts {
            if !keys.insert(concept.key.clone()) {
                return Err(TutorError::Config(format!(
                    "duplicate concept key '{}'",
                    concept.key
                )));
            }
            if !names.insert(concept.name.to_lowercase()) {
                return Err(TutorError::Config(format!(
                    "duplicate concept name '{}'",
                    concept.name
                )));
            }
            if let CanonicalAnswer::Sequence(items) = &concept.answer {
                if items.is_empty() {
                    return Err(TutorError::Config(format!(
                        "concept '{}' has an empty answer sequence",
                        concept.key
                    )));
                }
            }
        }

        Ok(Self { concepts })
    }

    /// The catalog compiled into the binary
    pub fn bundled() -> TutorResult<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn from_json(json: &str) -> TutorResult<Self> {
        let concepts: Vec<Concept> = serde_json::from_str(json)?;
        Self::new(concepts)
    }

    pub fn load(path: &Path) -> TutorResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        info!("📚 Loaded {} concepts from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn get(&self, key: &ConceptKey) -> Option<&Concept> {
        self.concepts.iter().find(|c| &c.key == key)
    }

    /// Case-insensitive lookup by display name
    pub fn find_by_name(&self, name: &str) -> Option<&Concept> {
        let name = name.to_lowercase();
        let found = self.concepts.iter().find(|c| c.name.to_lowercase() == name);
        if let Some(concept) = found {
            debug!("Matched concept name '{}' -> {}", name, concept.key);
        }
        found
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.concepts.iter().map(|c| c.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.iter()
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}
