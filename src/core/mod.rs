//! Core language processing
//!
//! Contains the linguistic resources and the text normalizer built on them.

pub mod resources;
pub mod text_normalizer;

pub use resources::LinguisticResources;
pub use text_normalizer::{TextNormalizer, Tokens};
