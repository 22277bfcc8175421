//! NLP Tutor Library
//!
//! Core modules for the text and speech analysis tutor.

pub mod catalog;
pub mod config;
pub mod core;
pub mod dialogue;
pub mod emotion;
pub mod error;
pub mod lexicon;
pub mod matcher;
pub mod transcript;

pub use dialogue::{DialogueState, Intent, Reply, Session, Tutor};
pub use error::{TutorError, TutorResult};
