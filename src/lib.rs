//! Goodbye detector
//!
//! Decides whether an utterance ends a conversation by:
//! - a cheap keyword check for "bye"
//! - comparing its embedding against cached reference goodbye phrases
//!
//! Reference embeddings are computed once per phrase set and persisted in
//! a file, an in-process store or Redis.

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{Detection, DomainError, ReferencePhraseSet};
pub use infrastructure::services::GoodbyeClassifier;
