//! Reference phrase set

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::DomainError;

/// Canonical goodbye expressions used when none are configured
pub const DEFAULT_GOODBYE_PHRASES: [&str; 8] = [
    "bye",
    "goodbye",
    "see you",
    "see you later",
    "talk to you later",
    "talk to you soon",
    "have a good day",
    "have a good night",
];

/// Ordered, non-empty list of reference goodbye phrases.
///
/// Position `i` in the set is column `i` of the reference matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencePhraseSet {
    phrases: Vec<String>,
}

impl ReferencePhraseSet {
    pub fn new<I, S>(phrases: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();

        if phrases.is_empty() {
            return Err(DomainError::configuration(
                "At least one reference goodbye phrase is required",
            ));
        }

        Ok(Self { phrases })
    }

    pub fn as_slice(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }

    /// Hex SHA-256 over the ordered phrases, length-prefixed so that
    /// `["a b"]` and `["a", "b"]` differ.
    pub fn fingerprint(&self) -> String {
        fingerprint_of(&self.phrases)
    }
}

impl Default for ReferencePhraseSet {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_GOODBYE_PHRASES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

pub(super) fn fingerprint_of(phrases: &[String]) -> String {
    let mut hasher = Sha256::new();

    for phrase in phrases {
        hasher.update((phrase.len() as u64).to_le_bytes());
        hasher.update(phrase.as_bytes());
    }

    hex::encode(hasher.finalize())
}
