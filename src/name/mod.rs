//! Locating the certified name in extracted text and turning it into a
//! file name token.

mod anchor;
mod normalize;

use std::fmt;

use thiserror::Error;

pub use anchor::AnchorPhrase;
pub use normalize::normalize;

/// Errors from name location and normalization.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Anchor phrase must contain at least one word")]
    EmptyAnchor,

    #[error("Could not find certification phrase \"{0}\"")]
    PhraseNotFound(String),

    #[error("Found certification phrase but no name follows it")]
    NameLineEmpty,

    #[error("Name \"{0}\" has no letters or digits to build a file name from")]
    EmptyNormalization(String),
}

/// Raw text found after the anchor phrase, trimmed of surrounding whitespace.
///
/// May still carry punctuation, credentials or OCR noise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateName(String);

impl CandidateName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercase words joined by single underscores; only alphanumerics and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedToken(String);

impl NormalizedToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
