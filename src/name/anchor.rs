//! Phrase-anchored name location.

use regex::Regex;

use super::{CandidateName, NameError};

/// A compiled anchor phrase such as "This is to certify that".
///
/// Matching ignores case and accepts any run of whitespace (including line
/// breaks) between words, since OCR output rarely preserves single spaces.
#[derive(Debug, Clone)]
pub struct AnchorPhrase {
    phrase: String,
    pattern: Regex,
}

impl AnchorPhrase {
    pub fn new(phrase: &str) -> Result<Self, NameError> {
        let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
        if words.is_empty() {
            return Err(NameError::EmptyAnchor);
        }

        // Escaped words cannot produce an invalid pattern
        let pattern = Regex::new(&format!("(?i){}", words.join(r"\s+"))).unwrap();
        Ok(Self {
            phrase: phrase.trim().to_string(),
            pattern,
        })
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Whether the phrase occurs anywhere in `text`.
    pub fn is_found(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Extract the name that follows the first occurrence of the phrase.
    ///
    /// Text after the phrase on the same line wins; otherwise the next
    /// non-blank line is used.
    pub fn find_candidate(&self, text: &str) -> Result<CandidateName, NameError> {
        let found = self
            .pattern
            .find(text)
            .ok_or_else(|| NameError::PhraseNotFound(self.phrase.clone()))?;

        let rest = &text[found.end()..];
        let (same_line, following) = rest.split_once('\n').unwrap_or((rest, ""));

        let same_line = same_line.trim();
        if !same_line.is_empty() {
            tracing::debug!("Found name on anchor line: '{}'", same_line);
            return Ok(CandidateName(same_line.to_string()));
        }

        following
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(|line| {
                tracing::debug!("Found name on following line: '{}'", line);
                CandidateName(line.to_string())
            })
            .ok_or(NameError::NameLineEmpty)
    }
}
