//! Name → snake_case file name token.

use std::sync::LazyLock;

use regex::Regex;

use super::{NameError, NormalizedToken};

/// Runs of anything that is not a letter or digit (any script).
static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Alphabetic}\p{N}]+").unwrap());

/// Lowercase `name`, collapse every non-alphanumeric run to one `_`, and
/// strip `_` from both ends.
pub fn normalize(name: &str) -> Result<NormalizedToken, NameError> {
    let lowered = name.to_lowercase();
    let replaced = NON_ALPHANUMERIC.replace_all(&lowered, "_");
    let token = replaced.trim_matches('_');

    if token.is_empty() {
        return Err(NameError::EmptyNormalization(name.to_string()));
    }
    Ok(NormalizedToken(token.to_string()))
}
