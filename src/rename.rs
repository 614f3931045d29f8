//! Renaming a certificate to its normalized name without clobbering files.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::name::NormalizedToken;

/// Errors from the rename step.
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("No free file name for {base} after {attempts} attempts")]
    ConflictUnresolved { base: PathBuf, attempts: u32 },

    #[error("Failed to rename {from} to {to}: {source}")]
    Io {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of a successful rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOutcome {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl RenameOutcome {
    /// The file already had the target name, so nothing was moved.
    pub fn is_unchanged(&self) -> bool {
        self.from == self.to
    }
}

/// Build `<dir>/<stem><suffix>.<original extension>`.
fn candidate_path(source: &Path, stem: &str) -> PathBuf {
    let mut file_name = OsString::from(stem);
    if let Some(ext) = source.extension() {
        file_name.push(".");
        file_name.push(ext);
    }
    match source.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Broken symlinks count as taken.
fn is_taken(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// Pick the first free path among `token.ext`, `token_2.ext`, `token_3.ext`, ...
///
/// The source file's own path counts as free, so a file that is already
/// correctly named resolves to itself.
pub fn target_path(
    source: &Path,
    token: &NormalizedToken,
    max_attempts: u32,
) -> Result<PathBuf, RenameError> {
    let base = candidate_path(source, token.as_str());

    for attempt in 1..=max_attempts {
        let candidate = if attempt == 1 {
            base.clone()
        } else {
            candidate_path(source, &format!("{}_{}", token, attempt))
        };

        if candidate.file_name() == source.file_name() || !is_taken(&candidate) {
            return Ok(candidate);
        }
        tracing::debug!("{} exists, trying next suffix", candidate.display());
    }

    Err(RenameError::ConflictUnresolved {
        base,
        attempts: max_attempts,
    })
}

/// Move `source` to the first free name derived from `token`, in the same directory.
pub fn rename_to_token(
    source: &Path,
    token: &NormalizedToken,
    max_attempts: u32,
) -> Result<RenameOutcome, RenameError> {
    let target = target_path(source, token, max_attempts)?;

    if target != source {
        std::fs::rename(source, &target).map_err(|e| RenameError::Io {
            from: source.to_path_buf(),
            to: target.clone(),
            source: e,
        })?;
        tracing::info!("Renamed {} -> {}", source.display(), target.display());
    }

    Ok(RenameOutcome {
        from: source.to_path_buf(),
        to: target,
    })
}
