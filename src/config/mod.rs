//! Configuration management for certname using the prefer crate.

mod loader;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use loader::{load_config, LoadOptions};

/// Anchor phrase that precedes the certified person's name.
pub const DEFAULT_ANCHOR_PHRASE: &str = "This is to certify that";

/// Default page rendering scale relative to the PDF's 72 DPI user space.
pub const DEFAULT_RENDER_SCALE: f32 = 2.0;

/// Resolution PDF viewers render at when no zoom is applied.
pub const PDF_BASE_DPI: f32 = 72.0;

/// Upper bound on `_N` suffixes tried before giving up on a rename.
pub const DEFAULT_MAX_RENAME_ATTEMPTS: u32 = 1000;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Pipeline configuration.
///
/// Every field has a default, so a config file only needs the keys it
/// wants to change. Environment overrides are applied in `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Phrase located (case-insensitively) to find the name line.
    pub anchor_phrase: String,
    /// Rasterization zoom for OCR; DPI is `72 * render_scale`.
    pub render_scale: f32,
    /// Tesseract language pack (e.g. "eng").
    pub ocr_language: String,
    /// Tesseract executable, either a name on PATH or a full path.
    pub tesseract_cmd: String,
    pub pdftotext_cmd: String,
    pub pdftoppm_cmd: String,
    pub pdfinfo_cmd: String,
    /// Characters of extracted text shown in preview mode.
    pub preview_chars: usize,
    pub max_rename_attempts: u32,
    /// File this config was loaded from, if any.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anchor_phrase: DEFAULT_ANCHOR_PHRASE.to_string(),
            render_scale: DEFAULT_RENDER_SCALE,
            ocr_language: env_or("CERTNAME_OCR_LANGUAGE", "eng"),
            tesseract_cmd: env_or("CERTNAME_TESSERACT_CMD", "tesseract"),
            pdftotext_cmd: "pdftotext".to_string(),
            pdftoppm_cmd: "pdftoppm".to_string(),
            pdfinfo_cmd: "pdfinfo".to_string(),
            preview_chars: 500,
            max_rename_attempts: DEFAULT_MAX_RENAME_ATTEMPTS,
            source_path: None,
        }
    }
}

fn env_or(key: &str, fallback: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

impl Config {
    /// Load configuration from a specific file path.
    /// Format is chosen by extension: TOML, YAML, otherwise JSON.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let mut config = Self::parse(&contents, ext)?;
        config.source_path = Some(path.to_path_buf());
        config.expand_commands();
        Ok(config)
    }

    /// Parse config text in the format named by `ext`.
    pub fn parse(contents: &str, ext: &str) -> Result<Self, ConfigError> {
        match ext {
            "toml" => toml::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "TOML",
                message: e.to_string(),
            }),
            "yaml" | "yml" => serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "YAML",
                message: e.to_string(),
            }),
            _ => serde_json::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "JSON",
                message: e.to_string(),
            }),
        }
    }

    /// Expand `~` in configured tool paths.
    pub fn expand_commands(&mut self) {
        for cmd in [
            &mut self.tesseract_cmd,
            &mut self.pdftotext_cmd,
            &mut self.pdftoppm_cmd,
            &mut self.pdfinfo_cmd,
        ] {
            *cmd = shellexpand::tilde(cmd.as_str()).into_owned();
        }
    }

    /// Rasterization resolution handed to the PDF renderer.
    pub fn render_dpi(&self) -> u32 {
        (PDF_BASE_DPI * self.render_scale).round() as u32
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.anchor_phrase.split_whitespace().next().is_none() {
            return Err(ConfigError::Invalid("anchor_phrase must not be empty".into()));
        }
        if !(self.render_scale.is_finite() && self.render_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "render_scale must be positive, got {}",
                self.render_scale
            )));
        }
        if self.max_rename_attempts == 0 {
            return Err(ConfigError::Invalid(
                "max_rename_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
