//! Tesseract OCR backend.
//!
//! Uses Tesseract via command-line, writing recognized text to stdout.

use std::path::Path;
use std::process::Command;
use std::time::Instant;

use super::backend::{OcrEngine, OcrError};
use crate::config::Config;
use crate::tools::{check_binary, run_capture, ToolError};

/// Tesseract OCR backend.
#[derive(Debug, Clone)]
pub struct TesseractBackend {
    command: String,
    language: String,
}

impl TesseractBackend {
    /// Create a backend running `command` with the given language pack.
    pub fn new(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
        }
    }

    /// Create a backend from pipeline configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.tesseract_cmd.clone(), config.ocr_language.clone())
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    fn command_for(&self, image_path: &Path) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.arg(image_path)
            .arg("stdout")
            .args(["-l", &self.language]);
        cmd
    }
}

impl Default for TesseractBackend {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl OcrEngine for TesseractBackend {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn is_available(&self) -> bool {
        check_binary(&self.command)
    }

    fn availability_hint(&self) -> String {
        if check_binary(&self.command) {
            "Tesseract is available".to_string()
        } else {
            format!(
                "Tesseract not found at '{}'. Install with: apt install tesseract-ocr \
                 (or set tesseract_cmd / CERTNAME_TESSERACT_CMD)",
                self.command
            )
        }
    }

    fn ocr_image(&self, image_path: &Path) -> Result<String, OcrError> {
        let start = Instant::now();
        let text = run_capture(&mut self.command_for(image_path), &self.command).map_err(
            |e| match e {
                ToolError::NotFound(_) => OcrError::BackendNotAvailable(self.availability_hint()),
                ToolError::Failed { stderr, .. } => {
                    OcrError::OcrFailed(format!("tesseract failed: {}", stderr))
                }
                ToolError::Io(e) => OcrError::Io(e),
            },
        )?;

        tracing::debug!(
            "tesseract read {} chars from {} in {}ms",
            text.len(),
            image_path.display(),
            start.elapsed().as_millis()
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_arguments() {
        let backend = TesseractBackend::new("tesseract", "eng");
        let cmd = backend.command_for(Path::new("/tmp/page-1.png"));
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().to_string()).collect();
        assert_eq!(args, ["/tmp/page-1.png", "stdout", "-l", "eng"]);
        assert_eq!(cmd.get_program(), "tesseract");
    }

    #[test]
    fn test_missing_binary_is_not_available() {
        let backend = TesseractBackend::new("/nonexistent/bin/tesseract", "eng");
        assert!(!backend.is_available());
        assert!(backend.availability_hint().contains("/nonexistent/bin/tesseract"));

        let err = backend.ocr_image(Path::new("page.png")).unwrap_err();
        assert!(matches!(err, OcrError::BackendNotAvailable(_)));
    }
}
