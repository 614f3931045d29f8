//! OCR engine abstraction.

use std::path::Path;

use thiserror::Error;

/// Errors from OCR engines.
#[derive(Debug, Error)]
pub enum OcrError {
    /// The engine is not installed or cannot be launched. Fatal for a run.
    #[error("OCR engine not available: {0}")]
    BackendNotAvailable(String),

    /// Recognition failed for one image. Callers may degrade to empty text.
    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An engine that turns a raster image into text.
pub trait OcrEngine: Send + Sync {
    /// Short engine name for logs and status output.
    fn name(&self) -> &str;

    /// Check if this engine can run (binary installed, models present).
    fn is_available(&self) -> bool;

    /// Get a description of what's needed to make this engine available.
    fn availability_hint(&self) -> String;

    /// Run OCR on an image file.
    fn ocr_image(&self, image_path: &Path) -> Result<String, OcrError>;
}
