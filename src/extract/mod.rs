//! Text extraction from certificate PDFs.
//!
//! Extraction is an ordered list of [`TextSource`]s. The
//! [`ExtractionOrchestrator`] tries them in turn and keeps the first text
//! that contains the anchor phrase:
//!
//! 1. [`NativeTextSource`] - the PDF's embedded text layer (cheap)
//! 2. [`OcrTextSource`] - rasterize each page and OCR it (slow, last resort)

mod native;
mod ocr;
mod orchestrator;

use std::fmt;

use thiserror::Error;

use crate::pdf::{Document, PdfError};

pub use native::NativeTextSource;
pub use ocr::OcrTextSource;
pub use orchestrator::ExtractionOrchestrator;

/// Errors that abort text extraction for a document.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Document unreadable: {0}")]
    DocumentUnreadable(String),

    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("OCR engine missing: {0}")]
    OcrEngineMissing(String),

    #[error("No extraction sources configured")]
    NoSources,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PdfError> for ExtractionError {
    fn from(e: PdfError) -> Self {
        match e {
            PdfError::ToolNotFound(tool) => ExtractionError::ToolNotFound(tool),
            PdfError::Unreadable(msg) => ExtractionError::DocumentUnreadable(msg),
            e @ PdfError::RenderFailed { .. } => ExtractionError::DocumentUnreadable(e.to_string()),
            PdfError::Io(e) => ExtractionError::Io(e),
        }
    }
}

/// A page whose OCR failed and contributed empty text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("OCR failed for page {page}: {reason}")]
pub struct OcrPageFailure {
    pub page: u32,
    pub reason: String,
}

/// Method used to extract text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    /// Embedded text layer.
    TextLayer,
    /// Rasterized pages run through OCR.
    Ocr,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::TextLayer => "text layer",
            ExtractionMethod::Ocr => "OCR",
        }
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text produced by one source for a whole document.
#[derive(Debug, Clone, Default)]
pub struct SourceText {
    /// Per-page text in page order, joined with `\n`.
    pub text: String,
    /// Pages that degraded to empty text.
    pub failed_pages: Vec<OcrPageFailure>,
}

/// One way of turning a document into text.
pub trait TextSource: Send + Sync {
    fn method(&self) -> ExtractionMethod;

    fn extract(&self, document: &Document) -> Result<SourceText, ExtractionError>;
}

/// Result of text extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted text content.
    pub text: String,
    /// Source that produced `text`.
    pub method: ExtractionMethod,
    /// Number of pages in the document.
    pub page_count: u32,
    /// OCR pages that were skipped after a failure.
    pub failed_pages: Vec<OcrPageFailure>,
}
