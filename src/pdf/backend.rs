//! PDF backend abstraction.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from PDF backends.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    /// The file could not be parsed as a PDF at all.
    #[error("Unreadable PDF: {0}")]
    Unreadable(String),

    /// A single page could not be rendered to an image.
    #[error("Failed to render page {page}: {message}")]
    RenderFailed { page: u32, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Capabilities the pipeline needs from a PDF library. Pages are 1-based.
pub trait PdfBackend: Send + Sync {
    /// Number of pages in the document.
    fn page_count(&self, pdf_path: &Path) -> Result<u32, PdfError>;

    /// Embedded text of one page. Empty for image-only pages.
    fn page_text(&self, pdf_path: &Path, page: u32) -> Result<String, PdfError>;

    /// Render one page to a PNG inside `output_dir` at `dpi`, returning its path.
    fn render_page(
        &self,
        pdf_path: &Path,
        page: u32,
        dpi: u32,
        output_dir: &Path,
    ) -> Result<PathBuf, PdfError>;

    /// Check if the backend's dependencies are installed.
    fn is_available(&self) -> bool;

    /// Get a description of what's needed to make this backend available.
    fn availability_hint(&self) -> String;
}
