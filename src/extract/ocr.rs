//! OCR fallback: rasterize pages and recognize text.

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use super::{ExtractionError, ExtractionMethod, OcrPageFailure, SourceText, TextSource};
use crate::ocr::{OcrEngine, OcrError};
use crate::pdf::{Document, PdfBackend, PdfError};

/// Renders every page at `dpi` and runs the OCR engine over it.
pub struct OcrTextSource {
    pdf: Arc<dyn PdfBackend>,
    engine: Arc<dyn OcrEngine>,
    dpi: u32,
}

/// How a single page went wrong.
enum PageError {
    /// Stops the whole run (missing engine or renderer).
    Fatal(ExtractionError),
    /// Page contributes empty text.
    Degraded(String),
}

impl OcrTextSource {
    pub fn new(pdf: Arc<dyn PdfBackend>, engine: Arc<dyn OcrEngine>, dpi: u32) -> Self {
        Self { pdf, engine, dpi }
    }

    fn ocr_page(&self, document: &Document, page: u32, work_dir: &Path) -> Result<String, PageError> {
        let image = self
            .pdf
            .render_page(document.path(), page, self.dpi, work_dir)
            .map_err(|e| match e {
                PdfError::ToolNotFound(tool) => {
                    PageError::Fatal(ExtractionError::ToolNotFound(tool))
                }
                e => PageError::Degraded(e.to_string()),
            })?;

        let result = self.engine.ocr_image(&image).map_err(|e| match e {
            OcrError::BackendNotAvailable(hint) => {
                PageError::Fatal(ExtractionError::OcrEngineMissing(hint))
            }
            e => PageError::Degraded(e.to_string()),
        });

        // Rendered pages can be large; drop each one once read
        let _ = std::fs::remove_file(&image);
        result
    }
}

impl TextSource for OcrTextSource {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::Ocr
    }

    fn extract(&self, document: &Document) -> Result<SourceText, ExtractionError> {
        if !self.engine.is_available() {
            return Err(ExtractionError::OcrEngineMissing(
                self.engine.availability_hint(),
            ));
        }

        let work_dir = TempDir::new()?;
        let total = document.page_count();
        let mut page_texts = Vec::with_capacity(total as usize);
        let mut failed_pages = Vec::new();

        for page in document.pages() {
            tracing::debug!("Processing page {}/{} with {}", page, total, self.engine.name());
            match self.ocr_page(document, page, work_dir.path()) {
                Ok(text) => page_texts.push(text),
                Err(PageError::Fatal(e)) => return Err(e),
                Err(PageError::Degraded(reason)) => {
                    let failure = OcrPageFailure { page, reason };
                    tracing::warn!("{}", failure);
                    failed_pages.push(failure);
                    page_texts.push(String::new());
                }
            }
        }

        Ok(SourceText {
            text: page_texts.join("\n"),
            failed_pages,
        })
    }
}
