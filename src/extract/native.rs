//! Embedded text layer extraction.

use std::sync::Arc;

use super::{ExtractionError, ExtractionMethod, SourceText, TextSource};
use crate::pdf::{Document, PdfBackend};

/// Reads each page's embedded text. Image-only pages yield empty text.
pub struct NativeTextSource {
    backend: Arc<dyn PdfBackend>,
}

impl NativeTextSource {
    pub fn new(backend: Arc<dyn PdfBackend>) -> Self {
        Self { backend }
    }
}

impl TextSource for NativeTextSource {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::TextLayer
    }

    fn extract(&self, document: &Document) -> Result<SourceText, ExtractionError> {
        let mut page_texts = Vec::with_capacity(document.page_count() as usize);

        for page in document.pages() {
            let text = self.backend.page_text(document.path(), page)?;
            tracing::debug!("Page {}: {} chars in text layer", page, text.trim().len());
            page_texts.push(text);
        }

        Ok(SourceText {
            text: page_texts.join("\n"),
            failed_pages: Vec::new(),
        })
    }
}
