//! Ordered fallback across text sources.

use super::{ExtractionError, ExtractionResult, TextSource};
use crate::name::AnchorPhrase;
use crate::pdf::Document;

/// Tries each source in order until one produces text containing the
/// anchor phrase. If none does, the last source's text is returned as-is.
pub struct ExtractionOrchestrator {
    sources: Vec<Box<dyn TextSource>>,
    anchor: AnchorPhrase,
}

impl ExtractionOrchestrator {
    pub fn new(anchor: AnchorPhrase) -> Self {
        Self {
            sources: Vec::new(),
            anchor,
        }
    }

    /// Append a source to the end of the chain.
    pub fn with_source(mut self, source: Box<dyn TextSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn anchor(&self) -> &AnchorPhrase {
        &self.anchor
    }

    pub fn extract(&self, document: &Document) -> Result<ExtractionResult, ExtractionError> {
        let last = self.sources.len().checked_sub(1).ok_or(ExtractionError::NoSources)?;

        for (i, source) in self.sources.iter().enumerate() {
            let method = source.method();
            let output = source.extract(document)?;
            let found = self.anchor.is_found(&output.text);

            if found || i == last {
                if found {
                    tracing::info!(
                        "Extracted {} chars via {} (anchor phrase present)",
                        output.text.len(),
                        method
                    );
                } else {
                    tracing::info!(
                        "Extracted {} chars via {}; anchor phrase not found by any source",
                        output.text.len(),
                        method
                    );
                }
                return Ok(ExtractionResult {
                    text: output.text,
                    method,
                    page_count: document.page_count(),
                    failed_pages: output.failed_pages,
                });
            }

            tracing::info!(
                "{} text ({} chars) lacks the anchor phrase, falling back to {}",
                method,
                output.text.trim().len(),
                self.sources[i + 1].method()
            );
        }

        Err(ExtractionError::NoSources)
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::extract::{ExtractionMethod, SourceText};
    use crate::pdf::{PdfBackend, PdfError};

    struct OnePage;

    impl PdfBackend for OnePage {
        fn page_count(&self, _: &Path) -> Result<u32, PdfError> {
            Ok(1)
        }
        fn page_text(&self, _: &Path, _: u32) -> Result<String, PdfError> {
            Ok(String::new())
        }
        fn render_page(&self, _: &Path, _: u32, _: u32, dir: &Path) -> Result<PathBuf, PdfError> {
            Ok(dir.join("page-1.png"))
        }
        fn is_available(&self) -> bool {
            true
        }
        fn availability_hint(&self) -> String {
            String::new()
        }
    }

    struct Scripted {
        method: ExtractionMethod,
        text: Result<&'static str, &'static str>,
        calls: Arc<AtomicUsize>,
    }

    impl Scripted {
        fn boxed(
            method: ExtractionMethod,
            text: Result<&'static str, &'static str>,
        ) -> (Box<dyn TextSource>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let source = Scripted {
                method,
                text,
                calls: calls.clone(),
            };
            (Box::new(source), calls)
        }
    }

    impl TextSource for Scripted {
        fn method(&self) -> ExtractionMethod {
            self.method
        }

        fn extract(&self, _: &Document) -> Result<SourceText, ExtractionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.text {
                Ok(text) => Ok(SourceText {
                    text: text.to_string(),
                    failed_pages: Vec::new(),
                }),
                Err(msg) => Err(ExtractionError::DocumentUnreadable(msg.to_string())),
            }
        }
    }

    fn document() -> Document {
        Document::open(&OnePage, Path::new("cert.pdf")).unwrap()
    }

    fn orchestrator(
        native: Result<&'static str, &'static str>,
        ocr: Result<&'static str, &'static str>,
    ) -> (ExtractionOrchestrator, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let (native, native_calls) = Scripted::boxed(ExtractionMethod::TextLayer, native);
        let (ocr, ocr_calls) = Scripted::boxed(ExtractionMethod::Ocr, ocr);
        let anchor = AnchorPhrase::new("This is to certify that").unwrap();
        let orchestrator = ExtractionOrchestrator::new(anchor)
            .with_source(native)
            .with_source(ocr);
        (orchestrator, native_calls, ocr_calls)
    }

    #[test]
    fn test_native_with_phrase_skips_ocr() {
        let (orch, native_calls, ocr_calls) =
            orchestrator(Ok("this is to certify that\nJohn Smith"), Ok("unused"));

        let result = orch.extract(&document()).unwrap();
        assert_eq!(result.method, ExtractionMethod::TextLayer);
        assert_eq!(result.text, "this is to certify that\nJohn Smith");
        assert_eq!(native_calls.load(Ordering::SeqCst), 1);
        assert_eq!(ocr_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_native_falls_back_to_ocr() {
        let (orch, _, ocr_calls) =
            orchestrator(Ok(""), Ok("This is to certify that\nMaria Garcia-Lopez"));

        let result = orch.extract(&document()).unwrap();
        assert_eq!(result.method, ExtractionMethod::Ocr);
        assert_eq!(ocr_calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.page_count, 1);
    }

    #[test]
    fn test_native_without_phrase_falls_back_even_when_long() {
        let long = "Certificate of Completion awarded for outstanding work in the field";
        let (orch, _, ocr_calls) = orchestrator(Ok(long), Ok("OCR text"));

        let result = orch.extract(&document()).unwrap();
        assert_eq!(result.method, ExtractionMethod::Ocr);
        assert_eq!(result.text, "OCR text");
        assert_eq!(ocr_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_last_source_used_even_without_phrase() {
        let (orch, _, _) = orchestrator(Ok("native text"), Ok("ocr text"));
        let result = orch.extract(&document()).unwrap();
        assert_eq!(result.method, ExtractionMethod::Ocr);
        assert_eq!(result.text, "ocr text");
    }

    #[test]
    fn test_native_error_is_fatal() {
        let (orch, _, ocr_calls) = orchestrator(Err("corrupt xref"), Ok("unused"));
        let err = orch.extract(&document()).unwrap_err();
        assert!(matches!(err, ExtractionError::DocumentUnreadable(_)));
        assert_eq!(ocr_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_no_sources() {
        let orch = ExtractionOrchestrator::new(AnchorPhrase::new("x").unwrap());
        assert!(matches!(
            orch.extract(&document()),
            Err(ExtractionError::NoSources)
        ));
    }
}
