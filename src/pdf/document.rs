//! An opened PDF document.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use super::backend::{PdfBackend, PdfError};

/// A PDF whose structure has been read. Immutable for the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    page_count: u32,
}

impl Document {
    /// Open a document, failing if its page structure cannot be read.
    pub fn open(backend: &dyn PdfBackend, path: &Path) -> Result<Self, PdfError> {
        let page_count = backend.page_count(path)?;
        if page_count == 0 {
            return Err(PdfError::Unreadable(format!(
                "{} has no pages",
                path.display()
            )));
        }

        tracing::debug!("Opened {} ({} pages)", path.display(), page_count);
        Ok(Self {
            path: path.to_path_buf(),
            page_count,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Page numbers in document order.
    pub fn pages(&self) -> RangeInclusive<u32> {
        1..=self.page_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPages(u32);

    impl PdfBackend for FixedPages {
        fn page_count(&self, _: &Path) -> Result<u32, PdfError> {
            Ok(self.0)
        }

        fn page_text(&self, _: &Path, _: u32) -> Result<String, PdfError> {
            Ok(String::new())
        }

        fn render_page(&self, _: &Path, page: u32, _: u32, dir: &Path) -> Result<PathBuf, PdfError> {
            Ok(dir.join(format!("page-{page}.png")))
        }

        fn is_available(&self) -> bool {
            true
        }

        fn availability_hint(&self) -> String {
            String::new()
        }
    }

    #[test]
    fn test_pages_are_one_based() {
        let doc = Document::open(&FixedPages(3), Path::new("cert.pdf")).unwrap();
        assert_eq!(doc.pages().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(doc.path(), Path::new("cert.pdf"));
    }

    #[test]
    fn test_zero_pages_is_unreadable() {
        let err = Document::open(&FixedPages(0), Path::new("empty.pdf")).unwrap_err();
        assert!(matches!(err, PdfError::Unreadable(_)));
    }
}
