//! Deterministic stand-ins for the PDF and OCR backends.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use certname::ocr::{OcrEngine, OcrError};
use certname::pdf::{PdfBackend, PdfError};
use certname::{Config, Pipeline};
use tempfile::TempDir;

/// A fake PDF whose pages have a fixed text layer.
#[derive(Default)]
pub struct FakePdf {
    /// Text layer per page; empty strings model scanned pages.
    pub pages: Vec<String>,
    /// `page_count` fails as if the file were corrupt.
    pub unreadable: bool,
    /// Pages whose rasterization fails.
    pub render_failures: Vec<u32>,
    pub text_calls: AtomicUsize,
    pub render_calls: AtomicUsize,
}

impl FakePdf {
    pub fn with_text(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|p| p.to_string()).collect(),
            ..Self::default()
        }
    }

    /// `count` pages with no text layer.
    pub fn scanned(count: usize) -> Self {
        Self {
            pages: vec![String::new(); count],
            ..Self::default()
        }
    }
}

impl PdfBackend for FakePdf {
    fn page_count(&self, _: &Path) -> Result<u32, PdfError> {
        if self.unreadable {
            return Err(PdfError::Unreadable("Couldn't find trailer dictionary".into()));
        }
        Ok(self.pages.len() as u32)
    }

    fn page_text(&self, _: &Path, page: u32) -> Result<String, PdfError> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pages[(page - 1) as usize].clone())
    }

    fn render_page(
        &self,
        _: &Path,
        page: u32,
        _dpi: u32,
        output_dir: &Path,
    ) -> Result<PathBuf, PdfError> {
        self.render_calls.fetch_add(1, Ordering::SeqCst);
        if self.render_failures.contains(&page) {
            return Err(PdfError::RenderFailed {
                page,
                message: "bad image stream".into(),
            });
        }
        // The "image" records its page number for FakeOcr to read back
        let path = output_dir.join(format!("page-{}.png", page));
        std::fs::write(&path, page.to_string())?;
        Ok(path)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn availability_hint(&self) -> String {
        "fake pdf backend".into()
    }
}

/// What the fake OCR engine returns for a page.
pub enum OcrPage {
    Text(&'static str),
    Fail,
}

/// A fake OCR engine keyed by page number.
pub struct FakeOcr {
    pub available: bool,
    pub pages: HashMap<u32, OcrPage>,
    pub calls: AtomicUsize,
}

impl FakeOcr {
    pub fn new(pages: Vec<(u32, OcrPage)>) -> Self {
        Self {
            available: true,
            pages: pages.into_iter().collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn missing() -> Self {
        Self {
            available: false,
            pages: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OcrEngine for FakeOcr {
    fn name(&self) -> &str {
        "fake"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn availability_hint(&self) -> String {
        "install the fake engine".into()
    }

    fn ocr_image(&self, image_path: &Path) -> Result<String, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.available {
            return Err(OcrError::BackendNotAvailable(self.availability_hint()));
        }
        let page: u32 = std::fs::read_to_string(image_path)?
            .parse()
            .map_err(|_| OcrError::OcrFailed("not a fake page image".into()))?;
        match self.pages.get(&page) {
            Some(OcrPage::Text(text)) => Ok(text.to_string()),
            Some(OcrPage::Fail) => Err(OcrError::OcrFailed(format!("page {} unreadable", page))),
            None => Ok(String::new()),
        }
    }
}

/// Config with no dependence on the environment.
pub fn test_config() -> Config {
    Config {
        ocr_language: "eng".into(),
        tesseract_cmd: "tesseract".into(),
        ..Config::default()
    }
}

pub fn pipeline(pdf: &Arc<FakePdf>, ocr: &Arc<FakeOcr>) -> Pipeline {
    Pipeline::new(test_config(), pdf.clone(), ocr.clone()).unwrap()
}

/// Create a placeholder PDF file; its bytes are never parsed by the fakes.
pub fn pdf_file(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"%PDF-1.4 placeholder").unwrap();
    path
}

/// Sorted file names in a directory.
pub fn file_names(dir: &TempDir) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
