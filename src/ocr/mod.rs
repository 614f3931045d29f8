//! OCR engines for scanned certificates.
//!
//! Tesseract is the only bundled engine. It runs as an external process,
//! so the pipeline talks to it through the [`OcrEngine`] trait and tests
//! can substitute a deterministic fake.

mod backend;
mod tesseract;

pub use backend::{OcrEngine, OcrError};
pub use tesseract::TesseractBackend;
