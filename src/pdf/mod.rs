//! PDF access: page counting, text-layer extraction and rasterization.
//!
//! The pipeline only sees the [`PdfBackend`] trait. [`PopplerBackend`]
//! implements it with the poppler-utils command-line tools.

mod backend;
mod document;
mod poppler;

pub use backend::{PdfBackend, PdfError};
pub use document::Document;
pub use poppler::PopplerBackend;
