//! certname - rename certificate PDFs after the person they certify.
//!
//! Text is pulled from a PDF's embedded text layer, falling back to
//! rasterization + OCR for scanned certificates. The line following
//! "This is to certify that" is taken as the name, normalized to a
//! snake_case token, and used as the new file name.

pub mod cli;
pub mod config;
pub mod extract;
pub mod name;
pub mod ocr;
pub mod pdf;
pub mod pipeline;
pub mod rename;
pub mod tools;

pub use config::Config;
pub use pipeline::{Pipeline, PipelineError, Resolution};
