//! End-to-end run for one certificate: extract → locate name → normalize → rename.
//!
//! Everything before the rename is read-only, so preview mode can run the
//! same steps without touching the file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::config::Config;
use crate::extract::{
    ExtractionError, ExtractionOrchestrator, ExtractionResult, NativeTextSource, OcrTextSource,
};
use crate::name::{normalize, AnchorPhrase, CandidateName, NameError, NormalizedToken};
use crate::ocr::{OcrEngine, TesseractBackend};
use crate::pdf::{Document, PdfBackend, PopplerBackend};
use crate::rename::{rename_to_token, RenameError, RenameOutcome};

/// Terminal errors for a single-file run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("File '{}' does not exist", .0.display())]
    InputNotFound(PathBuf),

    #[error("'{}' is not a PDF file", .0.display())]
    NotAPdf(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Could not read PDF: {0}")]
    DocumentUnreadable(String),

    #[error("Required tool not found: {0}")]
    ToolNotFound(String),

    #[error("OCR is needed for this document but no OCR engine is available. {0}")]
    OcrEngineMissing(String),

    #[error(
        "Could not find certification phrase \"{0}\". \
         Run with --preview-only to inspect the extracted text"
    )]
    PhraseNotFound(String),

    #[error("Found the certification phrase, but no name follows it")]
    NameLineEmpty,

    #[error("Extracted name \"{0}\" has no letters or digits to build a file name from")]
    EmptyNormalization(String),

    #[error("Could not find a free file name for {} after {attempts} attempts", .base.display())]
    RenameConflictUnresolved { base: PathBuf, attempts: u32 },

    #[error("{0}")]
    Rename(RenameError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ExtractionError> for PipelineError {
    fn from(e: ExtractionError) -> Self {
        match e {
            ExtractionError::DocumentUnreadable(msg) => PipelineError::DocumentUnreadable(msg),
            ExtractionError::ToolNotFound(tool) => PipelineError::ToolNotFound(tool),
            ExtractionError::OcrEngineMissing(hint) => PipelineError::OcrEngineMissing(hint),
            e @ ExtractionError::NoSources => PipelineError::InvalidConfig(e.to_string()),
            ExtractionError::Io(e) => PipelineError::Io(e),
        }
    }
}

impl From<NameError> for PipelineError {
    fn from(e: NameError) -> Self {
        match e {
            e @ NameError::EmptyAnchor => PipelineError::InvalidConfig(e.to_string()),
            NameError::PhraseNotFound(phrase) => PipelineError::PhraseNotFound(phrase),
            NameError::NameLineEmpty => PipelineError::NameLineEmpty,
            NameError::EmptyNormalization(raw) => PipelineError::EmptyNormalization(raw),
        }
    }
}

impl From<RenameError> for PipelineError {
    fn from(e: RenameError) -> Self {
        match e {
            RenameError::ConflictUnresolved { base, attempts } => {
                PipelineError::RenameConflictUnresolved { base, attempts }
            }
            e => PipelineError::Rename(e),
        }
    }
}

/// Name located in a document's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatch {
    pub candidate: CandidateName,
    pub token: NormalizedToken,
}

/// Everything the pipeline learned about a document, short of renaming it.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub extraction: ExtractionResult,
    pub name: NameMatch,
}

/// Outcome of a full (non-preview) run.
#[derive(Debug, Clone)]
pub struct Processed {
    pub resolution: Resolution,
    pub rename: RenameOutcome,
}

/// The certificate pipeline. Holds no per-document state, so one
/// instance can process any number of files independently.
pub struct Pipeline {
    config: Config,
    pdf: Arc<dyn PdfBackend>,
    orchestrator: ExtractionOrchestrator,
}

impl Pipeline {
    /// Build a pipeline from explicit collaborators.
    pub fn new(
        config: Config,
        pdf: Arc<dyn PdfBackend>,
        ocr: Arc<dyn OcrEngine>,
    ) -> Result<Self, PipelineError> {
        config
            .validate()
            .map_err(|e| PipelineError::InvalidConfig(e.to_string()))?;

        let anchor = AnchorPhrase::new(&config.anchor_phrase)?;
        let orchestrator = ExtractionOrchestrator::new(anchor)
            .with_source(Box::new(NativeTextSource::new(pdf.clone())))
            .with_source(Box::new(OcrTextSource::new(
                pdf.clone(),
                ocr,
                config.render_dpi(),
            )));

        Ok(Self {
            config,
            pdf,
            orchestrator,
        })
    }

    /// Build a pipeline using poppler-utils and Tesseract.
    pub fn from_config(config: Config) -> Result<Self, PipelineError> {
        let pdf = Arc::new(PopplerBackend::from_config(&config));
        let ocr = Arc::new(TesseractBackend::from_config(&config));
        Self::new(config, pdf, ocr)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reject paths that do not exist or do not end in `.pdf`.
    pub fn validate_input(path: &Path) -> Result<(), PipelineError> {
        if !path.is_file() {
            return Err(PipelineError::InputNotFound(path.to_path_buf()));
        }
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(PipelineError::NotAPdf(path.to_path_buf()));
        }
        Ok(())
    }

    /// Extract text from the document, falling back to OCR when needed.
    pub fn extract(&self, path: &Path) -> Result<ExtractionResult, PipelineError> {
        Self::validate_input(path)?;
        tracing::info!("Processing PDF: {}", path.display());

        let document = Document::open(self.pdf.as_ref(), path).map_err(ExtractionError::from)?;
        Ok(self.orchestrator.extract(&document)?)
    }

    /// Locate and normalize the name in already-extracted text.
    pub fn find_name(&self, text: &str) -> Result<NameMatch, PipelineError> {
        let candidate = self.orchestrator.anchor().find_candidate(text)?;
        let token = normalize(candidate.as_str())?;
        tracing::info!("Extracted certification name: '{}' -> {}", candidate, token);
        Ok(NameMatch { candidate, token })
    }

    /// Run every read-only step. Used by preview mode.
    pub fn resolve(&self, path: &Path) -> Result<Resolution, PipelineError> {
        let extraction = self.extract(path)?;
        let name = self.find_name(&extraction.text)?;
        Ok(Resolution { extraction, name })
    }

    /// Resolve the name, then rename the file in place.
    pub fn process(&self, path: &Path) -> Result<Processed, PipelineError> {
        let resolution = self.resolve(path)?;
        let rename = rename_to_token(
            path,
            &resolution.name.token,
            self.config.max_rename_attempts,
        )?;
        Ok(Processed { resolution, rename })
    }
}
