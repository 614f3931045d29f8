//! Poppler backend built on pdfinfo, pdftotext and pdftoppm.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::backend::{PdfBackend, PdfError};
use crate::config::Config;
use crate::tools::{check_binary, run_capture, ToolError};

/// PDF backend that shells out to poppler-utils.
#[derive(Debug, Clone)]
pub struct PopplerBackend {
    pdfinfo: String,
    pdftotext: String,
    pdftoppm: String,
}

impl PopplerBackend {
    pub fn from_config(config: &Config) -> Self {
        Self {
            pdfinfo: config.pdfinfo_cmd.clone(),
            pdftotext: config.pdftotext_cmd.clone(),
            pdftoppm: config.pdftoppm_cmd.clone(),
        }
    }

    fn tools(&self) -> [&str; 3] {
        [&self.pdfinfo, &self.pdftotext, &self.pdftoppm]
    }
}

impl Default for PopplerBackend {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Read the `Pages:` field from pdfinfo output.
fn parse_page_count(pdfinfo_output: &str) -> Option<u32> {
    pdfinfo_output
        .lines()
        .find(|line| line.starts_with("Pages:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse().ok())
}

fn not_found_hint(tool: &str) -> String {
    format!("{} (install poppler-utils)", tool)
}

impl PdfBackend for PopplerBackend {
    fn page_count(&self, pdf_path: &Path) -> Result<u32, PdfError> {
        let mut cmd = Command::new(&self.pdfinfo);
        cmd.arg(pdf_path);

        let stdout = run_capture(&mut cmd, &self.pdfinfo).map_err(|e| match e {
            ToolError::NotFound(tool) => PdfError::ToolNotFound(not_found_hint(&tool)),
            ToolError::Failed { stderr, .. } => PdfError::Unreadable(stderr),
            ToolError::Io(e) => PdfError::Io(e),
        })?;

        parse_page_count(&stdout).ok_or_else(|| {
            PdfError::Unreadable(format!(
                "pdfinfo reported no page count for {}",
                pdf_path.display()
            ))
        })
    }

    fn page_text(&self, pdf_path: &Path, page: u32) -> Result<String, PdfError> {
        let page_str = page.to_string();
        let mut cmd = Command::new(&self.pdftotext);
        cmd.args(["-enc", "UTF-8", "-f", &page_str, "-l", &page_str])
            .arg(pdf_path)
            .arg("-"); // Output to stdout

        run_capture(&mut cmd, &self.pdftotext).map_err(|e| match e {
            ToolError::NotFound(tool) => PdfError::ToolNotFound(not_found_hint(&tool)),
            ToolError::Failed { stderr, .. } => {
                PdfError::Unreadable(format!("pdftotext failed on page {}: {}", page, stderr))
            }
            ToolError::Io(e) => PdfError::Io(e),
        })
    }

    fn render_page(
        &self,
        pdf_path: &Path,
        page: u32,
        dpi: u32,
        output_dir: &Path,
    ) -> Result<PathBuf, PdfError> {
        let page_str = page.to_string();
        let dpi_str = dpi.to_string();
        let output_prefix = output_dir.join(format!("page-{}", page));

        // -singlefile drops pdftoppm's zero-padded page suffix
        let mut cmd = Command::new(&self.pdftoppm);
        cmd.args(["-png", "-singlefile", "-r", &dpi_str, "-f", &page_str, "-l", &page_str])
            .arg(pdf_path)
            .arg(&output_prefix);

        run_capture(&mut cmd, &self.pdftoppm).map_err(|e| match e {
            ToolError::NotFound(tool) => PdfError::ToolNotFound(not_found_hint(&tool)),
            ToolError::Failed { stderr, .. } => PdfError::RenderFailed {
                page,
                message: stderr,
            },
            ToolError::Io(e) => PdfError::Io(e),
        })?;

        let image_path = output_prefix.with_extension("png");
        if image_path.exists() {
            Ok(image_path)
        } else {
            Err(PdfError::RenderFailed {
                page,
                message: "no image generated".to_string(),
            })
        }
    }

    fn is_available(&self) -> bool {
        self.tools().iter().all(|tool| check_binary(tool))
    }

    fn availability_hint(&self) -> String {
        match self.tools().iter().find(|tool| !check_binary(tool)) {
            Some(tool) => format!(
                "{} not installed. Install with: apt install poppler-utils",
                tool
            ),
            None => "poppler-utils is available".to_string(),
        }
    }
}
