//! Helpers for invoking the external command-line tools (Poppler, Tesseract).

use std::process::{Command, Output};

use thiserror::Error;

use crate::config::Config;

/// Failure modes of an external tool invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("External tool not found: {0}")]
    NotFound(String),

    #[error("{tool} failed: {stderr}")]
    Failed { tool: String, stderr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run a command, returning stdout on success.
pub fn run_capture(cmd: &mut Command, tool: &str) -> Result<String, ToolError> {
    handle_cmd_output(cmd.output(), tool)
}

/// Handle command output, extracting stdout on success or returning appropriate error.
fn handle_cmd_output(result: std::io::Result<Output>, tool: &str) -> Result<String, ToolError> {
    match result {
        Ok(output) => {
            if output.status.success() {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            } else {
                Err(ToolError::Failed {
                    tool: tool.to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                })
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ToolError::NotFound(tool.to_string()))
        }
        Err(e) => Err(ToolError::Io(e)),
    }
}

/// Check if a binary is available in PATH (or at the given path).
pub fn check_binary(name: &str) -> bool {
    which::which(name).is_ok()
}

/// Availability of every tool the pipeline may invoke, in call order.
pub fn check_tools(config: &Config) -> Vec<(String, bool)> {
    [
        &config.pdfinfo_cmd,
        &config.pdftotext_cmd,
        &config.pdftoppm_cmd,
        &config.tesseract_cmd,
    ]
    .iter()
    .map(|tool| (tool.to_string(), check_binary(tool)))
    .collect()
}
