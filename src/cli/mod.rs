//! Command-line interface.
//!
//! `certname <PDF>` renames the file; `--preview-only` prints what would
//! happen; `--check` reports tool availability.

mod commands;
mod helpers;

use std::path::PathBuf;

use clap::Parser;

use crate::config::{load_config, Config, LoadOptions};

#[derive(Parser)]
#[command(name = "certname")]
#[command(about = "Extract the certified name from a certificate PDF and rename the file")]
#[command(version)]
pub struct Cli {
    /// Path to the PDF file to process
    #[arg(required_unless_present = "check")]
    pdf_file: Option<PathBuf>,

    /// Only extract and preview text without renaming the file
    #[arg(long)]
    preview_only: bool,

    /// Report whether the PDF and OCR tools are installed, then exit
    #[arg(long, conflicts_with = "preview_only")]
    check: bool,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, env = "CERTNAME_CONFIG")]
    config: Option<PathBuf>,

    /// OCR rendering scale relative to 72 DPI
    #[arg(long)]
    scale: Option<f32>,

    /// Tesseract language (e.g. eng, deu)
    #[arg(long)]
    lang: Option<String>,

    /// Phrase that precedes the name
    #[arg(long)]
    anchor: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply command-line overrides on top of loaded configuration.
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(scale) = self.scale {
            config.render_scale = scale;
        }
        if let Some(ref lang) = self.lang {
            config.ocr_language = lang.clone();
        }
        if let Some(ref anchor) = self.anchor {
            config.anchor_phrase = anchor.clone();
        }
    }
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config.clone(),
    };
    let mut config = load_config(&options).await?;
    cli.apply_overrides(&mut config);

    if cli.check {
        return commands::cmd_check(&config);
    }

    let Some(pdf_file) = cli.pdf_file.as_deref() else {
        anyhow::bail!("No PDF file given");
    };

    if cli.preview_only {
        commands::cmd_preview(config, pdf_file)
    } else {
        commands::cmd_rename(config, pdf_file, cli.verbose)
    }
}
