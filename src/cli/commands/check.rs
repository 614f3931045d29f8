//! Tool availability report.

use console::style;

use crate::config::Config;
use crate::ocr::{OcrEngine, TesseractBackend};
use crate::pdf::{PdfBackend, PopplerBackend};
use crate::tools::check_tools;

/// Print which external tools are installed.
pub fn cmd_check(config: &Config) -> anyhow::Result<()> {
    println!("\n{}", style("Tool Status").bold());
    println!("{}", "-".repeat(50));

    let mut all_found = true;
    for (tool, available) in check_tools(config) {
        let status = if available {
            style("✓ found").green()
        } else {
            all_found = false;
            style("✗ not found").red()
        };
        println!("  {:<25} {}", tool, status);
    }

    let poppler = PopplerBackend::from_config(config);
    let tesseract = TesseractBackend::from_config(config);

    println!("\n{}", style("Extraction:").cyan());
    println!(
        "  {:<25} {}",
        "Text layer",
        if poppler.is_available() {
            style("✓ available").green()
        } else {
            style("✗ not available").red()
        }
    );
    println!(
        "  {:<25} {}",
        format!("OCR ({})", tesseract.language()),
        if tesseract.is_available() {
            style("✓ available").green()
        } else {
            style("○ scanned certificates will fail").yellow()
        }
    );

    println!();
    if all_found {
        println!("{} All tools are available", style("✓").green());
    } else {
        println!("{} Some tools are missing:", style("!").yellow());
        if !poppler.is_available() {
            println!("  {}", style(poppler.availability_hint()).dim());
        }
        if !tesseract.is_available() {
            println!("  {}", style(tesseract.availability_hint()).dim());
        }
    }

    Ok(())
}
