//! Preview: show extracted text and the resolved name without renaming.

use std::path::Path;

use console::style;

use crate::cli::helpers::truncate;
use crate::config::Config;
use crate::pipeline::Pipeline;
use crate::rename::target_path;

pub fn cmd_preview(config: Config, pdf_file: &Path) -> anyhow::Result<()> {
    let pipeline = Pipeline::from_config(config)?;
    let extraction = pipeline.extract(pdf_file)?;

    println!(
        "\n{} {}",
        style("Extracted text").bold(),
        style(format!(
            "(via {}, {} page{})",
            extraction.method,
            extraction.page_count,
            if extraction.page_count == 1 { "" } else { "s" }
        ))
        .dim()
    );
    println!("{}", "=".repeat(60));
    println!(
        "{}",
        truncate(&extraction.text, pipeline.config().preview_chars)
    );
    println!("{}", "=".repeat(60));

    for failure in &extraction.failed_pages {
        println!("  {} {}", style("!").yellow(), failure);
    }

    let name = pipeline.find_name(&extraction.text)?;
    println!(
        "\n  {:<26} '{}'",
        "Found certification name:",
        style(&name.candidate).cyan()
    );
    println!(
        "  {:<26} '{}'",
        "Snake case version:",
        style(&name.token).green()
    );

    let target = target_path(pdf_file, &name.token, pipeline.config().max_rename_attempts)?;
    println!(
        "  {:<26} {}",
        "Would rename to:",
        target
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    );

    Ok(())
}
