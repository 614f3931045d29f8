//! Default command: resolve the name and rename the file in place.

use std::path::Path;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Config;
use crate::pipeline::Pipeline;

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn cmd_rename(config: Config, pdf_file: &Path, verbose: bool) -> anyhow::Result<()> {
    let pipeline = Pipeline::from_config(config)?;

    // Log lines would tear through the spinner
    let spinner = if verbose {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(format!("Reading {}", display_name(pdf_file)));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };

    let result = pipeline.process(pdf_file);
    spinner.finish_and_clear();
    let processed = result?;

    let name = &processed.resolution.name;
    println!(
        "  {} Found name '{}' (via {})",
        style("✓").green(),
        name.candidate,
        processed.resolution.extraction.method
    );

    if processed.rename.is_unchanged() {
        println!(
            "  {} '{}' is already named after the certificate holder",
            style("→").cyan(),
            display_name(&processed.rename.from)
        );
    } else {
        println!(
            "  {} Renamed '{}' {} '{}'",
            style("✓").green(),
            style(display_name(&processed.rename.from)).yellow(),
            style("→").cyan(),
            style(display_name(&processed.rename.to)).green()
        );
    }

    Ok(())
}
