//! Preview command: assemble the project into one document.

use std::path::Path;

use anyhow::Result;
use console::style;

use appforge_core::preview;

use crate::cli::project;

/// Assemble `dir` into a single self-contained document at `output`.
pub async fn preview(dir: &Path, output: &Path, json: bool) -> Result<()> {
    let bundle = project::load_bundle(dir)?;
    let document = preview::assemble(&bundle);
    tokio::fs::write(output, &document).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "output": output.display().to_string(),
                "bytes": document.len(),
                "files": bundle.len(),
            })
        );
    } else {
        println!(
            "  {} Assembled {} file{} into {}",
            style("✓").green().bold(),
            bundle.len(),
            if bundle.len() == 1 { "" } else { "s" },
            style(output.display()).bold()
        );
    }
    Ok(())
}
