//! Render command for inspecting group tables without committing.

use anyhow::{Context, Result};
use labscore_core::{Config, ContentStore, collect_groups, render};

use crate::cli::OutputFormat;

pub fn run(
    store: &dyn ContentStore,
    config: &Config,
    output: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let groups = collect_groups(store, config).context("Failed to collect groups")?;
    eprintln!("Collected {} groups", groups.len());

    let content = render(format.into(), &config.title, &groups)?;

    if let Some(output_path) = output {
        std::fs::write(output_path, &content)
            .with_context(|| format!("Failed to write {}", output_path))?;
        eprintln!("Exported to: {}", output_path);
    } else {
        println!("{}", content);
    }

    Ok(())
}
