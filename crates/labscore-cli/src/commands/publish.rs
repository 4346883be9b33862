//! Publish command: rebuild the summary document and commit it.

use anyhow::{Context, Result};
use labscore_core::{Config, ContentStore, PublishOutcome, build_summary, publish};

pub fn run(
    store: &mut dyn ContentStore,
    config: &Config,
    message: &str,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        let document = build_summary(&*store, config).context("Failed to build summary")?;
        println!("{}", document);
        return Ok(());
    }

    match publish(store, config, message)
        .with_context(|| format!("Failed to publish {}", config.summary_path))?
    {
        PublishOutcome::Unchanged => eprintln!("{} is already up to date", config.summary_path),
        PublishOutcome::Updated { revision } => {
            eprintln!("Committed {} ({})", config.summary_path, revision)
        }
    }

    Ok(())
}
