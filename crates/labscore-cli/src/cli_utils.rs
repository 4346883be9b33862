//! Common CLI utility functions shared across commands.

use anyhow::{Context, Result};
use labscore_core::{Config, ContentStore, GitHubStore, LocalStore, ParsePolicy};
use tracing::info;

use crate::cli::Args;

/// Config file merged with command-line overrides.
pub fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(repo) = &args.repo {
        config.repository = Some(repo.parse()?);
    }
    if let Some(branch) = &args.branch {
        config.branch = Some(branch.clone());
    }
    if args.strict {
        config.policy = ParsePolicy::Strict;
    }

    Ok(config)
}

/// Open the local directory if one was given, otherwise the GitHub repository.
pub fn open_store(args: &Args, config: &Config) -> Result<Box<dyn ContentStore>> {
    if let Some(dir) = &args.local {
        let store = LocalStore::new(dir)
            .with_context(|| format!("Cannot open local directory {}", dir.display()))?;
        info!("Using local directory {}", dir.display());
        return Ok(Box::new(store));
    }

    let repository = config.repository.clone().context(
        "No repository specified. Use --repo owner/name, LABSCORE_REPO env, or the config file.",
    )?;
    let token = args
        .token
        .clone()
        .context("No token specified. Use --token or GITHUB_TOKEN env.")?;

    info!("Using GitHub repository {}", repository);
    Ok(Box::new(GitHubStore::new(repository, token, config)))
}
