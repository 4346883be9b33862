mod cli;
mod cli_utils;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use labscore_core::config::defaults;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Default to info for our own crates when RUST_LOG is unset
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("labscore=info,labscore_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli_utils::load_config(&args)?;

    match &args.command {
        Some(Command::Parse { file }) => commands::parse::run(file, config.policy),
        Some(Command::Render { output, format }) => {
            let store = cli_utils::open_store(&args, &config)?;
            commands::render::run(store.as_ref(), &config, output.as_deref(), *format)
        }
        Some(Command::Publish { message, dry_run }) => {
            let mut store = cli_utils::open_store(&args, &config)?;
            commands::publish::run(store.as_mut(), &config, message, *dry_run)
        }
        None => {
            let mut store = cli_utils::open_store(&args, &config)?;
            commands::publish::run(store.as_mut(), &config, defaults::COMMIT_MESSAGE, false)
        }
    }
}
