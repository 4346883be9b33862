//! Parse command: best scores of one local log file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use labscore_core::scorelog::DATE_FORMAT;
use labscore_core::table::format_score;
use labscore_core::{BestScores, ParsePolicy, parse_events};
use owo_colors::OwoColorize;

pub fn run(file: &Path, policy: ParsePolicy) -> Result<()> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read log file {}", file.display()))?;
    let events = parse_events(&content, policy)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    let best = BestScores::from_events(&events);

    println!(
        "{} {} events, {} labs",
        file.display().bold(),
        events.len(),
        best.len()
    );
    for record in best.records() {
        let date = achieved_on(&best, record.lab);
        println!(
            "  lab {:>3}  {:>10}  {}",
            record.lab,
            format_score(record.score).green(),
            date.dimmed()
        );
    }

    Ok(())
}

/// Date of the best score, in the log's own date format.
fn achieved_on(best: &BestScores, lab: u32) -> String {
    best.achieved_on(lab)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
