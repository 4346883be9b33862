//! Summary driver: walk the group directories of a content store, build a
//! table per group and commit the rendered document back.

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::export::render_summary;
use crate::store::{ContentStore, Entry};
use crate::table::{GroupTable, LogEntry, aggregate};

/// Result of `publish`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The stored document already has the rendered content.
    Unchanged,
    Updated { revision: String },
}

/// Whether a top-level entry is a group directory.
///
/// Hidden entries and the summary document itself are never groups.
pub fn is_group_dir(entry: &Entry, summary_path: &str) -> bool {
    entry.is_dir() && !entry.is_hidden() && entry.name != summary_path.trim_matches('/')
}

/// Build the table for one group directory.
///
/// Files are read one after another; a failed read aborts the group.
pub fn collect_group<S: ContentStore + ?Sized>(
    store: &S,
    dir: &Entry,
    config: &Config,
) -> Result<GroupTable> {
    let mut logs = Vec::new();

    for entry in store.list_entries(&dir.path)? {
        if !entry.is_file() || entry.is_hidden() {
            continue;
        }
        let file = store.read_text(&entry.path)?;
        debug!("Fetched {} ({} bytes)", entry.path, file.content.len());
        let url = if entry.url.is_empty() { file.url } else { entry.url };
        logs.push(LogEntry::new(entry.name, url, file.content));
    }

    let table = aggregate(&dir.name, &logs, config.name_suffix_len, config.policy)?;
    info!(
        "Group {}: {} students, {} labs",
        table.name,
        table.len(),
        table.labs().len()
    );
    Ok(table)
}

/// Build the tables of every group, ordered by group name.
pub fn collect_groups<S: ContentStore + ?Sized>(
    store: &S,
    config: &Config,
) -> Result<Vec<GroupTable>> {
    let mut dirs: Vec<Entry> = store
        .list_entries("")?
        .into_iter()
        .filter(|e| is_group_dir(e, &config.summary_path))
        .collect();
    dirs.sort_by(|a, b| a.name.cmp(&b.name));

    dirs.iter()
        .map(|dir| collect_group(store, dir, config))
        .collect()
}

/// Render the summary document for the whole store.
pub fn build_summary<S: ContentStore + ?Sized>(store: &S, config: &Config) -> Result<String> {
    let groups = collect_groups(store, config)?;
    Ok(render_summary(&config.title, &groups))
}

/// Render the summary and commit it to `config.summary_path`.
///
/// The current document's revision is read first and passed to the write,
/// so a concurrent change to the document fails the run instead of being
/// overwritten. A missing document is created.
pub fn publish<S: ContentStore + ?Sized>(
    store: &mut S,
    config: &Config,
    message: &str,
) -> Result<PublishOutcome> {
    let current = match store.read_text(&config.summary_path) {
        Ok(file) => Some(file),
        Err(Error::NotFound(_)) => None,
        Err(e) => return Err(e),
    };

    let document = build_summary(&*store, config)?;

    if let Some(file) = &current
        && file.content == document
    {
        info!("{} is up to date", config.summary_path);
        return Ok(PublishOutcome::Unchanged);
    }

    let revision = store.write_text(
        &config.summary_path,
        message,
        &document,
        current.as_ref().map(|f| f.revision.as_str()),
    )?;
    info!("Updated {} ({})", config.summary_path, revision);

    Ok(PublishOutcome::Updated { revision })
}
