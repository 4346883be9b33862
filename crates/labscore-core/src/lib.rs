//! # labscore-core
//!
//! Core library for the lab score summary.
//!
//! This crate provides:
//! - Lab log parsing and best-score reduction
//! - Per-group score tables
//! - HTML/TSV/JSON rendering
//! - The content store abstraction (GitHub, local directory, in-memory)
//! - The summary driver that ties them together

pub mod config;
pub mod error;
pub mod export;
pub mod scorelog;
pub mod store;
pub mod summary;
pub mod table;

// Re-export from config module
pub use config::{Config, RepositoryRef};

// Re-export from error module
pub use error::{Error, Result};

// Re-export from export module
pub use export::{
    ExportFormat, generate_groups_json, generate_groups_tsv, render, render_group_html,
    render_summary,
};

// Re-export from scorelog module
pub use scorelog::{
    BestScoreRecord, BestScores, ParsePolicy, ParsedLine, ScoreEvent, parse, parse_events,
    parse_line, parse_with_policy,
};

// Re-export from store module
pub use store::{ContentStore, Entry, EntryKind, GitHubStore, LocalStore, MemoryStore, StoredFile};

// Re-export from summary module
pub use summary::{PublishOutcome, build_summary, collect_groups, publish};

// Re-export from table module
pub use table::{GroupTable, LogEntry, StudentIdentity, StudentRow, aggregate};
