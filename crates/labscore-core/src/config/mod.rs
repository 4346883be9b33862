//! Runtime configuration.
//!
//! This module contains the settings for one summary run:
//! - `Config` - repository, summary document and parsing options
//! - `RepositoryRef` - `owner/name` pair addressed on the hosting API
//! - Default values shared by the library and the CLI
//!
//! The access token is not part of `Config`; the caller hands it
//! to the store backend directly.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::scorelog::ParsePolicy;

/// Default values for a summary run.
pub mod defaults {
    /// Reserved name of the summary document at the repository root.
    pub const SUMMARY_PATH: &str = "README.md";

    /// Title heading of the summary document.
    pub const TITLE: &str = "Lab scores";

    /// Characters stripped from a log file name to get the student name (`.md`).
    pub const NAME_SUFFIX_LEN: usize = 3;

    /// GitHub REST API root.
    pub const API_BASE: &str = "https://api.github.com";

    /// Request timeout for the hosting API.
    pub const TIMEOUT_SECS: u64 = 30;

    /// Commit message used when none is given.
    pub const COMMIT_MESSAGE: &str = "Update lab scores";
}

/// An `owner/name` repository reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepositoryRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(Error::ConfigParseError(format!(
                "repository must be in owner/name form, got {:?}",
                s
            ))),
        }
    }
}

impl TryFrom<String> for RepositoryRef {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<RepositoryRef> for String {
    fn from(value: RepositoryRef) -> Self {
        value.to_string()
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub repository: Option<RepositoryRef>,
    pub branch: Option<String>,
    pub api_base: String,
    pub summary_path: String,
    pub title: String,
    pub name_suffix_len: usize,
    pub policy: ParsePolicy,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository: None,
            branch: None,
            api_base: defaults::API_BASE.to_string(),
            summary_path: defaults::SUMMARY_PATH.to_string(),
            title: defaults::TITLE.to_string(),
            name_suffix_len: defaults::NAME_SUFFIX_LEN,
            policy: ParsePolicy::default(),
            timeout_secs: defaults::TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load config from a TOML file. Missing keys take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
