use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::Result;
use crate::scorelog::{ParsePolicy, parse_with_policy};
use crate::table::{StudentIdentity, StudentRow};

/// One student's log as fetched from the content store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub name: String,
    pub url: String,
    pub text: String,
}

impl LogEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            text: text.into(),
        }
    }
}

/// Best scores of every student in a group.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupTable {
    pub name: String,
    /// Rows in the order the log files were supplied.
    pub rows: Vec<StudentRow>,
}

impl GroupTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: StudentRow) {
        self.rows.push(row);
    }

    /// Column set: every lab any student in the group has a score for, ascending.
    pub fn labs(&self) -> Vec<u32> {
        let labs: BTreeSet<u32> = self
            .rows
            .iter()
            .flat_map(|row| row.scores.keys().copied())
            .collect();
        labs.into_iter().collect()
    }

    /// Find a row by log file name.
    pub fn row(&self, name: &str) -> Option<&StudentRow> {
        self.rows.iter().find(|row| row.identity.name == name)
    }

    /// Fully filled cell grid: student file name -> lab -> display string.
    ///
    /// Every row carries every lab column; missing pairs are `""`.
    /// Map keys iterate in string order (`"10"` before `"2"`); use
    /// [`GroupTable::labs`] for column order.
    pub fn cells(&self) -> Vec<(String, BTreeMap<String, String>)> {
        let labs = self.labs();
        self.rows
            .iter()
            .map(|row| {
                let cells = labs
                    .iter()
                    .map(|&lab| (lab.to_string(), row.cell(lab)))
                    .collect();
                (row.identity.name.clone(), cells)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the table for one group.
///
/// Every entry yields a row, including students without a single valid log
/// line. With `ParsePolicy::Lenient` this never fails.
pub fn aggregate(
    name: &str,
    entries: &[LogEntry],
    suffix_len: usize,
    policy: ParsePolicy,
) -> Result<GroupTable> {
    let mut table = GroupTable::new(name);

    for entry in entries {
        let records = parse_with_policy(&entry.text, policy)?;
        debug!(
            "{}/{}: {} labs with scores",
            name,
            entry.name,
            records.len()
        );
        let identity = StudentIdentity::new(&entry.name, &entry.url, suffix_len);
        table.push(StudentRow::new(identity, &records));
    }

    Ok(table)
}
