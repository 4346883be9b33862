use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One graded submission, parsed from a single log line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEvent {
    pub lab: u32,
    pub teacher: String,
    pub date: NaiveDate,
    pub score: f64,
    pub note: String,
}

/// Outcome of parsing one log line.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Event(ScoreEvent),
    /// Not an event line at all. Logs are expected to contain these.
    Noise,
    /// Shaped like an event, but a field value is unusable.
    Malformed { line: String, message: String },
}

/// What to do with a `ParsedLine::Malformed` line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParsePolicy {
    /// Skip the line and keep going.
    #[default]
    Lenient,
    /// Fail the whole log.
    Strict,
}
