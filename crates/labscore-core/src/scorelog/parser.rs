use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::warn;

use crate::error::{Error, Result};
use crate::scorelog::{BestScoreRecord, BestScores, ParsePolicy, ParsedLine, ScoreEvent};

/// Field separator inside an event line.
pub const FIELD_SEPARATOR: &str = " : ";

/// Date format of the `date` field (`DD.MM.YY`).
pub const DATE_FORMAT: &str = "%d.%m.%y";

static LAB_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}\.[0-9]{2}\.[0-9]{2}$").unwrap());
static SCORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").unwrap()
});

/// Parse a single log line.
///
/// The line is trimmed and split on `" : "`. It is an event only when it has
/// exactly five fields and the `lab`, `date` and `score` fields have the
/// right shape; everything else is `Noise`. A line with the right shape but
/// an unusable value (lab `0`, `31.02.23`, a score that overflows) is
/// `Malformed`.
pub fn parse_line(line: &str) -> ParsedLine {
    let line = line.trim();
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let [lab, teacher, date, score, note] = fields.as_slice() else {
        return ParsedLine::Noise;
    };

    if !LAB_RE.is_match(lab) || !DATE_RE.is_match(date) || !SCORE_RE.is_match(score) {
        return ParsedLine::Noise;
    }

    let malformed = |message: String| ParsedLine::Malformed {
        line: line.to_string(),
        message,
    };

    let lab = match lab.parse::<u32>() {
        Ok(0) => return malformed("lab number must be positive".to_string()),
        Ok(n) => n,
        Err(e) => return malformed(format!("invalid lab number {:?}: {}", lab, e)),
    };
    let date = match NaiveDate::parse_from_str(date, DATE_FORMAT) {
        Ok(d) => d,
        Err(e) => return malformed(format!("invalid date {:?}: {}", date, e)),
    };
    let score = match score.parse::<f64>() {
        Ok(s) if s.is_finite() => s,
        Ok(_) => return malformed(format!("score {:?} is out of range", score)),
        Err(e) => return malformed(format!("invalid score {:?}: {}", score, e)),
    };

    ParsedLine::Event(ScoreEvent {
        lab,
        teacher: teacher.to_string(),
        date,
        score,
        note: note.to_string(),
    })
}

/// Parse every event line of a log, in order.
pub fn parse_events(log: &str, policy: ParsePolicy) -> Result<Vec<ScoreEvent>> {
    let mut events = Vec::new();

    for raw in log.lines() {
        match parse_line(raw) {
            ParsedLine::Event(event) => events.push(event),
            ParsedLine::Noise => {}
            ParsedLine::Malformed { line, message } => match policy {
                ParsePolicy::Lenient => warn!("Skipping log line {:?}: {}", line, message),
                ParsePolicy::Strict => return Err(Error::LogParse { line, message }),
            },
        }
    }

    Ok(events)
}

/// Parse a log and keep the best score of each lab, ordered by lab.
pub fn parse_with_policy(log: &str, policy: ParsePolicy) -> Result<Vec<BestScoreRecord>> {
    let events = parse_events(log, policy)?;
    Ok(BestScores::from_events(&events).records())
}

/// Lenient `parse_with_policy`: malformed lines are skipped, so this never fails.
pub fn parse(log: &str) -> Vec<BestScoreRecord> {
    let events = parse_events(log, ParsePolicy::Lenient).unwrap_or_default();
    BestScores::from_events(&events).records()
}
