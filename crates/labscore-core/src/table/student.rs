use std::collections::BTreeMap;

use serde::Serialize;

use crate::scorelog::BestScoreRecord;

/// Display name for a student log file: the last `suffix_len` characters
/// are dropped and underscores become spaces.
pub fn display_name(file_name: &str, suffix_len: usize) -> String {
    let keep = file_name.chars().count().saturating_sub(suffix_len);
    file_name
        .chars()
        .take(keep)
        .map(|c| if c == '_' { ' ' } else { c })
        .collect()
}

/// Cell text for a score.
///
/// Uses the shortest representation that parses back to the same `f64`,
/// always with a fractional part or exponent (`9.0`, `10.5`, `1e-7`).
pub fn format_score(score: f64) -> String {
    format!("{:?}", score)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentIdentity {
    /// File name inside the group directory.
    pub name: String,
    pub display_name: String,
    /// Link to the log file.
    pub url: String,
}

impl StudentIdentity {
    pub fn new(name: &str, url: &str, suffix_len: usize) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name(name, suffix_len),
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentRow {
    pub identity: StudentIdentity,
    pub scores: BTreeMap<u32, f64>,
}

impl StudentRow {
    pub fn new(identity: StudentIdentity, records: &[BestScoreRecord]) -> Self {
        let scores = records.iter().map(|r| (r.lab, r.score)).collect();
        Self { identity, scores }
    }

    pub fn score(&self, lab: u32) -> Option<f64> {
        self.scores.get(&lab).copied()
    }

    /// Rendered cell for `lab`; empty when the student has no score for it.
    pub fn cell(&self, lab: u32) -> String {
        self.score(lab).map(format_score).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("Ivanov_Ivan.md", 3), "Ivanov Ivan");
        assert_eq!(display_name("Doe_John_Jr.md", 3), "Doe John Jr");
        assert_eq!(display_name("ab", 3), "");
        assert_eq!(display_name("plain", 0), "plain");
    }

    #[test]
    fn test_display_name_counts_characters() {
        assert_eq!(display_name("Иванов_Иван.md", 3), "Иванов Иван");
    }

    #[test]
    fn test_format_score_round_trips() {
        assert_eq!(format_score(9.0), "9.0");
        assert_eq!(format_score(10.0), "10.0");
        assert_eq!(format_score(7.25), "7.25");
        assert_eq!(format_score(-3.0), "-3.0");
        for value in [0.1, 1e-7, 123456.789, 2.5e20, -0.001] {
            assert_eq!(format_score(value).parse::<f64>().unwrap(), value);
        }
    }

    #[test]
    fn test_cells() {
        let identity = StudentIdentity::new("A_B.md", "https://example.com/A_B.md", 3);
        let row = StudentRow::new(identity, &[BestScoreRecord { lab: 1, score: 9.0 }]);
        assert_eq!(row.identity.display_name, "A B");
        assert_eq!(row.cell(1), "9.0");
        assert_eq!(row.cell(2), "");
    }
}
