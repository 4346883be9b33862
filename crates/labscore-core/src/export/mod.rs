//! Export formats for group score tables.

mod html;

pub use html::*;

use std::collections::BTreeMap;

use serde::Serialize;
use strum::{Display, EnumString};

use crate::error::Result;
use crate::table::GroupTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    /// Summary document with one HTML table per group (what gets committed).
    #[default]
    Html,
    Tsv,
    Json,
}

#[derive(Debug, Serialize)]
struct GroupJson<'a> {
    group: &'a str,
    labs: Vec<u32>,
    students: Vec<StudentJson<'a>>,
}

#[derive(Debug, Serialize)]
struct StudentJson<'a> {
    student: &'a str,
    file: &'a str,
    url: &'a str,
    /// Keyed by lab number as a string, so keys serialize in string order
    /// (`"10"` before `"2"`). Column order is the group's `labs` array.
    scores: BTreeMap<String, String>,
}

/// TSV header for one group: `group`, `student`, then the lab numbers.
pub fn format_group_tsv_header(labs: &[u32]) -> String {
    let mut columns = vec!["group".to_string(), "student".to_string()];
    columns.extend(labs.iter().map(|lab| lab.to_string()));
    columns.join("\t")
}

/// Generate TSV for a set of groups. Each group gets its own header line,
/// since the column sets differ between groups.
pub fn generate_groups_tsv(groups: &[GroupTable]) -> String {
    let mut lines = Vec::new();

    for group in groups {
        let labs = group.labs();
        lines.push(format_group_tsv_header(&labs));
        for row in &group.rows {
            let mut values = vec![group.name.clone(), row.identity.display_name.clone()];
            values.extend(labs.iter().map(|&lab| row.cell(lab)));
            lines.push(values.join("\t"));
        }
    }

    lines.join("\n")
}

/// Generate pretty-printed JSON for a set of groups.
pub fn generate_groups_json(groups: &[GroupTable]) -> Result<String> {
    let data: Vec<GroupJson> = groups
        .iter()
        .map(|group| {
            let labs = group.labs();
            let students = group
                .rows
                .iter()
                .map(|row| StudentJson {
                    student: &row.identity.display_name,
                    file: &row.identity.name,
                    url: &row.identity.url,
                    scores: labs
                        .iter()
                        .map(|&lab| (lab.to_string(), row.cell(lab)))
                        .collect(),
                })
                .collect();
            GroupJson {
                group: &group.name,
                labs,
                students,
            }
        })
        .collect();

    Ok(serde_json::to_string_pretty(&data)?)
}

/// Render groups in the requested format.
pub fn render(format: ExportFormat, title: &str, groups: &[GroupTable]) -> Result<String> {
    match format {
        ExportFormat::Html => Ok(render_summary(title, groups)),
        ExportFormat::Tsv => Ok(generate_groups_tsv(groups)),
        ExportFormat::Json => generate_groups_json(groups),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorelog::ParsePolicy;
    use crate::table::{LogEntry, aggregate};

    fn sample() -> Vec<GroupTable> {
        let entries = [
            LogEntry::new("A_A.md", "u1", "1 : T : 01.09.23 : 9.0 : ok"),
            LogEntry::new("B_B.md", "u2", "2 : T : 01.09.23 : 1e-7 : ok"),
        ];
        vec![aggregate("g1", &entries, 3, ParsePolicy::Lenient).unwrap()]
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("tsv".parse::<ExportFormat>().unwrap(), ExportFormat::Tsv);
        assert_eq!(ExportFormat::Json.to_string(), "json");
        assert_eq!(ExportFormat::default(), ExportFormat::Html);
    }

    #[test]
    fn test_generate_groups_tsv() {
        let tsv = generate_groups_tsv(&sample());
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines[0], "group\tstudent\t1\t2");
        assert_eq!(lines[1], "g1\tA A\t9.0\t");
        assert_eq!(lines[2], "g1\tB B\t\t1e-7");
    }

    #[test]
    fn test_generate_groups_tsv_empty() {
        assert_eq!(generate_groups_tsv(&[]), "");
    }

    #[test]
    fn test_generate_groups_json() {
        let json = generate_groups_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["group"], "g1");
        assert_eq!(value[0]["labs"], serde_json::json!([1, 2]));
        assert_eq!(value[0]["students"][0]["student"], "A A");
        assert_eq!(value[0]["students"][0]["scores"]["1"], "9.0");
        assert_eq!(value[0]["students"][0]["scores"]["2"], "");
        assert_eq!(value[0]["students"][1]["url"], "u2");
    }

    #[test]
    fn test_generate_groups_json_labs_give_column_order() {
        let entries = [LogEntry::new(
            "A_A.md",
            "u1",
            "10 : T : 01.09.23 : 10 : ok\n2 : T : 01.09.23 : 2 : ok",
        )];
        let groups = vec![aggregate("g1", &entries, 3, ParsePolicy::Lenient).unwrap()];
        let json = generate_groups_json(&groups).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["labs"], serde_json::json!([2, 10]));

        let scores = &value[0]["students"][0]["scores"];
        let ordered: Vec<&str> = value[0]["labs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|lab| scores[lab.to_string()].as_str().unwrap())
            .collect();
        assert_eq!(ordered, ["2.0", "10.0"]);
        // map keys themselves are in string order
        assert!(json.find("\"10\": \"10.0\"").unwrap() < json.find("\"2\": \"2.0\"").unwrap());
    }

    #[test]
    fn test_render_dispatch() {
        let groups = sample();
        let html = render(ExportFormat::Html, "T", &groups).unwrap();
        assert!(html.starts_with("# T\n"));
        let tsv = render(ExportFormat::Tsv, "T", &groups).unwrap();
        assert!(tsv.starts_with("group\t"));
    }
}
