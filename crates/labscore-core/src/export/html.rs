//! HTML table and summary document rendering.

use std::fmt::Write as _;

use crate::table::GroupTable;

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render one group as an HTML `<table>` fragment.
///
/// Header row is `Student` followed by the lab numbers ascending. The first
/// cell of each row links the student's log file; labs without a score
/// render as an empty `<td></td>`.
pub fn render_group_html(table: &GroupTable) -> String {
    let labs = table.labs();
    let mut out = String::new();

    let _ = writeln!(out, "<table border=\"1\" class=\"dataframe\">");
    let _ = writeln!(out, "  <thead>");
    let _ = writeln!(out, "    <tr style=\"text-align: right;\">");
    let _ = writeln!(out, "      <th>Student</th>");
    for lab in &labs {
        let _ = writeln!(out, "      <th>{}</th>", lab);
    }
    let _ = writeln!(out, "    </tr>");
    let _ = writeln!(out, "  </thead>");
    let _ = writeln!(out, "  <tbody>");
    for row in &table.rows {
        let _ = writeln!(out, "    <tr>");
        let _ = writeln!(
            out,
            "      <th><a href=\"{}\">{}</a></th>",
            escape_html(&row.identity.url),
            escape_html(&row.identity.display_name)
        );
        for &lab in &labs {
            let _ = writeln!(out, "      <td>{}</td>", row.cell(lab));
        }
        let _ = writeln!(out, "    </tr>");
    }
    let _ = writeln!(out, "  </tbody>");
    let _ = write!(out, "</table>");

    out
}

/// Render the summary document: a title heading, then every group's table
/// under its own heading.
pub fn render_summary(title: &str, groups: &[GroupTable]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", title);

    for group in groups {
        let _ = writeln!(out);
        let _ = writeln!(out, "## {}", group.name);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", render_group_html(group));
    }

    out
}

/// Read the cell text back out of a rendered group table.
///
/// Returns one `Vec` per body row: the student display name followed by the
/// lab cells in column order.
pub fn read_table_cells(html: &str) -> Vec<Vec<String>> {
    let Some(body_start) = html.find("<tbody>") else {
        return Vec::new();
    };
    let body = &html[body_start..];

    body.split("<tr>")
        .skip(1)
        .map(|row| {
            let row = row.split("</tr>").next().unwrap_or_default();
            let mut cells = Vec::new();
            if let Some(name) = between(row, "\">", "</a>") {
                cells.push(unescape_html(name));
            }
            cells.extend(
                row.split("<td>")
                    .skip(1)
                    .filter_map(|cell| cell.split("</td>").next())
                    .map(unescape_html),
            );
            cells
        })
        .collect()
}

fn between<'a>(text: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = text.find(start)? + start.len();
    let len = text[from..].find(end)?;
    Some(&text[from..from + len])
}

fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorelog::ParsePolicy;
    use crate::table::{LogEntry, aggregate};

    fn sample() -> GroupTable {
        let entries = [
            LogEntry::new(
                "Doe_Jane.md",
                "https://example.com/g1/Doe_Jane.md",
                "1 : T : 01.09.23 : 9.0 : ok",
            ),
            LogEntry::new(
                "Roe_Rick.md",
                "https://example.com/g1/Roe_Rick.md",
                "2 : T : 01.09.23 : 10.0 : ok",
            ),
        ];
        aggregate("g1", &entries, 3, ParsePolicy::Lenient).unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c\"'"), "a&lt;b&gt;&amp;&quot;c&quot;&#39;");
        assert_eq!(unescape_html(&escape_html("x & <y>")), "x & <y>");
    }

    #[test]
    fn test_render_group_html() {
        let html = render_group_html(&sample());
        let expected = "\
<table border=\"1\" class=\"dataframe\">
  <thead>
    <tr style=\"text-align: right;\">
      <th>Student</th>
      <th>1</th>
      <th>2</th>
    </tr>
  </thead>
  <tbody>
    <tr>
      <th><a href=\"https://example.com/g1/Doe_Jane.md\">Doe Jane</a></th>
      <td>9.0</td>
      <td></td>
    </tr>
    <tr>
      <th><a href=\"https://example.com/g1/Roe_Rick.md\">Roe Rick</a></th>
      <td></td>
      <td>10.0</td>
    </tr>
  </tbody>
</table>";
        assert_eq!(html, expected);
    }

    #[test]
    fn test_rendered_cells_read_back() {
        let table = sample();
        let cells = read_table_cells(&render_group_html(&table));
        assert_eq!(
            cells,
            vec![
                vec!["Doe Jane".to_string(), "9.0".to_string(), String::new()],
                vec!["Roe Rick".to_string(), String::new(), "10.0".to_string()],
            ]
        );
        let labs = table.labs();
        for (row, (_, expected)) in cells.iter().zip(table.cells()) {
            let values: Vec<String> = labs
                .iter()
                .map(|lab| expected[&lab.to_string()].clone())
                .collect();
            assert_eq!(&row[1..], values.as_slice());
        }
    }

    #[test]
    fn test_rendered_columns_in_numeric_order() {
        let entries = [LogEntry::new(
            "A.md",
            "u",
            "10 : T : 01.09.23 : 10 : x\n2 : T : 01.09.23 : 2 : x",
        )];
        let table = aggregate("g", &entries, 3, ParsePolicy::Lenient).unwrap();
        let html = render_group_html(&table);
        assert!(html.find("<th>2</th>").unwrap() < html.find("<th>10</th>").unwrap());

        let cells = read_table_cells(&html);
        assert_eq!(cells[0][1..], ["2.0", "10.0"]);
    }

    #[test]
    fn test_render_escapes_names() {
        let entries = [LogEntry::new("<b>_&.md", "https://x/?a=1&b=2", "")];
        let table = aggregate("g", &entries, 3, ParsePolicy::Lenient).unwrap();
        let html = render_group_html(&table);
        assert!(html.contains("<a href=\"https://x/?a=1&amp;b=2\">&lt;b&gt; &amp;</a>"));
    }

    #[test]
    fn test_render_summary() {
        let doc = render_summary("Lab scores", &[sample()]);
        assert!(doc.starts_with("# Lab scores\n\n## g1\n\n<table"));
        assert!(doc.ends_with("</table>\n"));
    }

    #[test]
    fn test_render_summary_without_groups() {
        assert_eq!(render_summary("Lab scores", &[]), "# Lab scores\n");
    }
}
