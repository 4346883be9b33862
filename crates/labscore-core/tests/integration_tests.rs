//! Integration tests for labscore-core
//!
//! These tests run logs through parsing, aggregation, rendering and
//! publishing together. Per-module behavior is covered by unit tests.

use std::fs;

use labscore_core::export::read_table_cells;
use labscore_core::{
    BestScoreRecord, Config, ContentStore, Error, LocalStore, LogEntry, MemoryStore, ParsePolicy,
    PublishOutcome, aggregate, build_summary, parse, publish, render_group_html,
};
use tempfile::TempDir;

const JANE_LOG: &str = "\
1 : J.Doe : 01.09.23 : 7.5 : first try
1 : J.Doe : 05.09.23 : 9.0 : resubmit
2 : J.Doe : 02.09.23 : 10.0 : ok
garbage line
";

mod parse_tests {
    use super::*;

    #[test]
    fn test_documented_scenario() {
        assert_eq!(
            parse(JANE_LOG),
            vec![
                BestScoreRecord { lab: 1, score: 9.0 },
                BestScoreRecord { lab: 2, score: 10.0 },
            ]
        );
    }

    #[test]
    fn test_interleaved_labs() {
        let log = "\
3 : A : 01.09.23 : 2 : x
1 : A : 01.09.23 : 4 : x
3 : A : 02.09.23 : 6 : x
1 : A : 03.09.23 : 1 : x
";
        assert_eq!(
            parse(log),
            vec![
                BestScoreRecord { lab: 1, score: 4.0 },
                BestScoreRecord { lab: 3, score: 6.0 },
            ]
        );
    }
}

mod aggregate_tests {
    use super::*;

    #[test]
    fn test_two_student_scenario() {
        let entries = [
            LogEntry::new("A.md", "https://example.com/A.md", "1 : T : 01.09.23 : 9.0 : ok"),
            LogEntry::new("B.md", "https://example.com/B.md", "2 : T : 01.09.23 : 10.0 : ok"),
        ];
        let table = aggregate("group", &entries, 3, ParsePolicy::Lenient).unwrap();
        assert_eq!(table.labs(), vec![1, 2]);

        let cells = table.cells();
        let a = &cells[0].1;
        let b = &cells[1].1;
        assert_eq!((a["1"].as_str(), a["2"].as_str()), ("9.0", ""));
        assert_eq!((b["1"].as_str(), b["2"].as_str()), ("", "10.0"));
    }

    #[test]
    fn test_render_read_back_matches_reduction() {
        let entries = [
            LogEntry::new("Doe_Jane.md", "u1", JANE_LOG),
            LogEntry::new("Nobody.md", "u2", "no events"),
            LogEntry::new("Tiny.md", "u3", "4 : T : 01.09.23 : 1e-9 : x"),
        ];
        let table = aggregate("group", &entries, 3, ParsePolicy::Lenient).unwrap();
        let rendered = read_table_cells(&render_group_html(&table));

        assert_eq!(rendered.len(), 3);
        for (row, table_row) in rendered.iter().zip(&table.rows) {
            assert_eq!(row[0], table_row.identity.display_name);
            let expected: Vec<String> = table.labs().iter().map(|&l| table_row.cell(l)).collect();
            assert_eq!(&row[1..], expected.as_slice());
        }
        assert_eq!(rendered[1][1..], ["", "", ""]);
        assert_eq!(rendered[2][3], "1e-9");
        assert_eq!(rendered[2][3].parse::<f64>().unwrap(), 1e-9);
    }
}

mod publish_tests {
    use super::*;

    fn write(dir: &TempDir, path: &str, content: &str) {
        let target = dir.path().join(path);
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(target, content).unwrap();
    }

    #[test]
    fn test_publish_local_checkout() {
        let dir = TempDir::new().unwrap();
        write(&dir, "README.md", "old summary");
        write(&dir, ".git/HEAD", "ref: refs/heads/main");
        write(&dir, "IU7-31B/Doe_Jane.md", JANE_LOG);
        write(&dir, "IU7-31B/Roe_Rick.md", "3 : T : 01.10.23 : 5 : ok");
        write(&dir, "IU7-32B/Moe_Ann.md", "");

        let mut store = LocalStore::new(dir.path()).unwrap();
        let config = Config::default();

        let outcome = publish(&mut store, &config, "Update lab scores").unwrap();
        assert!(matches!(outcome, PublishOutcome::Updated { .. }));

        let readme = fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert!(readme.starts_with("# Lab scores\n"));
        let first = readme.find("## IU7-31B").unwrap();
        let second = readme.find("## IU7-32B").unwrap();
        assert!(first < second);
        assert!(!readme.contains("## .git"));
        assert!(readme.contains(">Doe Jane</a>"));
        assert!(readme.contains(">Moe Ann</a>"));

        let again = publish(&mut store, &config, "Update lab scores").unwrap();
        assert_eq!(again, PublishOutcome::Unchanged);
    }

    #[test]
    fn test_publish_detects_concurrent_edit() {
        let mut store = MemoryStore::new()
            .with_file("README.md", "v1")
            .with_file("g/A.md", "1 : T : 01.09.23 : 1 : x");

        let stale = store.read_text("README.md").unwrap();
        store
            .write_text("README.md", "someone else", "v2", Some(&stale.revision))
            .unwrap();

        let result = store.write_text("README.md", "late", "v3", Some(&stale.revision));
        assert!(matches!(result, Err(Error::RevisionConflict { .. })));

        // A fresh publish reads the current revision and succeeds.
        assert!(publish(&mut store, &Config::default(), "Update lab scores").is_ok());
    }

    #[test]
    fn test_custom_title_and_summary_path() {
        let store = MemoryStore::new()
            .with_file("SCORES.md", "")
            .with_file("g/A.md", "1 : T : 01.09.23 : 1 : x");
        let config = Config {
            title: "Results".to_string(),
            summary_path: "SCORES.md".to_string(),
            ..Config::default()
        };
        let doc = build_summary(&store, &config).unwrap();
        assert!(doc.starts_with("# Results\n\n## g\n"));
    }
}
