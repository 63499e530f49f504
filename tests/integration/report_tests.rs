use dupefinder::duplicates::DuplicateFinder;
use dupefinder::output::{JsonOutput, ReportStyle, TextReport};
use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

fn render_text(dir: &std::path::Path) -> String {
    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir)
        .unwrap();
    let mut buf = Vec::new();
    TextReport::new(&groups, &summary, ReportStyle::plain())
        .write_to(&mut buf)
        .unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_text_report_empty_directory_still_has_footer() {
    let dir = tempdir().unwrap();
    let text = render_text(dir.path());

    assert!(text.contains("No files found to scan."));
    assert!(text.contains("verified using SHA-256"));
}

#[test]
fn test_text_report_without_duplicates() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("one.txt"))
        .unwrap()
        .write_all(b"1")
        .unwrap();

    let text = render_text(dir.path());
    assert!(text.contains("No duplicate files found."));
    assert!(text.contains("verified using SHA-256"));
}

#[test]
fn test_text_report_lists_group() {
    let dir = tempdir().unwrap();
    for name in ["a.txt", "b.txt"] {
        File::create(dir.path().join(name))
            .unwrap()
            .write_all(b"X")
            .unwrap();
    }
    File::create(dir.path().join("c.txt"))
        .unwrap()
        .write_all(b"Y")
        .unwrap();

    let text = render_text(dir.path());

    assert!(text.contains("Found duplicate files (same content):"));
    assert!(text.contains("a.txt (x2)"));
    assert!(text.contains("Total duplicate groups: 1"));
    assert!(text.contains("Total duplicated files: 2"));
    assert!(text.contains("Total wasted space: 1 B"));
    assert!(!text.contains("c.txt"));
}

#[test]
fn test_json_report_round_trips_through_serde_json() {
    let dir = tempdir().unwrap();
    for name in ["e1", "e2", "e3"] {
        File::create(dir.path().join(name)).unwrap();
    }

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    let json = JsonOutput::new(&groups, &summary).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["duplicates"][0]["size"], 0);
    assert_eq!(
        value["duplicates"][0]["hash"],
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(value["duplicates"][0]["files"].as_array().unwrap().len(), 3);
    assert_eq!(value["summary"]["wasted_space"], 0);
    assert!(value["skipped"].as_array().unwrap().is_empty());
}
