// Tests for CLI handler helpers

use oeufdns::handlers::{load_list_from_file, report_file_name};
use oeufdns::ReportFormat;
use std::io::Write;

#[test]
fn test_load_list_skips_comments_and_blanks() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# common hosts").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "WWW").unwrap();
    writeln!(file, "  api  ").unwrap();
    writeln!(file, "# trailing comment").unwrap();
    writeln!(file, "mail").unwrap();

    let entries = load_list_from_file(file.path()).unwrap();
    assert_eq!(entries, vec!["www", "api", "mail"]);
}

#[test]
fn test_load_list_rejects_missing_file() {
    let result = load_list_from_file(std::path::Path::new("/nonexistent/wordlist.txt"));
    assert!(result.is_err());
}

#[test]
fn test_load_list_rejects_empty_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# only comments in here").unwrap();

    assert!(load_list_from_file(file.path()).is_err());
}

#[test]
fn test_report_file_name_replaces_dots() {
    assert_eq!(
        report_file_name("example.org", &ReportFormat::Markdown),
        "example_org_dns_report.md"
    );
    assert_eq!(
        report_file_name("sub.example.co.uk", &ReportFormat::Dot),
        "sub_example_co_uk_dns_report.dot"
    );
    assert_eq!(
        report_file_name("example.org", &ReportFormat::Json),
        "example_org_dns_report.json"
    );
}
