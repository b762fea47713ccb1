//! Roster loading, discovery, and config file integration tests.

use assert_fs::prelude::*;
use certify_core::{roster, Config, ConfigError, RosterError, RosterRow};
use predicates::prelude::predicate;
use rust_xlsxwriter::Workbook;

/// Write `cells` as `(row, col, value)` into the first sheet of a new workbook.
fn write_workbook(
    path: &std::path::Path,
    cells: &[(u32, u16, &str)],
    numbers: &[(u32, u16, f64)],
) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for &(row, col, value) in cells {
        sheet.write_string(row, col, value).expect("write cell");
    }
    for &(row, col, value) in numbers {
        sheet.write_number(row, col, value).expect("write number");
    }
    workbook.save(path).expect("save workbook");
}

// ---------------------------------------------------------------------------
// 1. Load
// ---------------------------------------------------------------------------

#[test]
fn load_csv_roster_in_file_order() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("students.csv");
    file.write_str("Name,Email\nJane Doe,jane@x.com\n\"Lee, Bob\",bob@x.com\n")
        .expect("write");

    let loaded = roster::load_at(file.path()).expect("load");
    assert_eq!(loaded.source(), file.path());
    assert_eq!(
        loaded.rows,
        vec![
            RosterRow::new("Jane Doe", "jane@x.com").unwrap(),
            RosterRow::new("Lee, Bob", "bob@x.com").unwrap(),
        ]
    );
}

#[test]
fn load_csv_with_missing_email_column_names_it() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("students.csv");
    file.write_str("Name,Phone\nJane Doe,555\n").expect("write");

    let err = roster::load_at(file.path()).unwrap_err();
    assert!(matches!(err, RosterError::MissingColumns { .. }), "got: {err}");
    assert!(err.to_string().ends_with(": Email"));
}

#[test]
fn load_unsupported_extension_is_rejected() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("students.txt");
    file.write_str("Name,Email\n").expect("write");

    let err = roster::load_at(file.path()).unwrap_err();
    assert!(matches!(err, RosterError::UnsupportedFormat { .. }));
    assert!(err.to_string().contains("students.txt"));
}

#[test]
fn load_missing_file_reports_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let err = roster::load_at(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, RosterError::Io { .. }));
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn load_xlsx_roster_in_sheet_order() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("students.xlsx");
    write_workbook(
        file.path(),
        &[
            (0, 0, "Name"),
            (0, 1, "Email"),
            (0, 2, "Course"),
            (1, 0, "Jane Doe"),
            (1, 1, "jane@x.com"),
            (1, 2, "Rust"),
            // Row 2 left blank.
            (3, 0, "Bob Lee"),
            (3, 1, "bob@x.com"),
            (4, 1, "cohort@x.com"),
        ],
        &[(4, 0, 42.0)],
    );

    let loaded = roster::load_at(file.path()).expect("load");
    assert_eq!(
        loaded.rows,
        vec![
            RosterRow::new("Jane Doe", "jane@x.com").unwrap(),
            RosterRow::new("Bob Lee", "bob@x.com").unwrap(),
            RosterRow::new("42", "cohort@x.com").unwrap(),
        ]
    );
    assert_eq!(loaded.len(), 3);
    assert!(!loaded.is_empty());
}

#[test]
fn xlsx_empty_field_reports_sheet_row_below_leading_blank_rows() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("students.xlsx");
    // Header on sheet row 3; the half-filled row is sheet row 5.
    write_workbook(
        file.path(),
        &[
            (2, 0, "Name"),
            (2, 1, "Email"),
            (3, 0, "Jane Doe"),
            (3, 1, "jane@x.com"),
            (4, 0, "Bob Lee"),
        ],
        &[],
    );

    let err = roster::load_at(file.path()).unwrap_err();
    assert!(
        matches!(err, RosterError::EmptyField { row: 5, column: "Email" }),
        "got: {err}"
    );
}

#[test]
fn xlsx_with_only_header_is_empty_roster() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("students.xlsx");
    write_workbook(file.path(), &[(0, 0, "Email"), (0, 1, "Name")], &[]);

    let loaded = roster::load_at(file.path()).expect("load");
    assert!(loaded.is_empty());
}

#[test]
fn load_corrupt_xlsx_returns_spreadsheet_error() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("students.xlsx");
    file.write_binary(b"definitely not a zip archive").expect("write");

    let err = roster::load_at(file.path()).unwrap_err();
    assert!(matches!(err, RosterError::Spreadsheet { .. }), "got: {err}");
    assert!(err.to_string().contains("students.xlsx"));
}

// ---------------------------------------------------------------------------
// 2. Discovery
// ---------------------------------------------------------------------------

#[test]
fn discover_picks_first_roster_by_name() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("b_batch.csv").write_str("Name,Email\n").unwrap();
    dir.child("a_batch.xlsx").write_binary(b"").unwrap();
    dir.child("0_notes.txt").write_str("ignore me").unwrap();
    dir.child("certificate_Jane Doe.pdf").write_binary(b"%PDF").unwrap();

    let found = roster::discover_at(dir.path()).expect("discover");
    assert_eq!(found, dir.path().join("a_batch.xlsx"));
}

#[test]
fn discover_ignores_directories_named_like_rosters() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("nested.csv").create_dir_all().unwrap();
    dir.child("real.csv").write_str("Name,Email\n").unwrap();

    let found = roster::discover_at(dir.path()).expect("discover");
    assert_eq!(found, dir.path().join("real.csv"));
}

#[test]
fn discover_without_roster_is_source_not_found() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("certificate_Jane Doe.pdf").write_binary(b"%PDF").unwrap();

    let err = roster::discover_at(dir.path()).unwrap_err();
    assert!(matches!(err, RosterError::SourceNotFound { .. }));
    assert!(err.to_string().starts_with("No roster file found"));
}

#[test]
fn discover_missing_dir_is_source_not_found() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let err = roster::discover_at(&dir.path().join("uploads")).unwrap_err();
    assert!(matches!(err, RosterError::SourceNotFound { .. }));
}

// ---------------------------------------------------------------------------
// 3. Config file
// ---------------------------------------------------------------------------

#[test]
fn config_load_at_reads_yaml() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("certify.yaml");
    file.write_str(
        "workdir: out\ntemplate: art/bg.png\nsmtp:\n  username: info@example.org\nletter:\n  subject: Thanks\n",
    )
    .unwrap();

    let cfg = Config::load_at(file.path()).expect("load");
    assert_eq!(cfg.workdir, std::path::PathBuf::from("out"));
    assert_eq!(cfg.letter.subject, "Thanks");
    assert_eq!(cfg.smtp.sender().unwrap(), "info@example.org");
    file.assert(predicate::str::contains("workdir: out"));
}

#[test]
fn config_parse_error_includes_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("certify.yaml");
    file.write_str("smtp: [unclosed").unwrap();

    let err = Config::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    assert!(err.to_string().contains("certify.yaml"));
}

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let err = Config::load(Some(&dir.path().join("nope.yaml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
