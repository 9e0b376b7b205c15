//! Export-format tests over the filtered record set.

mod common;

use common::{record, source};
use outlay::models::DailyRecord;
use outlay::services::export::{export_csv, export_xlsx};

#[test]
fn test_csv_starts_with_utf8_bom() {
    let bytes = export_csv(&[], &[]).unwrap();

    assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
}

#[test]
fn test_csv_header_has_one_cost_column_per_source() {
    let sources = vec![source("a", "Alpha"), source("b", "Beta")];
    let bytes = export_csv(&[], &sources).unwrap();
    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();

    assert_eq!(
        text.lines().next().unwrap(),
        "Date,Alpha cost,Beta cost,Images,Total cost,Notes"
    );
}

#[test]
fn test_csv_rows_fill_missing_sources_with_zero() {
    let sources = vec![source("a", "Alpha"), source("b", "Beta")];
    let records = vec![record("r1", "2024-03-01", &[("b", 1.5)], 12)];

    let bytes = export_csv(&records, &sources).unwrap();
    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();

    assert_eq!(
        text.lines().nth(1).unwrap(),
        "2024-03-01,0.00,1.50,12,1.50,"
    );
}

#[test]
fn test_csv_quotes_delimiters_in_notes_and_source_names() {
    let sources = vec![source("a", "Alpha, Inc")];
    let mut with_notes: DailyRecord = record("r1", "2024-03-01", &[("a", 2.0)], 0);
    with_notes.notes = Some("spike, see invoice".into());

    let bytes = export_csv(&[with_notes], &sources).unwrap();
    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();

    assert!(text.lines().next().unwrap().contains("\"Alpha, Inc cost\""));
    assert!(text
        .lines()
        .nth(1)
        .unwrap()
        .ends_with("\"spike, see invoice\""));

    // The quoted fields survive a parse round trip.
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(&row[4], "spike, see invoice");
}

#[test]
fn test_csv_one_row_per_record() {
    let sources = vec![source("a", "Alpha")];
    let records = vec![
        record("r1", "2024-03-01", &[("a", 1.0)], 1),
        record("r2", "2024-03-02", &[("a", 2.0)], 2),
        record("r3", "2024-03-03", &[("a", 3.0)], 3),
    ];

    let bytes = export_csv(&records, &sources).unwrap();
    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();

    assert_eq!(text.lines().count(), 4);
}

#[test]
fn test_xlsx_is_a_zip_container() {
    let sources = vec![source("a", "Alpha")];
    let records = vec![record("r1", "2024-03-01", &[("a", 1.0)], 1)];

    let bytes = export_xlsx(&records, &sources).unwrap();

    // XLSX is a ZIP archive; PK\x03\x04 is the local-file-header magic.
    assert_eq!(&bytes[..4], &[0x50, 0x4B, 0x03, 0x04]);
    assert!(bytes.len() > 500);
}

#[test]
fn test_xlsx_export_of_empty_record_set() {
    let bytes = export_xlsx(&[], &[source("a", "Alpha")]).unwrap();

    assert_eq!(&bytes[..2], b"PK");
}
