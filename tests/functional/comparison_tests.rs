//! End-to-end comparison behaviour through the CLI

use crate::common::assertions::count_kind;
use crate::common::{sample_data, CliTestRunner};
use tabcompare::diff::DifferenceKind;
use tabcompare::Difference;

#[test]
fn test_file_compared_with_itself_is_identical() {
    let runner = CliTestRunner::new().unwrap();
    let csv = runner.fixture().create_csv("data.csv", &sample_data::simple_csv_data()).unwrap();

    let report = runner.compare_json(&csv, &csv, &[]);

    assert!(report.identical);
    assert!(report.differences.is_empty());
    assert!(report.different_content.unique_in_reference.is_empty());
    assert!(report.different_content.unique_in_compare.is_empty());
    assert_eq!(report.summary.reference_rows, 3);
    assert_eq!(report.summary.compare_columns, 3);
    assert_eq!(report.metadata.reference_file_name, "data.csv");
}

#[test]
fn test_single_cell_modification() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv("a.csv", &[vec!["A", "B"], vec!["1", "2"]]).unwrap();
    let b = runner.fixture().create_csv("b.csv", &[vec!["A", "B"], vec!["1", "3"]]).unwrap();

    let report = runner.compare_json(&a, &b, &[]);

    assert!(!report.identical);
    assert_eq!(
        report.differences,
        vec![Difference::CellModified {
            row_index: 0,
            column: "B".into(),
            reference_value: "2".into(),
            compare_value: "3".into(),
        }]
    );
    assert_eq!(report.summary.modified_cells, 1);
}

#[test]
fn test_changed_column_suppresses_content_diff() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner
        .fixture()
        .create_csv("a.csv", &[vec!["A", "B"], vec!["1", "2"], vec!["5", "6"]])
        .unwrap();
    let b = runner.fixture().create_csv("b.csv", &[vec!["A", "C"], vec!["9", "9"]]).unwrap();

    let report = runner.compare_json(&a, &b, &[]);

    assert_eq!(count_kind(&report, DifferenceKind::StructureDifference), 0);
    assert!(report.differences.contains(&Difference::ColumnMissing { column: "B".into() }));
    assert!(report.differences.contains(&Difference::ColumnAdded { column: "C".into() }));
    assert_eq!(report.summary.modified_cells, 0);
    assert_eq!(report.summary.removed_rows, 0);
    assert_eq!(report.summary.differences, 2);
}

#[test]
fn test_added_column_reports_count_mismatch() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv("a.csv", &sample_data::simple_csv_data()).unwrap();
    let b = runner
        .fixture()
        .create_csv("b.csv", &sample_data::schema_changed_csv_data())
        .unwrap();

    let report = runner.compare_json(&a, &b, &[]);

    assert!(report.differences.contains(&Difference::StructureDifference {
        reference_columns: 3,
        compare_columns: 4,
    }));
    assert_eq!(report.summary.added_columns, 1);
    assert_eq!(report.different_content.columns_only_in_compare, vec!["category"]);
    // Rows still match on the shared columns
    assert_eq!(report.different_content.total_unique_in_reference, 0);
    assert_eq!(report.different_content.total_unique_in_compare, 0);
}

#[test]
fn test_extra_rows_reported_as_added() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv("a.csv", &sample_data::simple_csv_data()).unwrap();
    let b = runner.fixture().create_csv("b.csv", &sample_data::extended_csv_data()).unwrap();

    let report = runner.compare_json(&a, &b, &[]);

    assert_eq!(report.summary.added_rows, 2);
    assert_eq!(report.summary.modified_cells, 0);
    let indices: Vec<usize> = report
        .differences
        .iter()
        .filter_map(|d| match d {
            Difference::RowAdded { row_index, .. } => Some(*row_index),
            _ => None,
        })
        .collect();
    assert_eq!(indices, vec![3, 4]);

    let reversed = runner.compare_json(&b, &a, &[]);
    assert_eq!(reversed.summary.removed_rows, 2);
    assert_eq!(reversed.summary.added_rows, 0);
}

#[test]
fn test_updated_data_mixes_cells_and_unique_rows() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv("a.csv", &sample_data::simple_csv_data()).unwrap();
    let b = runner.fixture().create_csv("b.csv", &sample_data::updated_csv_data()).unwrap();

    let report = runner.compare_json(&a, &b, &[]);

    // Row 1 price, row 3 id/name/price
    assert_eq!(report.summary.modified_cells, 4);
    assert_eq!(report.summary.added_rows, 0);
    assert_eq!(report.summary.unique_in_reference, 2);
    assert_eq!(report.summary.unique_in_compare, 2);
}

#[test]
fn test_max_differences_truncates_listing_only() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_large_csv("a.csv", 150, 1).unwrap();
    let b = runner.fixture().create_csv("b.csv", &[vec!["col_0"]]).unwrap();

    let report = runner.compare_json(&a, &b, &[]);
    assert_eq!(report.differences.len(), 100);
    assert_eq!(report.summary.differences, 150);
    assert_eq!(report.summary.removed_rows, 150);
    assert_eq!(report.different_content.unique_in_reference.len(), 50);
    assert_eq!(report.different_content.total_unique_in_reference, 150);

    let limited = runner.compare_json(&a, &b, &["--max-differences", "7", "--max-unique", "3"]);
    assert_eq!(limited.differences.len(), 7);
    assert_eq!(limited.summary.differences, 150);
    assert_eq!(limited.different_content.unique_in_reference.len(), 3);
}

#[test]
fn test_config_file_sets_limits() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_large_csv("a.csv", 20, 2).unwrap();
    let b = runner.fixture().create_csv("b.csv", &[vec!["col_0", "col_1"]]).unwrap();
    let config = runner
        .fixture()
        .create_config("limits.json", &serde_json::json!({"max_differences": 4}))
        .unwrap();

    let report = runner.compare_json(&a, &b, &["--config", config.to_str().unwrap()]);
    assert_eq!(report.differences.len(), 4);
    assert_eq!(report.summary.differences, 20);

    // Command-line limit overrides the file
    let report = runner.compare_json(
        &a,
        &b,
        &["--config", config.to_str().unwrap(), "--max-differences", "6"],
    );
    assert_eq!(report.differences.len(), 6);
}

#[test]
fn test_unicode_content_is_compared_textually() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_unicode_csv("a.csv").unwrap();
    let b = runner.fixture().create_unicode_csv("b.csv").unwrap();

    let report = runner.compare_json(&a, &b, &[]);
    assert!(report.identical);
    assert_eq!(report.summary.reference_rows, 4);
}

#[test]
fn test_numeric_formatting_differences_are_reported() {
    let runner = CliTestRunner::new().unwrap();
    let a = runner.fixture().create_csv("a.csv", &[vec!["v"], vec!["1.50"]]).unwrap();
    let b = runner.fixture().create_csv("b.csv", &[vec!["v"], vec!["1.5"]]).unwrap();

    let report = runner.compare_json(&a, &b, &[]);
    assert_eq!(report.summary.modified_cells, 1);
}
