//! Edge case tests for file access and size limits

use crate::common::{sample_data, CliTestRunner};
use tabcompare::TabcompareError;

#[test]
fn test_missing_reference_file() {
    let runner = CliTestRunner::new().unwrap();
    let good = runner.fixture().create_csv("good.csv", &sample_data::simple_csv_data()).unwrap();
    let missing = runner.fixture().path("missing.csv");

    let error = runner.expect_failure(&["compare", missing.to_str().unwrap(), good.to_str().unwrap()]);
    assert!(matches!(error, TabcompareError::InvalidInput { .. }));
    assert!(error.to_string().contains("not found"));
}

#[test]
fn test_directory_is_not_an_input() {
    let runner = CliTestRunner::new().unwrap();
    let good = runner.fixture().create_csv("good.csv", &sample_data::simple_csv_data()).unwrap();
    let dir = runner.fixture().root().to_path_buf();

    let error = runner.expect_failure(&["compare", good.to_str().unwrap(), dir.to_str().unwrap()]);
    assert!(matches!(error, TabcompareError::InvalidInput { .. }));
}

#[test]
fn test_oversized_input_rejected_before_loading() {
    let runner = CliTestRunner::new().unwrap();
    let big = runner.fixture().create_large_csv("big.csv", 200, 5).unwrap();
    let small = runner.fixture().create_csv("small.csv", &sample_data::simple_csv_data()).unwrap();
    let config = runner
        .fixture()
        .create_config("tiny.json", &serde_json::json!({"max_file_size": 1024}))
        .unwrap();

    let error = runner.expect_failure(&[
        "compare",
        big.to_str().unwrap(),
        small.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(matches!(error, TabcompareError::InvalidInput { .. }));
    assert!(error.to_string().contains("exceeding the maximum"));
}

#[test]
fn test_invalid_config_file() {
    let runner = CliTestRunner::new().unwrap();
    let good = runner.fixture().create_csv("good.csv", &sample_data::simple_csv_data()).unwrap();
    let config = runner.fixture().create_raw("broken.json", b"{ not json").unwrap();

    let error = runner.expect_failure(&[
        "compare",
        good.to_str().unwrap(),
        good.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(matches!(error, TabcompareError::Config { .. }));
}

#[test]
fn test_missing_config_file() {
    let runner = CliTestRunner::new().unwrap();
    let good = runner.fixture().create_csv("good.csv", &sample_data::simple_csv_data()).unwrap();
    let config = runner.fixture().path("absent.json");

    let error = runner.expect_failure(&[
        "inspect",
        good.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(matches!(error, TabcompareError::Config { .. }));
}
