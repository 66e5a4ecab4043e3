//! Common test utilities and helpers

use std::fs;
use std::path::{Path, PathBuf};
use tabcompare::{ComparisonReport, Result};
use tempfile::TempDir;

/// Test fixture manager for creating temporary input files
pub struct TestFixture {
    pub temp_dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Get the root path of the test fixture
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a test CSV file with sample data
    pub fn create_csv(&self, name: &str, data: &[Vec<&str>]) -> Result<PathBuf> {
        let mut content = String::new();
        for row in data {
            content.push_str(&row.join(","));
            content.push('\n');
        }
        self.create_raw(name, content.as_bytes())
    }

    /// Create a file with raw content
    pub fn create_raw(&self, name: &str, content: &[u8]) -> Result<PathBuf> {
        let path = self.root().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Create a corrupted file for testing error handling
    pub fn create_corrupted_file(&self, name: &str) -> Result<PathBuf> {
        self.create_raw(name, b"\x00\x01\x02\x03invalid_data\xff\xfe")
    }

    /// Create a large CSV file where every cell is `value_<row>_<col>`
    pub fn create_large_csv(&self, name: &str, rows: usize, cols: usize) -> Result<PathBuf> {
        let mut content = String::new();

        let header: Vec<String> = (0..cols).map(|i| format!("col_{}", i)).collect();
        content.push_str(&header.join(","));
        content.push('\n');

        for row in 0..rows {
            let values: Vec<String> = (0..cols).map(|col| format!("value_{}_{}", row, col)).collect();
            content.push_str(&values.join(","));
            content.push('\n');
        }

        self.create_raw(name, content.as_bytes())
    }

    /// Create a CSV with Unicode characters
    pub fn create_unicode_csv(&self, name: &str) -> Result<PathBuf> {
        let data = vec![
            vec!["id", "name", "description"],
            vec!["1", "Café", "Delicious café ☕"],
            vec!["2", "Naïve", "Naïve approach 🤔"],
            vec!["3", "北京", "Beijing in Chinese 中文"],
            vec!["4", "🚀", "Rocket emoji as name"],
        ];
        self.create_csv(name, &data)
    }

    /// Create a JSON configuration file
    pub fn create_config(&self, name: &str, config: &serde_json::Value) -> Result<PathBuf> {
        let content = serde_json::to_string_pretty(config)?;
        self.create_raw(name, content.as_bytes())
    }

    /// Path inside the fixture directory
    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }
}

/// Helper for running CLI commands in tests
pub struct CliTestRunner {
    fixture: TestFixture,
}

impl CliTestRunner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fixture: TestFixture::new()?,
        })
    }

    pub fn fixture(&self) -> &TestFixture {
        &self.fixture
    }

    /// Run a tabcompare command and return the result
    pub fn run_command(&self, args: &[&str]) -> Result<()> {
        use clap::Parser;
        use tabcompare::cli::Cli;
        use tabcompare::commands::execute_command;

        let mut cmd_args = vec!["tabcompare"];
        cmd_args.extend(args);

        let cli = Cli::try_parse_from(cmd_args)
            .map_err(|e| tabcompare::TabcompareError::invalid_input(e.to_string()))?;

        execute_command(cli.command, cli.config.as_deref())
    }

    /// Run a command and expect it to succeed
    pub fn expect_success(&self, args: &[&str]) {
        self.run_command(args).expect("Command should succeed");
    }

    /// Run a command and expect it to fail
    pub fn expect_failure(&self, args: &[&str]) -> tabcompare::TabcompareError {
        self.run_command(args).expect_err("Command should fail")
    }

    /// Compare two fixture files, writing a JSON report, and parse it back
    pub fn compare_json(&self, reference: &Path, compare: &Path, extra: &[&str]) -> ComparisonReport {
        let output = self.fixture.path("report.json");
        let mut args = vec![
            "compare",
            reference.to_str().unwrap(),
            compare.to_str().unwrap(),
            "--format",
            "json",
            "--output",
            output.to_str().unwrap(),
        ];
        args.extend(extra);
        self.expect_success(&args);

        let content = fs::read_to_string(&output).expect("report should be written");
        serde_json::from_str(&content).expect("report should be valid JSON")
    }
}

/// Sample data generators for testing
pub mod sample_data {
    pub fn simple_csv_data() -> Vec<Vec<&'static str>> {
        vec![
            vec!["id", "name", "price"],
            vec!["1", "Apple", "1.50"],
            vec!["2", "Banana", "0.75"],
            vec!["3", "Cherry", "2.00"],
        ]
    }

    pub fn updated_csv_data() -> Vec<Vec<&'static str>> {
        vec![
            vec!["id", "name", "price"],
            vec!["1", "Apple", "1.60"], // Price changed
            vec!["2", "Banana", "0.75"],
            vec!["4", "Date", "3.00"], // Cherry replaced by Date
        ]
    }

    pub fn schema_changed_csv_data() -> Vec<Vec<&'static str>> {
        vec![
            vec!["id", "name", "price", "category"], // New column
            vec!["1", "Apple", "1.50", "Fruit"],
            vec!["2", "Banana", "0.75", "Fruit"],
            vec!["3", "Cherry", "2.00", "Fruit"],
        ]
    }

    pub fn extended_csv_data() -> Vec<Vec<&'static str>> {
        vec![
            vec!["id", "name", "price"],
            vec!["1", "Apple", "1.50"],
            vec!["2", "Banana", "0.75"],
            vec!["3", "Cherry", "2.00"],
            vec!["4", "Date", "3.00"],
            vec!["5", "Elderberry", "4.25"],
        ]
    }
}

/// Assertion helpers for test validation
pub mod assertions {
    use std::path::Path;
    use tabcompare::diff::DifferenceKind;
    use tabcompare::ComparisonReport;

    /// Assert that a file exists and is not empty
    pub fn assert_file_exists_and_not_empty(path: &Path) {
        assert!(path.exists(), "File should exist: {}", path.display());
        let metadata = std::fs::metadata(path).expect("Should be able to read file metadata");
        assert!(metadata.len() > 0, "File should not be empty: {}", path.display());
    }

    /// Count listed differences of one kind
    pub fn count_kind(report: &ComparisonReport, kind: DifferenceKind) -> usize {
        report.differences.iter().filter(|d| d.kind() == kind).count()
    }
}
