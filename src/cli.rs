//! Command-line interface for tabcompare

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tabcompare")]
#[command(about = "Compare two CSV or Excel datasets and report their differences")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON configuration file with comparison limits
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare a file against a reference file
    Compare {
        /// Reference file (csv, xlsx or xls)
        reference: PathBuf,

        /// File to compare against the reference
        compare: PathBuf,

        /// Report format: "pretty", "json", "text" or "csv"
        #[arg(long, default_value = "pretty")]
        format: String,

        /// Write the report to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Maximum number of differences listed in the report (must be > 0)
        #[arg(long, value_parser = validate_limit)]
        max_differences: Option<usize>,

        /// Maximum number of unique rows listed per file (must be > 0)
        #[arg(long, value_parser = validate_limit)]
        max_unique: Option<usize>,

        /// Quiet output (machine-readable)
        #[arg(long)]
        quiet: bool,
    },

    /// Show the shape of a single file as it is loaded for comparison
    Inspect {
        /// Input file (csv, xlsx or xls)
        file: PathBuf,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },
}

/// Parse report format string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Pretty,
    Json,
    Text,
    Csv,
}

impl ReportFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            _ => Err(format!(
                "Invalid report format: {}. Use 'pretty', 'json', 'text' or 'csv'",
                s
            )),
        }
    }
}

/// Parse output format string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use 'pretty' or 'json'", s)),
        }
    }
}

/// Validate that a report limit is greater than 0
fn validate_limit(s: &str) -> Result<usize, String> {
    let limit: usize = s
        .parse()
        .map_err(|_| format!("Invalid limit: '{}'. Must be a positive integer.", s))?;

    if limit == 0 {
        return Err("Limit must be greater than 0".to_string());
    }

    Ok(limit)
}
