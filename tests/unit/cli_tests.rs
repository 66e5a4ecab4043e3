//! Unit tests for CLI argument parsing

use crate::common::CliTestRunner;
use clap::Parser;
use std::path::PathBuf;
use tabcompare::cli::{Cli, Commands};

#[test]
fn test_compare_defaults() {
    let cli = Cli::try_parse_from(["tabcompare", "compare", "ref.csv", "new.csv"]).unwrap();

    assert!(!cli.verbose);
    assert!(cli.config.is_none());
    match cli.command {
        Commands::Compare {
            format,
            output,
            max_differences,
            max_unique,
            quiet,
            ..
        } => {
            assert_eq!(format, "pretty");
            assert!(output.is_none());
            assert!(max_differences.is_none());
            assert!(max_unique.is_none());
            assert!(!quiet);
        }
        _ => panic!("expected compare command"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "tabcompare",
        "inspect",
        "data.xlsx",
        "--verbose",
        "--config",
        "limits.json",
    ])
    .unwrap();

    assert!(cli.verbose);
    assert_eq!(cli.config, Some(PathBuf::from("limits.json")));
    match cli.command {
        Commands::Inspect { file, format } => {
            assert_eq!(file, PathBuf::from("data.xlsx"));
            assert_eq!(format, "pretty");
        }
        _ => panic!("expected inspect command"),
    }
}

#[test]
fn test_compare_requires_two_files() {
    assert!(Cli::try_parse_from(["tabcompare", "compare", "only.csv"]).is_err());
}

#[test]
fn test_invalid_limits_rejected() {
    let runner = CliTestRunner::new().unwrap();
    runner.expect_failure(&["compare", "a.csv", "b.csv", "--max-differences", "0"]);
    runner.expect_failure(&["compare", "a.csv", "b.csv", "--max-unique", "abc"]);
}

#[test]
fn test_unknown_subcommand() {
    let runner = CliTestRunner::new().unwrap();
    let error = runner.expect_failure(&["merge", "a.csv", "b.csv"]);
    assert!(matches!(error, tabcompare::TabcompareError::InvalidInput { .. }));
}
