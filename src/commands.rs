//! Command implementations for tabcompare CLI

use crate::cli::{Commands, OutputFormat, ReportFormat};
use crate::comparator::{Comparator, InputFile, LoadedTable};
use crate::config::CompareConfig;
use crate::error::{Result, TabcompareError};
use crate::output::{CsvExporter, JsonFormatter, PrettyPrinter, TextReport};
use crate::progress::ProgressReporter;
use crate::report::ComparisonReport;
use std::fs;
use std::path::Path;

/// Execute a command
pub fn execute_command(command: Commands, config_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Compare {
            reference,
            compare,
            format,
            output,
            max_differences,
            max_unique,
            quiet,
        } => {
            let mut config = CompareConfig::load(config_path)?;
            if let Some(max_differences) = max_differences {
                config = config.with_max_differences(max_differences);
            }
            if let Some(max_unique) = max_unique {
                config = config.with_max_unique_records(max_unique);
            }
            config.validate()?;

            compare_command(&config, &reference, &compare, &format, output.as_deref(), quiet)
        }
        Commands::Inspect { file, format } => {
            let config = CompareConfig::load(config_path)?;
            inspect_command(&config, &file, &format)
        }
    }
}

/// Compare a file against a reference and print or save the report
fn compare_command(
    config: &CompareConfig,
    reference_path: &Path,
    compare_path: &Path,
    format: &str,
    output: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let format = ReportFormat::parse(format).map_err(TabcompareError::invalid_input)?;

    let (reference_name, reference_bytes) = read_input(reference_path, config.max_file_size)?;
    let (compare_name, compare_bytes) = read_input(compare_path, config.max_file_size)?;

    let show_progress = !quiet && output.is_none() && format == ReportFormat::Pretty;
    let mut progress = if show_progress {
        ProgressReporter::new_for_compare()
    } else {
        ProgressReporter::new_minimal()
    };

    let comparator = Comparator::new(config.clone());

    progress.update_load(&format!("Loading {}...", reference_name));
    let reference = comparator.load(&InputFile::new(&reference_name, &reference_bytes))?;
    progress.update_load(&format!("Loading {}...", compare_name));
    let compare = comparator.load(&InputFile::new(&compare_name, &compare_bytes))?;
    progress.finish_load(&format!(
        "Loaded {} and {}",
        describe(&reference),
        describe(&compare)
    ));

    let report = comparator.compare_loaded(&reference, &compare);
    progress.finish_compare(&format!("Comparison finished in {:.2?}", progress.elapsed()));
    drop(progress);

    let rendered = render_report(&report, format)?;

    if quiet {
        PrettyPrinter::print_quiet(&report);
    }

    match output {
        Some(path) => {
            fs::write(path, rendered)?;
            if !quiet {
                println!("💾 Report written to {}", path.display());
            }
        }
        None if !quiet => print!("{}", rendered),
        None => {}
    }

    Ok(())
}

/// Load a single file and describe its shape
fn inspect_command(config: &CompareConfig, path: &Path, format: &str) -> Result<()> {
    let format = OutputFormat::parse(format).map_err(TabcompareError::invalid_input)?;
    let (name, bytes) = read_input(path, config.max_file_size)?;

    let loaded = Comparator::new(config.clone()).load(&InputFile::new(&name, &bytes))?;
    let info = loaded.info();

    match format {
        OutputFormat::Pretty => PrettyPrinter::print_table_info(&info),
        OutputFormat::Json => println!("{}", JsonFormatter::format(&info)?),
    }

    Ok(())
}

/// Render a report in the requested format
pub fn render_report(report: &ComparisonReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Pretty => Ok(PrettyPrinter::render_report(report)),
        ReportFormat::Json => JsonFormatter::format(report),
        ReportFormat::Text => Ok(TextReport::render(report)),
        ReportFormat::Csv => CsvExporter::render(report),
    }
}

/// Read an input file, enforcing the configured size limit
fn read_input(path: &Path, max_file_size: u64) -> Result<(String, Vec<u8>)> {
    if !path.is_file() {
        return Err(TabcompareError::invalid_input(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let size = fs::metadata(path)?.len();
    if size > max_file_size {
        return Err(TabcompareError::invalid_input(format!(
            "{} is {} bytes, exceeding the maximum of {} bytes",
            path.display(),
            size,
            max_file_size
        )));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok((name, fs::read(path)?))
}

fn describe(loaded: &LoadedTable) -> String {
    format!(
        "{} ({} rows)",
        loaded.name,
        loaded.table.row_count()
    )
}
