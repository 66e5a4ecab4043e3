//! Comparison pipeline: load, diff, extract unique rows, summarize

use crate::config::CompareConfig;
use crate::diff::{compare_content, compare_structure};
use crate::error::Result;
use crate::hash::{checksum, table_fingerprint, HashValue};
use crate::loader;
use crate::report::{ComparisonReport, ReportMetadata};
use crate::table::Table;
use crate::uniqueness::extract_unique;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Raw input: file name (selects the parser) and its bytes
#[derive(Debug, Clone, Copy)]
pub struct InputFile<'a> {
    pub name: &'a str,
    pub bytes: &'a [u8],
}

impl<'a> InputFile<'a> {
    pub fn new(name: &'a str, bytes: &'a [u8]) -> Self {
        Self { name, bytes }
    }
}

/// A parsed input together with its source name and checksum
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub name: String,
    pub checksum: HashValue,
    pub table: Table,
}

impl LoadedTable {
    pub fn info(&self) -> TableInfo {
        TableInfo {
            file_name: self.name.clone(),
            rows: self.table.row_count(),
            columns: self.table.column_count(),
            column_names: self.table.columns().to_vec(),
            checksum: self.checksum.clone(),
            fingerprint: table_fingerprint(&self.table),
        }
    }
}

/// Shape and hashes of a single loaded input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableInfo {
    pub file_name: String,
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
    pub checksum: HashValue,
    pub fingerprint: HashValue,
}

/// Stateless comparison engine.
///
/// Holds only its configuration; every call works on its own inputs, so one
/// instance can serve concurrent comparisons.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    config: CompareConfig,
}

impl Comparator {
    pub fn new(config: CompareConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Parse one input
    pub fn load(&self, input: &InputFile<'_>) -> Result<LoadedTable> {
        let table = loader::load(input.bytes, input.name)?;
        Ok(LoadedTable {
            name: input.name.to_string(),
            checksum: checksum(input.bytes),
            table,
        })
    }

    /// Load both inputs and compare them. Fails if either input fails to load.
    pub fn compare(&self, reference: &InputFile<'_>, compare: &InputFile<'_>) -> Result<ComparisonReport> {
        let started = Instant::now();
        let reference = self.load(reference)?;
        let compare = self.load(compare)?;
        Ok(self.compare_loaded_since(&reference, &compare, started))
    }

    /// Compare two already loaded inputs
    pub fn compare_loaded(&self, reference: &LoadedTable, compare: &LoadedTable) -> ComparisonReport {
        self.compare_loaded_since(reference, compare, Instant::now())
    }

    fn compare_loaded_since(
        &self,
        reference: &LoadedTable,
        compare: &LoadedTable,
        started: Instant,
    ) -> ComparisonReport {
        let mut report = self.run(
            &reference.table,
            &compare.table,
            &reference.name,
            &compare.name,
            started,
        );
        report.metadata = report
            .metadata
            .with_checksums(reference.checksum.clone(), compare.checksum.clone());
        report
    }

    /// Compare two tables that did not come from raw bytes
    pub fn compare_tables(
        &self,
        reference: &Table,
        compare: &Table,
        reference_name: &str,
        compare_name: &str,
    ) -> ComparisonReport {
        self.run(reference, compare, reference_name, compare_name, Instant::now())
    }

    fn run(
        &self,
        reference: &Table,
        compare: &Table,
        reference_name: &str,
        compare_name: &str,
        started: Instant,
    ) -> ComparisonReport {
        let mut differences = compare_structure(reference, compare);
        log::debug!("Structure comparison: {} differences", differences.len());

        // Any structural difference suppresses cell-level comparison
        if differences.is_empty() {
            differences = compare_content(reference, compare);
            log::debug!("Content comparison: {} differences", differences.len());
        }

        let unique = extract_unique(reference, compare, self.config.max_unique_records);

        let metadata = ReportMetadata::new(reference_name, compare_name, started.elapsed());
        let report = ComparisonReport::assemble(
            reference,
            compare,
            differences,
            unique,
            metadata,
            self.config.max_differences,
        );

        log::info!(
            "Compared {} with {}: {} differences, {} unique in reference, {} unique in compare ({})",
            reference_name,
            compare_name,
            report.summary.differences,
            report.summary.unique_in_reference,
            report.summary.unique_in_compare,
            report.metadata.processing_time
        );

        report
    }
}

/// Compare two raw inputs with default limits
pub fn compare_files(
    reference_bytes: &[u8],
    reference_name: &str,
    compare_bytes: &[u8],
    compare_name: &str,
) -> Result<ComparisonReport> {
    Comparator::default().compare(
        &InputFile::new(reference_name, reference_bytes),
        &InputFile::new(compare_name, compare_bytes),
    )
}
