//! Report data model and summary aggregation

use crate::diff::{Difference, DifferenceKind};
use crate::table::Table;
use crate::uniqueness::UniquenessResult;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Counts over one comparison run. All counts are exact, never capped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_rows: usize,
    pub total_columns: usize,
    pub differences: usize,
    pub structure_differences: usize,
    pub modified_cells: usize,
    pub added_rows: usize,
    pub removed_rows: usize,
    pub added_columns: usize,
    pub removed_columns: usize,
    pub reference_rows: usize,
    pub reference_columns: usize,
    pub compare_rows: usize,
    pub compare_columns: usize,
    pub unique_in_reference: usize,
    pub unique_in_compare: usize,
}

/// Provenance and timing of a comparison run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub comparison_id: String,
    pub comparison_date: String,
    pub reference_file_name: String,
    pub compare_file_name: String,
    pub processing_time: String,
    pub processing_time_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_checksum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_checksum: Option<String>,
}

impl ReportMetadata {
    pub fn new(reference_file_name: &str, compare_file_name: &str, elapsed: Duration) -> Self {
        Self {
            comparison_id: uuid::Uuid::new_v4().to_string(),
            comparison_date: Utc::now().to_rfc3339(),
            reference_file_name: reference_file_name.to_string(),
            compare_file_name: compare_file_name.to_string(),
            processing_time: format_processing_time(elapsed),
            processing_time_ms: elapsed.as_millis() as u64,
            reference_checksum: None,
            compare_checksum: None,
        }
    }

    pub fn with_checksums(mut self, reference: String, compare: String) -> Self {
        self.reference_checksum = Some(reference);
        self.compare_checksum = Some(compare);
        self
    }
}

/// Full result of comparing two tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub identical: bool,
    pub summary: Summary,
    /// The first `max_differences` findings in generation order
    pub differences: Vec<Difference>,
    pub different_content: UniquenessResult,
    pub metadata: ReportMetadata,
}

impl ComparisonReport {
    /// Assemble a report, capping the echoed differences.
    ///
    /// `identical` and the summary are derived from the full list.
    pub fn assemble(
        reference: &Table,
        compare: &Table,
        mut differences: Vec<Difference>,
        different_content: UniquenessResult,
        metadata: ReportMetadata,
        max_differences: usize,
    ) -> Self {
        let summary = build_summary(reference, compare, &differences, &different_content);
        let identical = differences.is_empty();

        if differences.len() > max_differences {
            log::debug!(
                "Truncating differences from {} to {}",
                differences.len(),
                max_differences
            );
            differences.truncate(max_differences);
        }

        Self {
            identical,
            summary,
            differences,
            different_content,
            metadata,
        }
    }

    /// True when the differences list is shorter than the true count
    pub fn is_truncated(&self) -> bool {
        self.differences.len() < self.summary.differences
    }
}

/// Aggregate counts over the full difference list and uniqueness result
pub fn build_summary(
    reference: &Table,
    compare: &Table,
    differences: &[Difference],
    unique: &UniquenessResult,
) -> Summary {
    let count = |kind: DifferenceKind| differences.iter().filter(|d| d.kind() == kind).count();

    Summary {
        total_rows: reference.row_count().max(compare.row_count()),
        total_columns: reference.column_count().max(compare.column_count()),
        differences: differences.len(),
        structure_differences: count(DifferenceKind::StructureDifference),
        modified_cells: count(DifferenceKind::CellModified),
        added_rows: count(DifferenceKind::RowAdded),
        removed_rows: count(DifferenceKind::RowRemoved),
        added_columns: count(DifferenceKind::ColumnAdded),
        removed_columns: count(DifferenceKind::ColumnMissing),
        reference_rows: reference.row_count(),
        reference_columns: reference.column_count(),
        compare_rows: compare.row_count(),
        compare_columns: compare.column_count(),
        unique_in_reference: unique.total_unique_in_reference,
        unique_in_compare: unique.total_unique_in_compare,
    }
}

fn format_processing_time(elapsed: Duration) -> String {
    format!("{:.2} seconds", elapsed.as_secs_f64())
}
