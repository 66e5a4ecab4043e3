//! Structural and positional content comparison of two tables

use crate::table::Table;
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A single finding produced by a comparison run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Difference {
    /// Column counts differ
    StructureDifference {
        reference_columns: usize,
        compare_columns: usize,
    },
    /// Column present in the reference but not in the compared table
    ColumnMissing { column: String },
    /// Column present in the compared table but not in the reference
    ColumnAdded { column: String },
    CellModified {
        row_index: usize,
        column: String,
        reference_value: String,
        compare_value: String,
    },
    /// Row beyond the end of the reference, restricted to common columns
    RowAdded {
        row_index: usize,
        data: IndexMap<String, String>,
    },
    /// Row beyond the end of the compared table, restricted to common columns
    RowRemoved {
        row_index: usize,
        data: IndexMap<String, String>,
    },
}

/// Discriminant of a [`Difference`], used for counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DifferenceKind {
    StructureDifference,
    ColumnMissing,
    ColumnAdded,
    CellModified,
    RowAdded,
    RowRemoved,
}

impl DifferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StructureDifference => "structure_difference",
            Self::ColumnMissing => "column_missing",
            Self::ColumnAdded => "column_added",
            Self::CellModified => "cell_modified",
            Self::RowAdded => "row_added",
            Self::RowRemoved => "row_removed",
        }
    }
}

impl Difference {
    pub fn kind(&self) -> DifferenceKind {
        match self {
            Self::StructureDifference { .. } => DifferenceKind::StructureDifference,
            Self::ColumnMissing { .. } => DifferenceKind::ColumnMissing,
            Self::ColumnAdded { .. } => DifferenceKind::ColumnAdded,
            Self::CellModified { .. } => DifferenceKind::CellModified,
            Self::RowAdded { .. } => DifferenceKind::RowAdded,
            Self::RowRemoved { .. } => DifferenceKind::RowRemoved,
        }
    }

    /// Human-readable location, with 1-based row numbers
    pub fn position(&self) -> String {
        match self {
            Self::StructureDifference { .. } => "Structure".to_string(),
            Self::ColumnMissing { .. } | Self::ColumnAdded { .. } => "Column".to_string(),
            Self::CellModified {
                row_index, column, ..
            } => format!("Row {}, Column '{}'", row_index + 1, column),
            Self::RowAdded { row_index, .. } | Self::RowRemoved { row_index, .. } => {
                format!("Row {}", row_index + 1)
            }
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::StructureDifference {
                reference_columns,
                compare_columns,
            } => format!(
                "Different number of columns: {} vs {}",
                reference_columns, compare_columns
            ),
            Self::ColumnMissing { column } => {
                format!("Column '{}' is missing from the compared file", column)
            }
            Self::ColumnAdded { column } => {
                format!("Column '{}' was added in the compared file", column)
            }
            Self::CellModified {
                row_index, column, ..
            } => format!("Value changed in row {}, column '{}'", row_index + 1, column),
            Self::RowAdded { row_index, .. } => {
                format!("Row {} was added in the compared file", row_index + 1)
            }
            Self::RowRemoved { row_index, .. } => {
                format!("Row {} is missing from the compared file", row_index + 1)
            }
        }
    }

    /// The reference-side value shown in exports
    pub fn reference_value(&self) -> Option<String> {
        match self {
            Self::StructureDifference {
                reference_columns, ..
            } => Some(format!("{} columns", reference_columns)),
            Self::ColumnMissing { column } => Some(format!("Column '{}' present", column)),
            Self::ColumnAdded { .. } => Some("Column not present".to_string()),
            Self::CellModified {
                reference_value, ..
            } => Some(reference_value.clone()),
            Self::RowRemoved { data, .. } => Some(format_row(data)),
            Self::RowAdded { .. } => None,
        }
    }

    /// The compare-side value shown in exports
    pub fn compare_value(&self) -> Option<String> {
        match self {
            Self::StructureDifference {
                compare_columns, ..
            } => Some(format!("{} columns", compare_columns)),
            Self::ColumnMissing { .. } => Some("Column missing".to_string()),
            Self::ColumnAdded { column } => Some(format!("Column '{}' added", column)),
            Self::CellModified { compare_value, .. } => Some(compare_value.clone()),
            Self::RowAdded { data, .. } => Some(format_row(data)),
            Self::RowRemoved { .. } => None,
        }
    }
}

fn format_row(data: &IndexMap<String, String>) -> String {
    data.iter()
        .map(|(column, value)| format!("{}={}", column, value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Compare column counts and column membership.
///
/// Column order is not compared. Missing/added columns are reported in the
/// declared order of the table they belong to.
pub fn compare_structure(reference: &Table, compare: &Table) -> Vec<Difference> {
    let mut differences = Vec::new();

    if reference.column_count() != compare.column_count() {
        differences.push(Difference::StructureDifference {
            reference_columns: reference.column_count(),
            compare_columns: compare.column_count(),
        });
    }

    let reference_columns = reference.column_set();
    let compare_columns = compare.column_set();

    for column in reference_columns.difference(&compare_columns) {
        differences.push(Difference::ColumnMissing {
            column: column.to_string(),
        });
    }

    for column in compare_columns.difference(&reference_columns) {
        differences.push(Difference::ColumnAdded {
            column: column.to_string(),
        });
    }

    differences
}

/// Columns present in both tables, in reference order
pub fn common_columns<'a>(reference: &'a Table, compare: &Table) -> Vec<&'a str> {
    reference
        .column_set()
        .into_iter()
        .filter(|column| compare.has_column(column))
        .collect()
}

/// Compare cell values by row position.
///
/// Rows present in both tables are compared cell by cell over the common
/// columns. Rows past the end of the shorter table are reported whole as
/// added or removed.
pub fn compare_content(reference: &Table, compare: &Table) -> Vec<Difference> {
    let common = common_columns(reference, compare);
    let shared_rows = reference.row_count().min(compare.row_count());

    // Per-row results are gathered in row order
    let per_row: Vec<Vec<Difference>> = (0..shared_rows)
        .into_par_iter()
        .map(|row| diff_row(reference, compare, row, &common))
        .collect();

    let mut differences: Vec<Difference> = per_row.into_iter().flatten().collect();

    if compare.row_count() > reference.row_count() {
        for row in reference.row_count()..compare.row_count() {
            differences.push(Difference::RowAdded {
                row_index: row,
                data: compare.row_snapshot(row, &common),
            });
        }
    } else if reference.row_count() > compare.row_count() {
        for row in compare.row_count()..reference.row_count() {
            differences.push(Difference::RowRemoved {
                row_index: row,
                data: reference.row_snapshot(row, &common),
            });
        }
    }

    differences
}

fn diff_row(reference: &Table, compare: &Table, row: usize, common: &[&str]) -> Vec<Difference> {
    common
        .iter()
        .filter_map(|&column| {
            let before = reference.value(row, column)?;
            let after = compare.value(row, column)?;
            (before != after).then(|| Difference::CellModified {
                row_index: row,
                column: column.to_string(),
                reference_value: before.to_string(),
                compare_value: after.to_string(),
            })
        })
        .collect()
}
