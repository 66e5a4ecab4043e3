//! Position-independent detection of rows found in only one table

use crate::diff::common_columns;
use crate::table::Table;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Joins key-column values into a composite row key.
///
/// ASCII unit separator. A value that itself contains this character can make
/// two different rows share a key; this approximation is accepted.
pub const KEY_DELIMITER: char = '\u{1F}';

/// Default cap on the number of unique rows echoed per side
pub const DEFAULT_UNIQUE_LIMIT: usize = 50;

/// A row whose composite key does not occur in the other table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueRecord {
    pub row_index: usize,
    pub data: IndexMap<String, String>,
    pub key_columns: Vec<String>,
}

/// Unique content on each side, plus columns found on one side only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniquenessResult {
    pub unique_in_reference: Vec<UniqueRecord>,
    pub unique_in_compare: Vec<UniqueRecord>,
    pub columns_only_in_reference: Vec<String>,
    pub columns_only_in_compare: Vec<String>,
    pub total_unique_in_reference: usize,
    pub total_unique_in_compare: usize,
}

impl UniquenessResult {
    pub fn has_unique_content(&self) -> bool {
        self.total_unique_in_reference > 0 || self.total_unique_in_compare > 0
    }

    /// True when either list holds fewer records than its total
    pub fn is_truncated(&self) -> bool {
        self.unique_in_reference.len() < self.total_unique_in_reference
            || self.unique_in_compare.len() < self.total_unique_in_compare
    }
}

/// Find rows of each table whose key over the shared columns is absent
/// from the other table. At most `limit` records are kept per side.
pub fn extract_unique(reference: &Table, compare: &Table, limit: usize) -> UniquenessResult {
    let columns_only_in_reference = columns_only_in(reference, compare);
    let columns_only_in_compare = columns_only_in(compare, reference);

    let key_columns = common_columns(reference, compare);
    if key_columns.is_empty() {
        log::debug!("No shared columns, skipping uniqueness extraction");
        return UniquenessResult {
            columns_only_in_reference,
            columns_only_in_compare,
            ..Default::default()
        };
    }

    let reference_keys = first_row_by_key(reference, &key_columns);
    let compare_keys = first_row_by_key(compare, &key_columns);

    let (unique_in_reference, total_unique_in_reference) =
        unique_side(reference, &reference_keys, &compare_keys, &key_columns, limit);
    let (unique_in_compare, total_unique_in_compare) =
        unique_side(compare, &compare_keys, &reference_keys, &key_columns, limit);

    log::debug!(
        "Uniqueness over {} key columns: {} only in reference, {} only in compare",
        key_columns.len(),
        total_unique_in_reference,
        total_unique_in_compare
    );

    UniquenessResult {
        unique_in_reference,
        unique_in_compare,
        columns_only_in_reference,
        columns_only_in_compare,
        total_unique_in_reference,
        total_unique_in_compare,
    }
}

/// Composite key of one row over `key_columns`
pub fn row_key(table: &Table, row: usize, key_columns: &[&str]) -> String {
    let mut key = String::new();
    for (i, column) in key_columns.iter().enumerate() {
        if i > 0 {
            key.push(KEY_DELIMITER);
        }
        key.push_str(table.value(row, column).unwrap_or_default());
    }
    key
}

/// Maps each distinct key to the first row carrying it, in row order
fn first_row_by_key(table: &Table, key_columns: &[&str]) -> IndexMap<String, usize> {
    let mut keys = IndexMap::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        keys.entry(row_key(table, row, key_columns)).or_insert(row);
    }
    keys
}

fn unique_side(
    table: &Table,
    own: &IndexMap<String, usize>,
    other: &IndexMap<String, usize>,
    key_columns: &[&str],
    limit: usize,
) -> (Vec<UniqueRecord>, usize) {
    let missing: Vec<usize> = own
        .iter()
        .filter(|(key, _)| !other.contains_key(*key))
        .map(|(_, &row)| row)
        .collect();

    let records = missing
        .iter()
        .take(limit)
        .map(|&row| UniqueRecord {
            row_index: row,
            data: table.full_row(row),
            key_columns: key_columns.iter().map(|c| c.to_string()).collect(),
        })
        .collect();

    (records, missing.len())
}

fn columns_only_in(table: &Table, other: &Table) -> Vec<String> {
    let other_columns: IndexSet<&str> = other.column_set();
    table
        .column_set()
        .into_iter()
        .filter(|column| !other_columns.contains(column))
        .map(String::from)
        .collect()
}
