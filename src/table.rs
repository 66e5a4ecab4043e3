//! In-memory representation of a parsed dataset

use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

/// A loaded dataset: ordered column names and rows of text cells.
///
/// Every row holds exactly one value per declared column. Column names are
/// unique: a repeated header `x` becomes `x.1`, `x.2` and so on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

impl Table {
    /// Build a table, trimming column names, renaming repeated ones and
    /// padding short rows with empty cells.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let columns = dedupe_column_names(
            columns
                .into_iter()
                .enumerate()
                .map(|(position, name)| normalize_column_name(&name, position))
                .collect(),
        );

        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        let index = columns
            .iter()
            .enumerate()
            .map(|(position, name)| (name.clone(), position))
            .collect();

        Self { columns, rows, index }
    }

    /// Convenience constructor for literal data
    pub fn from_rows(columns: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|v| v.to_string()).collect())
                .collect(),
        )
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Column names in declared order
    pub fn column_set(&self) -> IndexSet<&str> {
        self.columns.iter().map(String::as_str).collect()
    }

    /// Value of `column` in row `row`, if both exist
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let position = *self.index.get(column)?;
        self.rows.get(row).map(|r| r[position].as_str())
    }

    /// Snapshot of a row restricted to `columns`, in the given order
    pub fn row_snapshot<S: AsRef<str>>(&self, row: usize, columns: &[S]) -> IndexMap<String, String> {
        columns
            .iter()
            .filter_map(|column| {
                let column = column.as_ref();
                self.value(row, column)
                    .map(|value| (column.to_string(), value.to_string()))
            })
            .collect()
    }

    /// Snapshot of a row across every column
    pub fn full_row(&self, row: usize) -> IndexMap<String, String> {
        let columns: Vec<&str> = self.column_set().into_iter().collect();
        self.row_snapshot(row, &columns)
    }
}

/// Trim a header cell; blank headers get a positional placeholder name.
fn normalize_column_name(name: &str, position: usize) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        format!("Unnamed: {}", position)
    } else {
        trimmed.to_string()
    }
}

/// Suffix repeated names with `.N`. A suffixed name that is itself taken
/// gets suffixed again, so `a, a.1, a` becomes `a, a.1, a.1.1`.
fn dedupe_column_names(names: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::with_capacity(names.len());
    let mut result = Vec::with_capacity(names.len());
    let mut renamed = false;

    for name in names {
        let mut name = name;
        let mut seen = counts.get(&name).copied().unwrap_or(0);
        while seen > 0 {
            renamed = true;
            counts.insert(name.clone(), seen + 1);
            name = format!("{}.{}", name, seen);
            seen = counts.get(&name).copied().unwrap_or(0);
        }
        counts.insert(name.clone(), seen + 1);
        result.push(name);
    }

    if renamed {
        log::debug!("Renamed repeated column names: {:?}", result);
    }
    result
}
