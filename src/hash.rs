//! Hashing utilities for inputs and loaded tables

use crate::table::Table;
use blake3::Hasher;

/// A hash value represented as a hex string
pub type HashValue = String;

/// Hash of raw input bytes
pub fn checksum(bytes: &[u8]) -> HashValue {
    blake3::hash(bytes).to_hex().to_string()
}

/// Hash of a table's parsed content.
///
/// Independent of the source encoding and file format: two inputs that load
/// to the same columns and cells share a fingerprint.
pub fn table_fingerprint(table: &Table) -> HashValue {
    let mut hasher = Hasher::new();

    hasher.update(&(table.column_count() as u64).to_le_bytes());
    for column in table.columns() {
        update_field(&mut hasher, column);
    }

    hasher.update(&(table.row_count() as u64).to_le_bytes());
    for row in table.rows() {
        for value in row {
            update_field(&mut hasher, value);
        }
    }

    hasher.finalize().to_hex().to_string()
}

// Length-prefixed so field boundaries cannot be shifted
fn update_field(hasher: &mut Hasher, value: &str) {
    hasher.update(&(value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}
