//! Comparison limits and their loading from JSON

use crate::error::{Result, TabcompareError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default cap on differences echoed in a report
pub const DEFAULT_MAX_DIFFERENCES: usize = 100;

/// Default cap on unique rows echoed per side
pub const DEFAULT_MAX_UNIQUE_RECORDS: usize = crate::uniqueness::DEFAULT_UNIQUE_LIMIT;

/// Default maximum size of an input file (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Settings for a comparison run.
///
/// `max_file_size` is enforced by callers before bytes reach the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    pub max_differences: usize,
    pub max_unique_records: usize,
    pub max_file_size: u64,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            max_differences: DEFAULT_MAX_DIFFERENCES,
            max_unique_records: DEFAULT_MAX_UNIQUE_RECORDS,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl CompareConfig {
    /// Load configuration from a JSON file; absent keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TabcompareError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            TabcompareError::config(format!("invalid config {}: {}", path.display(), e))
        })?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn with_max_differences(mut self, max_differences: usize) -> Self {
        self.max_differences = max_differences;
        self
    }

    pub fn with_max_unique_records(mut self, max_unique_records: usize) -> Self {
        self.max_unique_records = max_unique_records;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_differences == 0 {
            return Err(TabcompareError::config("max_differences must be greater than 0"));
        }
        if self.max_unique_records == 0 {
            return Err(TabcompareError::config("max_unique_records must be greater than 0"));
        }
        if self.max_file_size == 0 {
            return Err(TabcompareError::config("max_file_size must be greater than 0"));
        }
        Ok(())
    }
}
