//! # tabcompare
//!
//! Compares two tabular datasets (CSV or Excel) and reports schema
//! differences, positional cell and row changes, and rows whose content
//! exists in only one of the two files.
//!
//! ```no_run
//! let report = tabcompare::compare_files(
//!     b"id,name\n1,Apple\n",
//!     "old.csv",
//!     b"id,name\n1,Pear\n",
//!     "new.csv",
//! )?;
//! assert!(!report.identical);
//! # Ok::<(), tabcompare::TabcompareError>(())
//! ```

pub mod cli;
pub mod error;
pub mod config;
pub mod table;
pub mod loader;
pub mod hash;
pub mod diff;
pub mod uniqueness;
pub mod report;
pub mod comparator;
pub mod commands;
pub mod output;
pub mod progress;

pub use comparator::{compare_files, Comparator, InputFile};
pub use config::CompareConfig;
pub use diff::{compare_content, compare_structure, Difference};
pub use error::{Result, TabcompareError};
pub use loader::load;
pub use report::{ComparisonReport, Summary};
pub use table::Table;
pub use uniqueness::{extract_unique, UniqueRecord, UniquenessResult};
