//! Error types for tabcompare operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TabcompareError>;

#[derive(Error, Debug)]
pub enum TabcompareError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input file is empty: {filename}")]
    EmptyInput { filename: String },

    #[error("Unsupported file format '{extension}' for {filename} (expected csv, xlsx or xls)")]
    UnsupportedFormat { filename: String, extension: String },

    #[error("Could not decode {filename} as UTF-8, Latin-1 or Windows-1252")]
    Decode { filename: String },

    #[error("Malformed table in {filename}: {message}")]
    MalformedTable { filename: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl TabcompareError {
    pub fn empty_input(filename: impl Into<String>) -> Self {
        Self::EmptyInput {
            filename: filename.into(),
        }
    }

    pub fn unsupported_format(filename: impl Into<String>, extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            filename: filename.into(),
            extension: extension.into(),
        }
    }

    pub fn decode(filename: impl Into<String>) -> Self {
        Self::Decode {
            filename: filename.into(),
        }
    }

    pub fn malformed_table(filename: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::MalformedTable {
            filename: filename.into(),
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }
}
