use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse spreadsheet: {0}")]
    Parse(String),

    #[error("{} has no sheet at index {index}", .path.display())]
    MissingSheet { path: PathBuf, index: usize },

    #[error("Invalid template: {0}")]
    Template(String),

    #[error("Invalid state: unrecognized transaction type {0:?}")]
    InvalidState(String),

    #[error("Invalid date serial: {0}")]
    InvalidDate(String),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to list directory {}: {source}", .path.display())]
    DirectoryList {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{failed} of {selected} files failed to convert")]
    BatchFailed { failed: usize, selected: usize },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
