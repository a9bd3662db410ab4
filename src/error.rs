//! Error handling for receipt parsing and report writing.
//!
//! Only genuine I/O, CSV and configuration failures are errors. Missing or
//! malformed receipt sections degrade to empty fields on the parsed record.

use crate::models::Submission;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read receipt: {path} - {source}")]
    ReceiptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading stopped part way through; `partial` holds the fields scanned so far
    #[error("Receipt scan interrupted{}: {source}", describe_path(.path.as_deref()))]
    ScanInterrupted {
        path: Option<PathBuf>,
        partial: Box<Submission>,
        #[source]
        source: std::io::Error,
    },

    #[error("Input path is also the output path: {path}")]
    OutputOverwritesInput { path: PathBuf },

    #[error("Input not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Directory traversal failed under {path}: {source}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ReceiptError {
    /// Fields recovered before an interrupted scan
    pub fn partial_submission(&self) -> Option<&Submission> {
        match self {
            Self::ScanInterrupted { partial, .. } => Some(partial.as_ref()),
            _ => None,
        }
    }
}

fn describe_path(path: Option<&Path>) -> String {
    path.map(|path| format!(" in {}", path.display()))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, ReceiptError>;
