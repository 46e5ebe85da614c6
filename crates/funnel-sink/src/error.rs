//! Error types for the file sinks.

use funnel_core::IntegrityError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing or reading funnel tables.
#[derive(Error, Debug)]
pub enum SinkError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Neither a table file nor a partition directory was found.
    #[error("Table '{table}' not found under {}", dir.display())]
    TableNotFound { table: &'static str, dir: PathBuf },

    /// A JSON Lines row could not be parsed.
    #[error("{}:{line}: {source}", path.display())]
    InvalidLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The tables that were read back are inconsistent.
    #[error("Integrity check failed: {0}")]
    Integrity(#[from] IntegrityError),
}
