//! Write metrics.

use std::time::Duration;

/// Metrics from writing one table.
#[derive(Debug, Clone, Default)]
pub struct WriteMetrics {
    /// Table name.
    pub table: String,
    /// Number of rows written.
    pub rows_written: u64,
    /// Number of files created or appended to.
    pub files_written: u64,
    /// Combined size of those files in bytes.
    pub file_size_bytes: u64,
    /// Total time taken.
    pub total_duration: Duration,
}

impl WriteMetrics {
    pub(crate) fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            ..Default::default()
        }
    }

    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate bytes per second.
    pub fn bytes_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.file_size_bytes as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Sum of the per-table metrics of one run.
pub fn total_rows(metrics: &[WriteMetrics]) -> u64 {
    metrics.iter().map(|m| m.rows_written).sum()
}
