//! Layout handling shared by the CSV and JSON Lines sinks.

use crate::error::SinkError;
use crate::layout::{group_by_partition, partition_file, table_file, Layout, OutputFormat};
use crate::metrics::WriteMetrics;
use funnel_core::Record;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Default buffer size for file writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Write `rows` of one table under `dir`, calling `write_file` once per
/// output file.
///
/// Tables without a partition key are always written flat.
pub(crate) fn write_table<T, F>(
    dir: &Path,
    layout: Layout,
    format: OutputFormat,
    rows: &[T],
    mut write_file: F,
) -> Result<WriteMetrics, SinkError>
where
    T: Record,
    F: FnMut(&Path, &[&T]) -> Result<(), SinkError>,
{
    let start_time = Instant::now();
    let table = T::definition();
    let mut metrics = WriteMetrics::new(table.name);

    match (layout, table.partition_key) {
        (Layout::Partitioned, Some(key)) => {
            let groups = group_by_partition(rows);
            info!(
                "Writing {} rows of '{}' into {} partitions under '{}'",
                rows.len(),
                table.name,
                groups.len(),
                dir.display()
            );
            for (value, group) in &groups {
                let path = partition_file(dir, table, key, value, format);
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                write_file(&path, group)?;
                metrics.rows_written += group.len() as u64;
                metrics.files_written += 1;
                metrics.file_size_bytes += fs::metadata(&path)?.len();
                debug!("Written {} rows to '{}'", group.len(), path.display());
            }
        }
        _ => {
            let path = table_file(dir, table, format);
            info!(
                "Writing {} rows of '{}' to '{}'",
                rows.len(),
                table.name,
                path.display()
            );
            fs::create_dir_all(dir)?;
            let all: Vec<&T> = rows.iter().collect();
            write_file(&path, &all)?;
            metrics.rows_written = rows.len() as u64;
            metrics.files_written = 1;
            metrics.file_size_bytes = fs::metadata(&path)?.len();
        }
    }

    metrics.total_duration = start_time.elapsed();
    info!(
        "Table '{}' complete: {} rows, {} bytes in {:?} ({:.2} rows/sec)",
        metrics.table,
        metrics.rows_written,
        metrics.file_size_bytes,
        metrics.total_duration,
        metrics.rows_per_second()
    );
    Ok(metrics)
}
