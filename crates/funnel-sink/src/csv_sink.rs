//! CSV sink.

use crate::error::SinkError;
use crate::layout::{Layout, OutputFormat};
use crate::metrics::WriteMetrics;
use crate::writer::{write_table, DEFAULT_BUFFER_SIZE};
use csv::WriterBuilder;
use funnel_core::{FunnelSink, FunnelTables, Record};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Writes each table as CSV with a header row.
#[derive(Debug, Clone)]
pub struct CsvSink {
    output_dir: PathBuf,
    layout: Layout,
    include_header: bool,
}

impl CsvSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            layout: Layout::Flat,
            include_header: true,
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Set whether to include a header row in each file.
    pub fn with_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write one table.
    pub fn write_table<T: Record>(&self, rows: &[T]) -> Result<WriteMetrics, SinkError> {
        write_table(
            &self.output_dir,
            self.layout,
            OutputFormat::Csv,
            rows,
            |path, group| {
                let file = File::create(path)?;
                write_rows(file, group, self.include_header)
            },
        )
    }
}

impl FunnelSink for CsvSink {
    type Output = Vec<WriteMetrics>;
    type Error = SinkError;

    fn write_tables(&mut self, tables: &FunnelTables) -> Result<Vec<WriteMetrics>, SinkError> {
        Ok(vec![
            self.write_table(&tables.campaigns)?,
            self.write_table(&tables.impressions)?,
            self.write_table(&tables.clicks)?,
            self.write_table(&tables.conversions)?,
        ])
    }
}

/// Append rows to an existing CSV file without rewriting it.
///
/// The file must already exist and carry a header; no header is written.
pub fn append_csv<T: Record, P: AsRef<Path>>(
    path: P,
    rows: &[T],
) -> Result<WriteMetrics, SinkError> {
    let start_time = Instant::now();
    let path = path.as_ref();
    let mut metrics = WriteMetrics::new(T::definition().name);

    info!("Appending {} rows to CSV file '{}'", rows.len(), path.display());

    let file = OpenOptions::new().append(true).open(path)?;
    let all: Vec<&T> = rows.iter().collect();
    write_rows(file, &all, false)?;

    metrics.rows_written = rows.len() as u64;
    metrics.files_written = 1;
    metrics.file_size_bytes = std::fs::metadata(path)?.len();
    metrics.total_duration = start_time.elapsed();

    info!(
        "CSV append complete: {} rows in {:?}",
        metrics.rows_written, metrics.total_duration
    );
    Ok(metrics)
}

fn write_rows<T: Record>(file: File, rows: &[&T], include_header: bool) -> Result<(), SinkError> {
    let buf_writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
    // Headers come from the table definition so empty tables still get one.
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(buf_writer);

    if include_header {
        writer.write_record(T::definition().column_names())?;
    }
    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    let mut inner = writer
        .into_inner()
        .map_err(|e| SinkError::Io(std::io::Error::other(e.to_string())))?;
    inner.flush()?;
    Ok(())
}
