//! JSON Lines sink.

use crate::error::SinkError;
use crate::layout::{Layout, OutputFormat};
use crate::metrics::WriteMetrics;
use crate::writer::{write_table, DEFAULT_BUFFER_SIZE};
use funnel_core::{FunnelSink, FunnelTables, Record};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes each table as one JSON object per line.
#[derive(Debug, Clone)]
pub struct JsonlSink {
    output_dir: PathBuf,
    layout: Layout,
}

impl JsonlSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            layout: Layout::Flat,
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
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
            OutputFormat::Jsonl,
            rows,
            |path, group| {
                let file = File::create(path)?;
                let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
                for row in group {
                    serde_json::to_writer(&mut writer, row)?;
                    writer.write_all(b"\n")?;
                }
                writer.flush()?;
                Ok(())
            },
        )
    }
}

impl FunnelSink for JsonlSink {
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
