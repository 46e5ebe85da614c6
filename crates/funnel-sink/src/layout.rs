//! Where table files live on disk.
//!
//! ```text
//! <dir>/campaigns.csv                                    flat (always for campaigns)
//! <dir>/impressions.csv                                  flat
//! <dir>/impressions/date_key=2024-03-15/part-00000.csv   partitioned
//! ```

use crate::error::SinkError;
use funnel_core::{Record, TableDefinition};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Stem of the single data file written into each partition directory.
pub const PART_FILE_STEM: &str = "part-00000";

/// File format of the written tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// One JSON object per line
    Jsonl,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Jsonl => "jsonl",
        }
    }
}

/// File layout of the written tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// One file per table.
    #[default]
    Flat,
    /// One directory per partition value for tables with a partition key.
    Partitioned,
}

/// `<dir>/<table>.<ext>`
pub fn table_file(dir: &Path, table: &TableDefinition, format: OutputFormat) -> PathBuf {
    dir.join(format!("{}.{}", table.name, format.extension()))
}

/// `<dir>/<table>/<key>=<value>/part-00000.<ext>`
pub fn partition_file(
    dir: &Path,
    table: &TableDefinition,
    key: &str,
    value: &str,
    format: OutputFormat,
) -> PathBuf {
    dir.join(table.name)
        .join(format!("{key}={value}"))
        .join(format!("{PART_FILE_STEM}.{}", format.extension()))
}

/// Group rows by partition value, keeping row order within each group.
pub fn group_by_partition<T: Record>(rows: &[T]) -> BTreeMap<&str, Vec<&T>> {
    let mut groups: BTreeMap<&str, Vec<&T>> = BTreeMap::new();
    for row in rows {
        let value = row.partition_value().unwrap_or_default();
        groups.entry(value).or_default().push(row);
    }
    groups
}

/// Find the data files of `table`, whichever layout it was written with.
///
/// Returns the flat file if present, otherwise every partition file in
/// partition-value order.
pub(crate) fn locate_table(
    dir: &Path,
    table: &'static TableDefinition,
    format: OutputFormat,
) -> Result<(Layout, Vec<PathBuf>), SinkError> {
    let flat = table_file(dir, table, format);
    if flat.is_file() {
        return Ok((Layout::Flat, vec![flat]));
    }

    let table_dir = dir.join(table.name);
    let key = match table.partition_key {
        Some(key) if table_dir.is_dir() => key,
        _ => {
            return Err(SinkError::TableNotFound {
                table: table.name,
                dir: dir.to_path_buf(),
            })
        }
    };

    let prefix = format!("{key}=");
    let mut partitions = Vec::new();
    for entry in fs::read_dir(&table_dir)? {
        let entry = entry?;
        let is_partition = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(&prefix));
        if is_partition && entry.file_type()?.is_dir() {
            partitions.push(entry.path());
        }
    }
    partitions.sort();

    let files = partitions
        .into_iter()
        .map(|partition| partition.join(format!("{PART_FILE_STEM}.{}", format.extension())))
        .filter(|file| file.is_file())
        .collect();
    Ok((Layout::Partitioned, files))
}
