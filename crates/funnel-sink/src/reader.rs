//! Reading written tables back.

use crate::error::SinkError;
use crate::layout::{locate_table, Layout, OutputFormat};
use csv::ReaderBuilder;
use funnel_core::{check_integrity, FunnelTables, IntegrityReport, Record};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Read every row of a CSV file written with a header.
pub fn read_csv<T: Record, P: AsRef<Path>>(path: P) -> Result<Vec<T>, SinkError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path.as_ref())?;
    let rows = reader.deserialize().collect::<Result<Vec<T>, _>>()?;
    debug!("Read {} rows from '{}'", rows.len(), path.as_ref().display());
    Ok(rows)
}

/// Read every row of a JSON Lines file. Blank lines are skipped.
pub fn read_jsonl<T: Record, P: AsRef<Path>>(path: P) -> Result<Vec<T>, SinkError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut rows = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str(&line).map_err(|source| SinkError::InvalidLine {
            path: path.to_path_buf(),
            line: index + 1,
            source,
        })?;
        rows.push(row);
    }
    debug!("Read {} rows from '{}'", rows.len(), path.display());
    Ok(rows)
}

/// Read one table from `dir`, in either layout.
///
/// Partitioned tables are reassembled in identifier order.
pub fn read_table<T: Record>(dir: &Path, format: OutputFormat) -> Result<Vec<T>, SinkError> {
    let (layout, files) = locate_table(dir, T::definition(), format)?;

    let mut rows = Vec::new();
    for file in &files {
        let mut part = match format {
            OutputFormat::Csv => read_csv::<T, _>(file)?,
            OutputFormat::Jsonl => read_jsonl::<T, _>(file)?,
        };
        rows.append(&mut part);
    }

    if layout == Layout::Partitioned {
        rows.sort_by(|a, b| a.id().cmp(b.id()));
    }
    Ok(rows)
}

/// Read all four tables from `dir`.
pub fn read_tables(dir: &Path, format: OutputFormat) -> Result<FunnelTables, SinkError> {
    let tables = FunnelTables {
        campaigns: read_table(dir, format)?,
        impressions: read_table(dir, format)?,
        clicks: read_table(dir, format)?,
        conversions: read_table(dir, format)?,
    };
    info!(
        "Read {} rows from '{}'",
        tables.total_rows(),
        dir.display()
    );
    Ok(tables)
}

/// Read the tables in `dir` and check them for consistency.
pub fn verify_dir(
    dir: &Path,
    format: OutputFormat,
) -> Result<(FunnelTables, IntegrityReport), SinkError> {
    let tables = read_tables(dir, format)?;
    let report = check_integrity(&tables)?;
    Ok((tables, report))
}
