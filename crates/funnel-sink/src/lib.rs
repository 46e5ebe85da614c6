//! File sinks for adfunnel tables.
//!
//! This crate writes a finished [`FunnelTables`](funnel_core::FunnelTables)
//! to disk as CSV or JSON Lines, reads such a directory back, and appends
//! rows to an existing CSV table.
//!
//! # Example
//!
//! ```ignore
//! use funnel_core::FunnelSink;
//! use funnel_sink::{CsvSink, Layout};
//!
//! let mut sink = CsvSink::new("/tmp/funnel").with_layout(Layout::Partitioned);
//! let metrics = sink.write_tables(&tables)?;
//! ```

pub mod args;
mod csv_sink;
mod error;
mod jsonl_sink;
pub mod layout;
mod metrics;
mod reader;
mod writer;

pub use args::{GenerateArgs, OutputArgs, VerifyArgs};
pub use csv_sink::{append_csv, CsvSink};
pub use error::SinkError;
pub use jsonl_sink::JsonlSink;
pub use layout::{Layout, OutputFormat};
pub use metrics::{total_rows, WriteMetrics};
pub use reader::{read_csv, read_jsonl, read_table, read_tables, verify_dir};
pub use writer::DEFAULT_BUFFER_SIZE;
