//! Destination of a finished dataset.

use crate::tables::FunnelTables;

/// Something that consumes the four tables of a run.
///
/// A sink receives the tables only once generation has fully succeeded, so
/// it never sees a partial dataset.
pub trait FunnelSink {
    /// What the sink reports after writing, e.g. per-table metrics.
    type Output;

    type Error: std::error::Error + Send + Sync + 'static;

    fn write_tables(&mut self, tables: &FunnelTables) -> Result<Self::Output, Self::Error>;
}
