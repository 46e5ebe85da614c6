//! CLI argument definitions for the file sinks.

use crate::layout::{Layout, OutputFormat};
use crate::{CsvSink, JsonlSink};
use clap::Args;
use std::path::PathBuf;

// Re-export CommonGenerateArgs for convenience
pub use funnel_args::CommonGenerateArgs;

/// Where and how generated tables are written.
#[derive(Args, Clone, Debug)]
pub struct OutputArgs {
    /// Output directory (one file or partition directory per table)
    #[arg(long, short = 'o', env = "ADFUNNEL_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Output file format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Lay out event tables as <table>/date_key=YYYY-MM-DD/part-00000.<ext>
    #[arg(long)]
    pub partitioned: bool,
}

impl OutputArgs {
    pub fn layout(&self) -> Layout {
        if self.partitioned {
            Layout::Partitioned
        } else {
            Layout::Flat
        }
    }

    pub fn csv_sink(&self) -> CsvSink {
        CsvSink::new(&self.output_dir).with_layout(self.layout())
    }

    pub fn jsonl_sink(&self) -> JsonlSink {
        JsonlSink::new(&self.output_dir).with_layout(self.layout())
    }
}

/// Arguments of the `generate` command.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub common: CommonGenerateArgs,
}

/// Arguments of the `verify` command.
#[derive(Args, Clone, Debug)]
pub struct VerifyArgs {
    /// Directory previously written by `generate`
    #[arg(long, short = 'i')]
    pub input_dir: PathBuf,

    /// File format of the tables
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,
}
