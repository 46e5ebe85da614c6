//! Common CLI argument definitions.

use clap::Args;
use std::path::PathBuf;

/// Generation settings shared by the commands that produce a dataset.
///
/// Every setting is optional: unset flags fall back to the config file, and
/// settings missing there fall back to the built-in defaults.
#[derive(Args, Clone, Debug, Default)]
pub struct CommonGenerateArgs {
    /// Path to a YAML generation config
    #[arg(long, short = 'c', env = "ADFUNNEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Random seed for deterministic generation (same seed = same data)
    #[arg(long, env = "ADFUNNEL_SEED")]
    pub seed: Option<u64>,

    /// Number of campaigns to generate
    #[arg(long)]
    pub num_campaigns: Option<u64>,

    /// Average number of impressions per serving campaign
    #[arg(long)]
    pub impressions_per_campaign: Option<u64>,

    /// Fraction of impressions that become clicks, within [0, 1]
    #[arg(long)]
    pub click_rate: Option<f64>,

    /// Fraction of clicks that become conversions, within [0, 1]
    #[arg(long)]
    pub conversion_rate: Option<f64>,

    /// Start of the generation window (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub start: Option<String>,

    /// End of the generation window (YYYY-MM-DD or RFC 3339, default: now)
    #[arg(long)]
    pub end: Option<String>,

    /// Timestamp written to `updated_at` (default: window end)
    #[arg(long)]
    pub as_of: Option<String>,

    /// Worker threads (default: number of CPUs)
    #[arg(long, env = "ADFUNNEL_THREADS")]
    pub threads: Option<usize>,

    /// Dry-run mode: validate the configuration without generating data
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments of the incremental campaign append.
#[derive(Args, Clone, Debug)]
pub struct AppendArgs {
    /// Existing campaigns CSV file to append to
    #[arg(long)]
    pub campaigns: PathBuf,

    /// Number of campaigns to add
    #[arg(long, short = 'n', default_value = "10")]
    pub num_campaigns: u64,

    /// Random seed for the appended campaigns
    #[arg(long, default_value = "42", env = "ADFUNNEL_SEED")]
    pub seed: u64,

    /// Reference time used as "now" (YYYY-MM-DD or RFC 3339, default: now)
    #[arg(long)]
    pub reference: Option<String>,

    /// First CMP-NEW- sequence number (default: one past the highest existing)
    #[arg(long)]
    pub first_sequence: Option<u64>,

    /// Print the campaigns that would be appended without writing them
    #[arg(long)]
    pub dry_run: bool,
}
