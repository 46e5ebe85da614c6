//! Command-line interface for adfunnel
//!
//! # Usage Examples
//!
//! ```bash
//! # Default run: 50 campaigns over the 90 days ending now
//! adfunnel generate --output-dir out/
//!
//! # Reproducible run from a config file, overriding the seed
//! adfunnel generate -o out/ --config funnel.yaml --seed 7
//!
//! # Validate settings only
//! adfunnel generate -o out/ --click-rate 0.05 --dry-run
//!
//! # Append campaigns, then check the directory
//! adfunnel append-campaigns --campaigns out/campaigns.csv -n 5
//! adfunnel verify --input-dir out/
//! ```
//!
//! Logging is controlled with `RUST_LOG`, e.g. `RUST_LOG=info`.

use adfunnel::{run_append, run_generate, run_verify};
use clap::{Parser, Subcommand};
use funnel_args::AppendArgs;
use funnel_sink::{GenerateArgs, VerifyArgs};

#[derive(Parser)]
#[command(name = "adfunnel")]
#[command(about = "Generate a deterministic synthetic advertising funnel")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate campaigns, impressions, clicks and conversions
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Append CMP-NEW- campaigns to an existing campaigns CSV
    AppendCampaigns {
        #[command(flatten)]
        args: AppendArgs,
    },

    /// Check a generated directory for consistency
    Verify {
        #[command(flatten)]
        args: VerifyArgs,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { args } => {
            run_generate(args)?;
        }
        Commands::AppendCampaigns { args } => {
            run_append(args)?;
        }
        Commands::Verify { args } => {
            run_verify(args)?;
        }
    }

    Ok(())
}
