//! adfunnel library
//!
//! Generates a synthetic, referentially consistent advertising funnel
//! (campaigns, impressions, clicks, conversions) for demos and tests of
//! analytical table formats.
//!
//! # Crates
//!
//! - `funnel_core` - record types, identifiers, table definitions, config, integrity checks
//! - `funnel_generator` - the seeded, parallel generation pipeline
//! - `funnel_sink` - CSV / JSON Lines writers and readers
//! - `funnel_args` - command-line arguments shared by the commands
//!
//! # CLI Usage
//!
//! ```bash
//! # Generate the default dataset as CSV
//! adfunnel generate --output-dir out/
//!
//! # Partitioned JSON Lines with a fixed window
//! adfunnel generate -o out/ --format jsonl --partitioned \
//!   --start 2024-01-01 --end 2024-04-01 --seed 7
//!
//! # Add ten CMP-NEW- campaigns to an existing table
//! adfunnel append-campaigns --campaigns out/campaigns.csv
//!
//! # Check a generated directory
//! adfunnel verify --input-dir out/
//! ```

pub mod commands;
pub mod config;

pub use commands::append::run_append;
pub use commands::generate::run_generate;
pub use commands::verify::run_verify;
pub use config::resolve_config;
