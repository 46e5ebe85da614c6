//! Verify command handler.

use anyhow::Context;
use funnel_core::FunnelSummary;
use funnel_sink::{verify_dir, VerifyArgs};

/// Run the verify command.
///
/// Reads a generated directory back and checks it for consistency; any
/// violation is returned as an error.
pub fn run_verify(args: VerifyArgs) -> anyhow::Result<FunnelSummary> {
    tracing::info!("Verifying {:?} tables in {:?}", args.format, args.input_dir);

    let (tables, report) = verify_dir(&args.input_dir, args.format)
        .with_context(|| format!("Verification of {:?} failed", args.input_dir))?;

    tracing::info!(
        "Verification completed successfully: {} campaigns, {} impressions, {} clicks, {} conversions",
        report.campaigns,
        report.impressions,
        report.clicks,
        report.conversions
    );

    let summary = tables.summary();
    println!("{}", serde_json::to_string(&summary)?);
    Ok(summary)
}
