//! Generate command handler.

use crate::config::resolve_config;
use anyhow::Context;
use funnel_core::FunnelSummary;
use funnel_generator::FunnelGenerator;
use funnel_sink::{total_rows, GenerateArgs, OutputFormat, WriteMetrics};

/// Run the generate command.
///
/// Returns `None` for a dry run, otherwise the summary of the written
/// dataset. The summary is also printed as a single JSON line for scripts.
pub fn run_generate(args: GenerateArgs) -> anyhow::Result<Option<FunnelSummary>> {
    let config = resolve_config(&args.common)?;
    config.validate().context("Invalid generation config")?;

    if args.common.dry_run {
        tracing::info!("Dry run: configuration is valid, nothing generated");
        print!("{}", serde_yaml::to_string(&config)?);
        return Ok(None);
    }

    let generator = FunnelGenerator::new(config).context("Failed to set up generator")?;
    let output = &args.output;
    tracing::info!(
        "Writing {:?} tables to {:?} ({:?} layout)",
        output.format,
        output.output_dir,
        output.layout()
    );

    let (summary, metrics) = match output.format {
        OutputFormat::Csv => generator.run_into(&mut output.csv_sink()),
        OutputFormat::Jsonl => generator.run_into(&mut output.jsonl_sink()),
    }
    .context("Failed to generate dataset")?;

    log_metrics(&metrics);
    tracing::info!(
        "Funnel: {} campaigns, {} impressions, {} clicks ({:.4}), {} conversions ({:.4})",
        summary.campaigns,
        summary.impressions,
        summary.clicks,
        summary.click_rate,
        summary.conversions,
        summary.conversion_rate
    );
    tracing::info!(
        "Revenue ${:.2}, spend ${:.2}, ROAS {:.2}",
        summary.total_revenue_usd,
        summary.total_spend_usd,
        summary.roas
    );

    println!("{}", serde_json::to_string(&summary)?);
    Ok(Some(summary))
}

fn log_metrics(metrics: &[WriteMetrics]) {
    for table in metrics {
        tracing::info!(
            "Wrote {}: {} rows, {} files, {} bytes in {:?}",
            table.table,
            table.rows_written,
            table.files_written,
            table.file_size_bytes,
            table.total_duration
        );
    }
    tracing::info!("Wrote {} rows in total", total_rows(metrics));
}
