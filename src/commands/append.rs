//! Append-campaigns command handler.

use crate::config::timestamp::parse_optional;
use anyhow::Context;
use chrono::Utc;
use funnel_args::AppendArgs;
use funnel_core::Campaign;
use funnel_generator::CampaignAppender;
use funnel_sink::{append_csv, read_csv};

/// Run the append-campaigns command.
///
/// Reads the existing campaigns file, generates the new campaigns and
/// appends them in place. Returns the appended campaigns.
pub fn run_append(args: AppendArgs) -> anyhow::Result<Vec<Campaign>> {
    let reference = parse_optional(args.reference.as_deref(), "reference")?.unwrap_or_else(Utc::now);

    let existing: Vec<Campaign> = read_csv(&args.campaigns)
        .with_context(|| format!("Failed to read campaigns from {:?}", args.campaigns))?;
    tracing::info!(
        "Read {} existing campaigns from {:?}",
        existing.len(),
        args.campaigns
    );

    let mut appender = CampaignAppender::new(args.seed).with_count(args.num_campaigns);
    if let Some(sequence) = args.first_sequence {
        appender = appender.with_first_sequence(sequence);
    }
    let campaigns = appender
        .generate(&existing, reference)
        .context("Failed to generate campaigns")?;

    if args.dry_run {
        tracing::info!("Dry run: {} campaigns not written", campaigns.len());
        for campaign in &campaigns {
            println!("{}", serde_json::to_string(campaign)?);
        }
        return Ok(campaigns);
    }

    append_csv(&args.campaigns, &campaigns)
        .with_context(|| format!("Failed to append to {:?}", args.campaigns))?;

    tracing::info!(
        "Appended {} campaigns; select them with campaign_id LIKE 'CMP-NEW-%'",
        campaigns.len()
    );
    Ok(campaigns)
}
