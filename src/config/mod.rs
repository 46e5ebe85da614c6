//! Turning command-line flags into a [`FunnelConfig`].

pub mod timestamp;

use anyhow::Context;
use chrono::Utc;
use funnel_args::CommonGenerateArgs;
use funnel_core::FunnelConfig;
use timestamp::parse_optional;

/// Build the generation config from a config file (if any) and flag overrides.
///
/// Without a config file, an `--end` of its own yields the default 90-day
/// window ending there, and no window flags at all yield the window ending
/// now. The result is not validated yet.
pub fn resolve_config(args: &CommonGenerateArgs) -> anyhow::Result<FunnelConfig> {
    let start = parse_optional(args.start.as_deref(), "start")?;
    let end = parse_optional(args.end.as_deref(), "end")?;
    let as_of = parse_optional(args.as_of.as_deref(), "as-of")?;

    let mut config = match &args.config {
        Some(path) => FunnelConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {path:?}"))?,
        None => FunnelConfig::ending_at(end.unwrap_or_else(Utc::now)),
    };

    if let Some(end) = end {
        config.end = end;
    }
    if let Some(start) = start {
        config.start = start;
    }
    if as_of.is_some() {
        config.as_of = as_of;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(num_campaigns) = args.num_campaigns {
        config.num_campaigns = num_campaigns;
    }
    if let Some(impressions) = args.impressions_per_campaign {
        config.impressions_per_campaign = impressions;
    }
    if let Some(click_rate) = args.click_rate {
        config.click_rate = click_rate;
    }
    if let Some(conversion_rate) = args.conversion_rate {
        config.conversion_rate = conversion_rate;
    }
    if args.threads.is_some() {
        config.threads = args.threads;
    }

    Ok(config)
}
