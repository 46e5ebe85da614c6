//! Shared fixtures.

use chrono::{DateTime, TimeZone, Utc};
use funnel_core::{FunnelConfig, FunnelTables};
use funnel_generator::FunnelGenerator;

pub const SEED: u64 = 42;

pub fn window_end() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap()
}

/// Small config that still exercises every stage.
pub fn small_config() -> FunnelConfig {
    let mut config = FunnelConfig::ending_at(window_end());
    config.seed = SEED;
    config.num_campaigns = 20;
    config.impressions_per_campaign = 400;
    config.click_rate = 0.1;
    config.conversion_rate = 0.2;
    config
}

pub fn generate(config: FunnelConfig) -> FunnelTables {
    FunnelGenerator::new(config)
        .expect("valid config")
        .generate()
        .expect("generation succeeds")
}

/// Initialize tracing for debug output; repeated calls are no-ops.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("funnel_generator=info,funnel_sink=info,adfunnel=info")
        .with_test_writer()
        .try_init()
        .ok();
}
