//! Headline scenario: 50 campaigns, ~10k impressions each, 2% CTR, 5% CVR.

use crate::common::{generate, init_tracing, window_end};
use funnel_core::{check_integrity, FunnelConfig};

fn scenario_config(impressions_per_campaign: u64) -> FunnelConfig {
    let mut config = FunnelConfig::ending_at(window_end());
    config.num_campaigns = 50;
    config.impressions_per_campaign = impressions_per_campaign;
    config.click_rate = 0.02;
    config.conversion_rate = 0.05;
    config
}

fn assert_within(actual: f64, expected: f64, relative: f64) {
    assert!(
        (actual - expected).abs() <= expected * relative,
        "{actual} not within {relative} of {expected}"
    );
}

/// Check the scenario and return the number of impressions.
fn check_scenario(config: FunnelConfig) -> usize {
    let tables = generate(config.clone());
    let summary = tables.summary();
    check_integrity(&tables).unwrap();

    assert_eq!(summary.campaigns, 50);

    // Roughly half the campaigns serve, each with 1.25 × M on average.
    let serving = tables
        .campaigns
        .iter()
        .filter(|c| c.status.has_served())
        .count() as f64;
    let expected_impressions = serving * config.impressions_per_campaign as f64 * 1.25;
    assert_within(summary.impressions as f64, expected_impressions, 0.2);

    assert_within(summary.click_rate, config.click_rate, 0.2);
    assert_within(summary.conversion_rate, config.conversion_rate, 0.2);
    assert!(summary.total_revenue_usd > 0.0);
    assert!(summary.roas > 0.0);
    summary.impressions
}

#[test]
fn test_scenario_reduced_scale() {
    init_tracing();
    check_scenario(scenario_config(2_000));
}

/// Full-size run; takes a while in debug builds.
#[test]
#[ignore]
fn test_scenario_full_scale() {
    init_tracing();
    let impressions = check_scenario(scenario_config(10_000));
    assert!(
        (150_000..=650_000).contains(&impressions),
        "{impressions} impressions"
    );
}
