//! Cross-table invariants of a generated dataset.

use crate::common::{generate, small_config};
use funnel_core::{check_integrity, ids, CampaignStatus};
use std::collections::{HashMap, HashSet};

#[test]
fn test_integrity_check_passes() {
    let tables = generate(small_config());
    let report = check_integrity(&tables).unwrap();

    assert_eq!(report.campaigns, tables.campaigns.len());
    assert_eq!(report.conversions, tables.conversions.len());
    assert!(report.clicks > 0);
}

#[test]
fn test_references_resolve() {
    let tables = generate(small_config());
    let impressions: HashSet<_> = tables.impressions.iter().map(|i| &i.impression_id).collect();
    let clicks: HashSet<_> = tables.clicks.iter().map(|c| &c.click_id).collect();

    assert!(tables
        .clicks
        .iter()
        .all(|c| impressions.contains(&c.impression_id)));
    assert!(tables.conversions.iter().all(|c| clicks.contains(&c.click_id)));
}

#[test]
fn test_events_follow_their_parent() {
    let tables = generate(small_config());
    let impressions: HashMap<_, _> = tables
        .impressions
        .iter()
        .map(|i| (i.impression_id.as_str(), i))
        .collect();
    let clicks: HashMap<_, _> = tables
        .clicks
        .iter()
        .map(|c| (c.click_id.as_str(), c))
        .collect();

    for click in &tables.clicks {
        assert!(click.timestamp > impressions[click.impression_id.as_str()].timestamp);
    }
    for conversion in &tables.conversions {
        assert!(conversion.timestamp > clicks[conversion.click_id.as_str()].timestamp);
    }
}

#[test]
fn test_no_impressions_for_draft_or_paused() {
    let tables = generate(small_config());
    let status: HashMap<_, _> = tables
        .campaigns
        .iter()
        .map(|c| (c.campaign_id.as_str(), c.status))
        .collect();

    let idle: Vec<_> = tables
        .campaigns
        .iter()
        .filter(|c| matches!(c.status, CampaignStatus::Draft | CampaignStatus::Paused))
        .collect();
    assert!(!idle.is_empty(), "fixture should contain idle campaigns");

    for impression in &tables.impressions {
        let campaign_status = status[impression.campaign_id.as_str()];
        assert!(!matches!(
            campaign_status,
            CampaignStatus::Draft | CampaignStatus::Paused
        ));
    }
}

#[test]
fn test_ids_unique_and_increasing() {
    let tables = generate(small_config());

    let sequences: Vec<u64> = tables
        .impressions
        .iter()
        .map(|i| ids::parse_sequence(&i.impression_id, ids::IMPRESSION_PREFIX).unwrap())
        .collect();
    assert!(sequences.windows(2).all(|w| w[0] < w[1]));

    let sequences: Vec<u64> = tables
        .clicks
        .iter()
        .map(|c| ids::parse_sequence(&c.click_id, ids::CLICK_PREFIX).unwrap())
        .collect();
    assert!(sequences.windows(2).all(|w| w[0] < w[1]));

    let sequences: Vec<u64> = tables
        .conversions
        .iter()
        .map(|c| ids::parse_sequence(&c.conversion_id, ids::CONVERSION_PREFIX).unwrap())
        .collect();
    assert!(sequences.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_partition_fields_match_timestamps() {
    let tables = generate(small_config());

    for impression in &tables.impressions {
        assert_eq!(
            impression.date_key,
            impression.timestamp.format("%Y-%m-%d").to_string()
        );
        assert_eq!(
            impression.hour,
            impression.timestamp.format("%H").to_string().parse::<u32>().unwrap()
        );
    }
    for conversion in &tables.conversions {
        assert_eq!(
            conversion.date_key,
            conversion.timestamp.format("%Y-%m-%d").to_string()
        );
        assert!(conversion.revenue_usd >= 0.0);
    }
}
