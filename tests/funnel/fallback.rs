//! Conversions whose campaign is missing from the CPA lookup.

use crate::common::{generate, small_config};
use funnel_generator::{ConversionGenerator, CpaLookup, FALLBACK_TARGET_CPA};

#[test]
fn test_missing_campaign_priced_at_fallback_cpa() {
    let config = small_config();
    let tables = generate(config.clone());

    // Drop the campaign behind the first click from the lookup.
    let removed = tables.clicks[0].campaign_id.clone();
    let remaining: Vec<_> = tables
        .campaigns
        .iter()
        .filter(|c| c.campaign_id != removed)
        .cloned()
        .collect();
    let lookup = CpaLookup::new(&remaining);

    let conversions = ConversionGenerator::new(&config)
        .generate_with_lookup(&tables.clicks, &lookup)
        .unwrap();
    assert_eq!(conversions.len(), tables.conversions.len());

    let affected: Vec<_> = conversions
        .iter()
        .filter(|c| c.campaign_id == removed)
        .collect();
    for conversion in &affected {
        assert!(conversion.revenue_usd >= FALLBACK_TARGET_CPA * 0.5 - 0.01);
        assert!(conversion.revenue_usd <= FALLBACK_TARGET_CPA * 5.0 + 0.01);
    }

    // Every other conversion is priced exactly as in the full run.
    for (with_lookup, full) in conversions.iter().zip(&tables.conversions) {
        assert_eq!(with_lookup.conversion_id, full.conversion_id);
        if with_lookup.campaign_id != removed {
            assert_eq!(with_lookup.revenue_usd, full.revenue_usd);
        }
    }
}

#[test]
fn test_empty_lookup_never_fails() {
    let config = small_config();
    let tables = generate(config.clone());

    let conversions = ConversionGenerator::new(&config)
        .generate(&tables.clicks, &[])
        .unwrap();
    assert!(!conversions.is_empty());
    assert!(conversions.iter().all(|c| c.revenue_usd > 0.0));
}
