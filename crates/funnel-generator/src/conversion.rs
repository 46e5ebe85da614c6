//! Conversion generation.

use crate::error::GeneratorError;
use crate::generators::bimodal::conversion_delay_minutes;
use crate::generators::sampling::sample_subset;
use crate::generators::{pick, round_to};
use crate::seed::{entity_rng, Stage};
use chrono::Duration;
use funnel_core::model::date_key;
use funnel_core::{
    ids, AttributionModel, Campaign, Click, Conversion, ConversionType, FunnelConfig, ModelError,
    ProductCategory, Record,
};
use rand::Rng;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Target CPA used when a click's campaign is not in the lookup.
pub const FALLBACK_TARGET_CPA: f64 = 50.0;

/// Probability that a conversion comes from a new customer.
pub const NEW_CUSTOMER_SHARE: f64 = 0.4;

/// Revenue is the target CPA scaled by a factor from this range.
const REVENUE_MULTIPLIER: (f64, f64) = (0.5, 5.0);

/// Where a conversion's target CPA came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetCpa {
    Campaign(f64),
    Fallback,
}

impl TargetCpa {
    pub fn value(&self) -> f64 {
        match self {
            TargetCpa::Campaign(cpa) => *cpa,
            TargetCpa::Fallback => FALLBACK_TARGET_CPA,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, TargetCpa::Fallback)
    }
}

/// Campaign id to target CPA, built once per run.
#[derive(Debug, Default)]
pub struct CpaLookup<'a> {
    by_campaign: HashMap<&'a str, f64>,
}

impl<'a> CpaLookup<'a> {
    pub fn new(campaigns: &'a [Campaign]) -> Self {
        Self {
            by_campaign: campaigns
                .iter()
                .map(|c| (c.campaign_id.as_str(), c.target_cpa_usd))
                .collect(),
        }
    }

    pub fn get(&self, campaign_id: &str) -> TargetCpa {
        match self.by_campaign.get(campaign_id) {
            Some(cpa) => TargetCpa::Campaign(*cpa),
            None => TargetCpa::Fallback,
        }
    }

    pub fn len(&self) -> usize {
        self.by_campaign.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_campaign.is_empty()
    }
}

/// Turns a subset of clicks into conversions.
///
/// Revenue is anchored on the originating campaign's target CPA. A click
/// whose campaign is missing from the lookup still converts, priced at
/// [`FALLBACK_TARGET_CPA`]; such misses are counted and reported once per
/// run.
pub struct ConversionGenerator<'a> {
    config: &'a FunnelConfig,
}

impl<'a> ConversionGenerator<'a> {
    pub fn new(config: &'a FunnelConfig) -> Self {
        Self { config }
    }

    pub fn generate(
        &self,
        clicks: &[Click],
        campaigns: &[Campaign],
    ) -> Result<Vec<Conversion>, GeneratorError> {
        self.generate_with_lookup(clicks, &CpaLookup::new(campaigns))
    }

    pub fn generate_with_lookup(
        &self,
        clicks: &[Click],
        lookup: &CpaLookup<'_>,
    ) -> Result<Vec<Conversion>, GeneratorError> {
        let mut selection_rng = entity_rng(self.config.seed, Stage::ConversionSample, 0);
        let selected = sample_subset(&mut selection_rng, clicks.len(), self.config.conversion_rate);
        tracing::debug!(
            "Selected {} of {} clicks for conversions",
            selected.len(),
            clicks.len()
        );

        let fallbacks = AtomicUsize::new(0);
        let conversions = selected
            .par_iter()
            .enumerate()
            .map(|(position, &index)| {
                let click = &clicks[index];
                let target_cpa = lookup.get(&click.campaign_id);
                if target_cpa.is_fallback() {
                    fallbacks.fetch_add(1, Ordering::Relaxed);
                }
                let mut rng = entity_rng(self.config.seed, Stage::Conversion, index as u64);
                draw_conversion(&mut rng, click, target_cpa, position as u64 + 1)
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        let fallbacks = fallbacks.into_inner();
        if fallbacks > 0 {
            tracing::warn!(
                "{} conversions priced at fallback CPA {:.2}: campaign not found",
                fallbacks,
                FALLBACK_TARGET_CPA
            );
        }
        Ok(conversions)
    }
}

fn draw_conversion<R: Rng + ?Sized>(
    rng: &mut R,
    click: &Click,
    target_cpa: TargetCpa,
    sequence: u64,
) -> Result<Conversion, ModelError> {
    let delay = Duration::minutes(i64::from(conversion_delay_minutes().sample(rng)));
    let timestamp = click.timestamp + delay;
    let (low, high) = REVENUE_MULTIPLIER;
    let revenue_usd = round_to(target_cpa.value() * rng.gen_range(low..=high), 2);

    let conversion = Conversion {
        conversion_id: ids::conversion_id(sequence),
        click_id: click.click_id.clone(),
        impression_id: click.impression_id.clone(),
        campaign_id: click.campaign_id.clone(),
        timestamp,
        date_key: date_key(&timestamp),
        conversion_type: pick(rng, ConversionType::ALL),
        revenue_usd,
        quantity: rng.gen_range(1..=5),
        currency: "USD".to_string(),
        order_id: format!("ORD-{:08X}", rng.gen::<u32>()),
        product_category: pick(rng, ProductCategory::ALL),
        new_customer: rng.gen_bool(NEW_CUSTOMER_SHARE),
        device_type: click.device_type,
        geo_region: click.geo_region,
        attribution_model: pick(rng, AttributionModel::ALL),
    };
    conversion.validate()?;
    Ok(conversion)
}
