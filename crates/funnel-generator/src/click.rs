//! Click generation.

use crate::error::GeneratorError;
use crate::generators::bimodal::time_on_site_seconds;
use crate::generators::sampling::sample_subset;
use crate::generators::timestamp::seconds_after;
use crate::generators::{amount, text};
use crate::seed::{entity_rng, Stage};
use funnel_core::integrity::MAX_CLICK_OFFSET_SECONDS;
use funnel_core::model::date_key;
use funnel_core::{ids, Click, FunnelConfig, Impression, ModelError, Record};
use rand::Rng;
use rayon::prelude::*;

/// Probability that a click carries a referrer.
pub const REFERRER_SHARE: f64 = 0.7;

/// Probability that a click is a bounce.
pub const BOUNCE_SHARE: f64 = 0.4;

/// Turns a subset of impressions into clicks.
///
/// Exactly `round(click_rate × impressions)` distinct impressions are
/// selected, and each yields one click 1 to 30 seconds after it. Clicks keep
/// the order of the impressions they came from.
pub struct ClickGenerator<'a> {
    config: &'a FunnelConfig,
}

impl<'a> ClickGenerator<'a> {
    pub fn new(config: &'a FunnelConfig) -> Self {
        Self { config }
    }

    pub fn generate(&self, impressions: &[Impression]) -> Result<Vec<Click>, GeneratorError> {
        let mut selection_rng = entity_rng(self.config.seed, Stage::ClickSample, 0);
        let selected = sample_subset(&mut selection_rng, impressions.len(), self.config.click_rate);
        tracing::debug!(
            "Selected {} of {} impressions for clicks",
            selected.len(),
            impressions.len()
        );

        let clicks = selected
            .par_iter()
            .enumerate()
            .map(|(position, &index)| {
                let mut rng = entity_rng(self.config.seed, Stage::Click, index as u64);
                draw_click(&mut rng, &impressions[index], position as u64 + 1)
            })
            .collect::<Result<Vec<_>, ModelError>>()?;
        Ok(clicks)
    }
}

fn draw_click<R: Rng + ?Sized>(
    rng: &mut R,
    impression: &Impression,
    sequence: u64,
) -> Result<Click, ModelError> {
    let timestamp = seconds_after(rng, impression.timestamp, 1, MAX_CLICK_OFFSET_SECONDS);
    let landing_page_url = text::url(rng);
    let referrer_url = if rng.gen_bool(REFERRER_SHARE) {
        Some(text::url(rng))
    } else {
        None
    };

    let click = Click {
        click_id: ids::click_id(sequence),
        impression_id: impression.impression_id.clone(),
        campaign_id: impression.campaign_id.clone(),
        timestamp,
        date_key: date_key(&timestamp),
        device_type: impression.device_type,
        geo_region: impression.geo_region,
        geo_country: impression.geo_country.clone(),
        landing_page_url,
        referrer_url,
        time_on_site_seconds: time_on_site_seconds().sample(rng),
        pages_viewed: rng.gen_range(1..=15),
        bounce: rng.gen_bool(BOUNCE_SHARE),
        cost_usd: amount(rng, 0.10, 2.00, 4),
    };
    click.validate()?;
    Ok(click)
}
