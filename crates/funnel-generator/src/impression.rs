//! Impression generation.

use crate::error::GeneratorError;
use crate::generators::timestamp::timestamp_between;
use crate::generators::{amount, pick, text};
use crate::seed::{entity_rng, Stage};
use chrono::{DateTime, Timelike, Utc};
use funnel_core::model::date_key;
use funnel_core::{
    ids, AdPosition, Browser, Campaign, DeviceType, FunnelConfig, GeoRegion, Impression,
    ModelError, OperatingSystem, Record,
};
use rand::Rng;
use rayon::prelude::*;

/// Probability that an impression lands in the campaign's target region.
pub const ON_TARGET_SHARE: f64 = 0.7;

/// Probability that an impression is viewable.
pub const VIEWABLE_SHARE: f64 = 0.8;

/// Fans each serving campaign out into impression events.
///
/// Only `active` and `completed` campaigns receive impressions. Each serving
/// campaign draws its count and rows from an RNG keyed by its position in the
/// campaign table; identifiers are assigned run-wide in campaign order.
pub struct ImpressionGenerator<'a> {
    config: &'a FunnelConfig,
}

impl<'a> ImpressionGenerator<'a> {
    pub fn new(config: &'a FunnelConfig) -> Self {
        Self { config }
    }

    /// Number of impressions for one campaign, uniform in `[M/2, 2M]`.
    fn impression_count<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        let average = self.config.impressions_per_campaign;
        rng.gen_range(average / 2..=average.saturating_mul(2))
    }

    /// Interval impressions of `campaign` may fall in: its own run, cut off
    /// at the end of the generation window.
    pub fn serving_window(&self, campaign: &Campaign) -> (DateTime<Utc>, DateTime<Utc>) {
        (campaign.starts_at(), campaign.ends_at().min(self.config.end))
    }

    pub fn generate(&self, campaigns: &[Campaign]) -> Result<Vec<Impression>, GeneratorError> {
        let serving: Vec<(u64, &Campaign)> = campaigns
            .iter()
            .enumerate()
            .filter(|(_, campaign)| campaign.status.has_served())
            .map(|(index, campaign)| (index as u64, campaign))
            .collect();

        // Counts first, so every campaign knows its first sequence number
        // before the rows are drawn in parallel.
        let mut next_sequence = 1u64;
        let mut first_sequences = Vec::with_capacity(serving.len());
        for (index, _) in &serving {
            let mut rng = entity_rng(self.config.seed, Stage::Impression, *index);
            first_sequences.push(next_sequence);
            next_sequence += self.impression_count(&mut rng);
        }

        let batches: Vec<Vec<Impression>> = serving
            .par_iter()
            .zip(first_sequences.par_iter())
            .map(|(&(index, campaign), &first_sequence)| {
                let mut rng = entity_rng(self.config.seed, Stage::Impression, index);
                let count = self.impression_count(&mut rng);
                (0..count)
                    .map(|offset| self.draw_impression(&mut rng, campaign, first_sequence + offset))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<_, ModelError>>()?;

        let impressions: Vec<Impression> = batches.into_iter().flatten().collect();
        tracing::debug!(
            "{} serving campaigns of {} produced {} impressions",
            serving.len(),
            campaigns.len(),
            impressions.len()
        );
        Ok(impressions)
    }

    fn draw_impression<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        campaign: &Campaign,
        sequence: u64,
    ) -> Result<Impression, ModelError> {
        let (window_start, window_end) = self.serving_window(campaign);
        let timestamp = timestamp_between(rng, window_start, window_end);

        let device_type = pick(rng, DeviceType::ALL);
        let geo_region = if rng.gen_bool(ON_TARGET_SHARE) {
            campaign.target_region
        } else {
            pick(rng, GeoRegion::ALL)
        };

        let impression = Impression {
            impression_id: ids::impression_id(sequence),
            campaign_id: campaign.campaign_id.clone(),
            timestamp,
            date_key: date_key(&timestamp),
            hour: timestamp.hour(),
            device_type,
            geo_region,
            geo_country: text::country_code(rng),
            geo_city: text::city(rng),
            browser: pick(rng, Browser::ALL),
            os: pick(rng, OperatingSystem::ALL),
            ad_position: pick(rng, AdPosition::ALL),
            viewable: rng.gen_bool(VIEWABLE_SHARE),
            cost_usd: amount(rng, 0.001, 0.05, 4),
            publisher_id: format!("PUB-{:04}", rng.gen_range(1..=500)),
            placement_id: format!("PLC-{:05}", rng.gen_range(1..=2000)),
        };
        impression.validate()?;
        Ok(impression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::CampaignGenerator;
    use chrono::TimeZone;
    use funnel_core::CampaignStatus;
    use std::collections::HashMap;

    fn config() -> FunnelConfig {
        let mut config =
            FunnelConfig::ending_at(Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap());
        config.num_campaigns = 40;
        config.impressions_per_campaign = 200;
        config
    }

    fn generate(config: &FunnelConfig) -> (Vec<Campaign>, Vec<Impression>) {
        let campaigns = CampaignGenerator::new(config).generate().unwrap();
        let impressions = ImpressionGenerator::new(config)
            .generate(&campaigns)
            .unwrap();
        (campaigns, impressions)
    }

    #[test]
    fn test_only_serving_campaigns() {
        let config = config();
        let (campaigns, impressions) = generate(&config);
        let status: HashMap<_, _> = campaigns
            .iter()
            .map(|c| (c.campaign_id.as_str(), c.status))
            .collect();

        assert!(!impressions.is_empty());
        for impression in &impressions {
            let campaign_status = status[impression.campaign_id.as_str()];
            assert!(campaign_status.has_served());
        }
    }

    #[test]
    fn test_counts_per_campaign() {
        let config = config();
        let (campaigns, impressions) = generate(&config);

        let mut counts: HashMap<&str, u64> = HashMap::new();
        for impression in &impressions {
            *counts.entry(impression.campaign_id.as_str()).or_default() += 1;
        }
        for campaign in campaigns.iter().filter(|c| c.status.has_served()) {
            let count = counts.get(campaign.campaign_id.as_str()).copied().unwrap_or(0);
            assert!((100..=400).contains(&count), "{count} impressions");
        }
    }

    #[test]
    fn test_sequential_ids_across_campaigns() {
        let config = config();
        let (_, impressions) = generate(&config);

        for (i, impression) in impressions.iter().enumerate() {
            assert_eq!(impression.impression_id, ids::impression_id(i as u64 + 1));
        }
    }

    #[test]
    fn test_timestamps_within_serving_window() {
        let mut config = config();
        // End the window mid-way so some campaigns get clipped.
        config.end = config.start + chrono::Duration::days(45);
        let (campaigns, impressions) = generate(&config);
        let by_id: HashMap<_, _> = campaigns
            .iter()
            .map(|c| (c.campaign_id.as_str(), c))
            .collect();

        for impression in &impressions {
            let campaign = by_id[impression.campaign_id.as_str()];
            assert!(impression.timestamp >= campaign.starts_at());
            assert!(impression.timestamp <= campaign.ends_at());
            assert!(impression.timestamp <= config.end);
            assert_eq!(impression.hour, impression.timestamp.hour());
            assert_eq!(impression.date_key, date_key(&impression.timestamp));
        }
    }

    #[test]
    fn test_attribute_ranges() {
        let config = config();
        let (_, impressions) = generate(&config);

        for impression in &impressions {
            assert!((0.001..=0.05).contains(&impression.cost_usd));
            assert!(impression.publisher_id.starts_with("PUB-"));
            assert_eq!(impression.placement_id.len(), "PLC-00001".len());
        }

        let viewable = impressions.iter().filter(|i| i.viewable).count() as f64;
        let share = viewable / impressions.len() as f64;
        assert!((share - VIEWABLE_SHARE).abs() < 0.05, "viewable share {share}");
    }

    #[test]
    fn test_geo_targeting_leakage() {
        let config = config();
        let (campaigns, impressions) = generate(&config);
        let target: HashMap<_, _> = campaigns
            .iter()
            .map(|c| (c.campaign_id.as_str(), c.target_region))
            .collect();

        let on_target = impressions
            .iter()
            .filter(|i| i.geo_region == target[i.campaign_id.as_str()])
            .count() as f64;
        let share = on_target / impressions.len() as f64;
        // 0.7 directly plus 0.3 × 1/8 by chance
        let expected = ON_TARGET_SHARE + (1.0 - ON_TARGET_SHARE) / GeoRegion::ALL.len() as f64;
        assert!((share - expected).abs() < 0.05, "on-target share {share}");
    }

    #[test]
    fn test_no_serving_campaigns() {
        let config = config();
        let mut campaigns = CampaignGenerator::new(&config).generate().unwrap();
        for campaign in &mut campaigns {
            campaign.status = CampaignStatus::Paused;
        }
        let impressions = ImpressionGenerator::new(&config)
            .generate(&campaigns)
            .unwrap();
        assert!(impressions.is_empty());
    }

    #[test]
    fn test_deterministic_generation() {
        let config = config();
        let (_, a) = generate(&config);
        let (_, b) = generate(&config);
        assert_eq!(a, b);
    }
}
