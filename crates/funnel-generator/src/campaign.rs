//! Campaign generation.

use crate::error::GeneratorError;
use crate::generators::timestamp::{date_between, timestamp_between};
use crate::generators::{amount, pick, text};
use crate::seed::{entity_rng, Stage};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use funnel_core::{
    ids, AdFormat, Campaign, CampaignStatus, Channel, FunnelConfig, GeoRegion, ModelError, Record,
};
use rand::Rng;

/// Shortest and longest campaign run, in days.
pub const MIN_DURATION_DAYS: i64 = 7;
pub const MAX_DURATION_DAYS: i64 = 90;

/// Fixed inputs of one campaign; everything else is drawn.
pub(crate) struct CampaignSeed<'a> {
    pub id: String,
    pub name_prefix: &'a str,
    pub start_date: NaiveDate,
    /// Drawn from the week before the start when absent
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Draw the attributes of one campaign.
pub(crate) fn draw_campaign<R: Rng + ?Sized>(
    rng: &mut R,
    seed: CampaignSeed<'_>,
) -> Result<Campaign, ModelError> {
    let end_date =
        seed.start_date + Duration::days(rng.gen_range(MIN_DURATION_DAYS..=MAX_DURATION_DAYS));
    let campaign_name = format!("{}{}", seed.name_prefix, text::campaign_name(rng));

    let channel = pick(rng, Channel::ALL);
    let ad_format = pick(rng, AdFormat::ALL);
    let budget_usd = amount(rng, 1_000.0, 500_000.0, 2);
    let daily_budget_usd = amount(rng, 100.0, 10_000.0, 2);
    let target_cpa_usd = amount(rng, 5.0, 100.0, 2);
    let target_region = pick(rng, GeoRegion::ALL);
    let status = pick(rng, CampaignStatus::ALL);
    let advertiser_name = text::advertiser_name(rng);
    let advertiser_industry = text::advertiser_industry(rng);

    let created_at = match seed.created_at {
        Some(created_at) => created_at,
        None => {
            let starts_at = seed.start_date.and_time(chrono::NaiveTime::MIN).and_utc();
            timestamp_between(rng, starts_at - Duration::days(7), starts_at)
        }
    };

    let campaign = Campaign {
        campaign_id: seed.id,
        campaign_name,
        channel,
        ad_format,
        budget_usd,
        daily_budget_usd,
        target_cpa_usd,
        target_region,
        status,
        start_date: seed.start_date,
        end_date,
        advertiser_name,
        advertiser_industry,
        created_at,
        updated_at: seed.updated_at,
    };
    campaign.validate()?;
    Ok(campaign)
}

/// Produces the root campaign population.
///
/// Campaign `i` (0-based) gets id `CMP-{i+1:06}` and its own RNG, so any
/// campaign can be regenerated in isolation.
pub struct CampaignGenerator<'a> {
    config: &'a FunnelConfig,
}

impl<'a> CampaignGenerator<'a> {
    pub fn new(config: &'a FunnelConfig) -> Self {
        Self { config }
    }

    /// Generate `num_campaigns` campaigns starting within the window.
    ///
    /// Starts are drawn from `[window start, window end − 30 days]` so every
    /// campaign has room to run before the window closes.
    pub fn generate(&self) -> Result<Vec<Campaign>, GeneratorError> {
        let first_start = self.config.start.date_naive();
        let last_start = self.config.last_campaign_start().date_naive();
        let updated_at = self.config.as_of();

        (0..self.config.num_campaigns)
            .map(|index| -> Result<Campaign, GeneratorError> {
                let mut rng = entity_rng(self.config.seed, Stage::Campaign, index);
                let start_date = date_between(&mut rng, first_start, last_start);
                let campaign = draw_campaign(
                    &mut rng,
                    CampaignSeed {
                        id: ids::campaign_id(index + 1),
                        name_prefix: "",
                        start_date,
                        created_at: None,
                        updated_at,
                    },
                )?;
                Ok(campaign)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config() -> FunnelConfig {
        let mut config = FunnelConfig::ending_at(Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap());
        config.num_campaigns = 200;
        config
    }

    #[test]
    fn test_sequential_ids() {
        let config = config();
        let campaigns = CampaignGenerator::new(&config).generate().unwrap();

        assert_eq!(campaigns.len(), 200);
        assert_eq!(campaigns[0].campaign_id, "CMP-000001");
        assert_eq!(campaigns[199].campaign_id, "CMP-000200");
    }

    #[test]
    fn test_dates_within_window() {
        let config = config();
        let campaigns = CampaignGenerator::new(&config).generate().unwrap();
        let first_start = config.start.date_naive();
        let last_start = config.last_campaign_start().date_naive();

        for campaign in &campaigns {
            assert!(campaign.start_date >= first_start);
            assert!(campaign.start_date <= last_start);
            let duration = (campaign.end_date - campaign.start_date).num_days();
            assert!((MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(&duration));
            assert!(campaign.created_at <= campaign.starts_at());
            assert!(campaign.created_at >= campaign.starts_at() - Duration::days(7));
            assert_eq!(campaign.updated_at, config.end);
        }
    }

    #[test]
    fn test_attribute_ranges() {
        let config = config();
        let campaigns = CampaignGenerator::new(&config).generate().unwrap();

        for campaign in &campaigns {
            assert!((1_000.0..=500_000.0).contains(&campaign.budget_usd));
            assert!((100.0..=10_000.0).contains(&campaign.daily_budget_usd));
            assert!((5.0..=100.0).contains(&campaign.target_cpa_usd));
        }

        let statuses: std::collections::HashSet<_> = campaigns.iter().map(|c| c.status).collect();
        assert_eq!(statuses.len(), CampaignStatus::ALL.len());
    }

    #[test]
    fn test_zero_campaigns() {
        let mut config = config();
        config.num_campaigns = 0;
        assert!(CampaignGenerator::new(&config).generate().unwrap().is_empty());
    }

    #[test]
    fn test_deterministic_generation() {
        let config = config();
        let a = CampaignGenerator::new(&config).generate().unwrap();
        let b = CampaignGenerator::new(&config).generate().unwrap();
        assert_eq!(a, b);

        let mut other = config.clone();
        other.seed = 43;
        let c = CampaignGenerator::new(&other).generate().unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_prefix_is_stable() {
        // Generating fewer campaigns must not change the ones that remain.
        let config = config();
        let all = CampaignGenerator::new(&config).generate().unwrap();

        let mut fewer = config.clone();
        fewer.num_campaigns = 10;
        let some = CampaignGenerator::new(&fewer).generate().unwrap();
        assert_eq!(&all[..10], &some[..]);
    }
}
