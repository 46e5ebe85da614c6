//! Incremental campaign append.
//!
//! Adds campaigns with `CMP-NEW-####` identifiers to an existing campaign
//! table without touching the rows already there. The event tables are not
//! extended.

use crate::campaign::{draw_campaign, CampaignSeed};
use crate::error::GeneratorError;
use crate::generators::timestamp::date_between;
use crate::seed::{entity_rng, Stage};
use chrono::{DateTime, Duration, Utc};
use funnel_core::{ids, Campaign};
use std::collections::HashSet;

/// Sequence of the first appended campaign when none exist yet.
pub const FIRST_NEW_SEQUENCE: u64 = 1000;

/// Number of campaigns appended by default.
pub const DEFAULT_APPEND_COUNT: u64 = 10;

/// Appended campaigns start within this many days before the reference date.
pub const APPEND_START_LOOKBACK_DAYS: i64 = 30;

/// Name prefix that marks appended campaigns.
pub const NEW_CAMPAIGN_NAME_PREFIX: &str = "NEW: ";

/// Generates campaigns to append to an existing table.
#[derive(Debug, Clone)]
pub struct CampaignAppender {
    seed: u64,
    count: u64,
    first_sequence: Option<u64>,
}

impl CampaignAppender {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            count: DEFAULT_APPEND_COUNT,
            first_sequence: None,
        }
    }

    /// Set the number of campaigns to append.
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    /// Start numbering at `sequence` instead of after the existing ones.
    pub fn with_first_sequence(mut self, sequence: u64) -> Self {
        self.first_sequence = Some(sequence);
        self
    }

    /// First sequence number to use given the existing campaigns.
    ///
    /// One past the highest `CMP-NEW-` sequence present, or
    /// [`FIRST_NEW_SEQUENCE`] when there is none, so repeated appends never
    /// collide.
    pub fn next_sequence(&self, existing: &[Campaign]) -> u64 {
        if let Some(sequence) = self.first_sequence {
            return sequence;
        }
        existing
            .iter()
            .filter_map(|c| ids::parse_sequence(&c.campaign_id, ids::NEW_CAMPAIGN_PREFIX))
            .max()
            .map_or(FIRST_NEW_SEQUENCE, |max| max + 1)
    }

    /// Generate the campaigns to append.
    ///
    /// `reference` plays the role of "now": starts fall within the
    /// preceding 30 days and both `created_at` and `updated_at` are set to it.
    /// Each campaign's RNG is keyed by its sequence number, so re-running an
    /// append against the same table reproduces the same rows.
    pub fn generate(
        &self,
        existing: &[Campaign],
        reference: DateTime<Utc>,
    ) -> Result<Vec<Campaign>, GeneratorError> {
        let first_sequence = self.next_sequence(existing);
        let taken: HashSet<&str> = existing.iter().map(|c| c.campaign_id.as_str()).collect();

        let last_start = reference.date_naive();
        let first_start = last_start - Duration::days(APPEND_START_LOOKBACK_DAYS);

        let mut campaigns = Vec::with_capacity(self.count as usize);
        for sequence in first_sequence..first_sequence + self.count {
            let id = ids::new_campaign_id(sequence);
            if taken.contains(id.as_str()) {
                return Err(GeneratorError::DuplicateCampaignId(id));
            }

            let mut rng = entity_rng(self.seed, Stage::Append, sequence);
            let start_date = date_between(&mut rng, first_start, last_start);
            campaigns.push(draw_campaign(
                &mut rng,
                CampaignSeed {
                    id,
                    name_prefix: NEW_CAMPAIGN_NAME_PREFIX,
                    start_date,
                    created_at: Some(reference),
                    updated_at: reference,
                },
            )?);
        }

        tracing::info!(
            "Generated {} campaigns to append, {} .. {}",
            campaigns.len(),
            ids::new_campaign_id(first_sequence),
            ids::new_campaign_id(first_sequence + self.count.saturating_sub(1))
        );
        Ok(campaigns)
    }
}
