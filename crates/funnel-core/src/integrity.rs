//! Dataset-wide invariant checks.
//!
//! [`check_integrity`] verifies the cross-table guarantees of a finished
//! dataset: referential integrity, temporal ordering, the serving-status
//! filter and identifier uniqueness/monotonicity. It stops at the first
//! violation.

use crate::ids;
use crate::model::{Campaign, CampaignStatus, Click, Impression, ModelError, Record};
use crate::tables::FunnelTables;
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, HashSet};

/// Largest gap between an impression and its click.
pub const MAX_CLICK_OFFSET_SECONDS: i64 = 30;

/// Error type for integrity violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntegrityError {
    /// A record failed its own field checks
    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] ModelError),

    /// Identifier used twice within a table
    #[error("Duplicate {table} id: {id}")]
    DuplicateId { table: &'static str, id: String },

    /// Identifier sequence not increasing in table order
    #[error("{table} id {id} follows {previous}; sequence numbers must increase")]
    NonMonotonicId {
        table: &'static str,
        previous: String,
        id: String,
    },

    /// Foreign key with no target row
    #[error("{table} {id} references missing {column} {target}")]
    DanglingReference {
        table: &'static str,
        id: String,
        column: &'static str,
        target: String,
    },

    /// Impression for a campaign that never served
    #[error("Impression {id} belongs to campaign {campaign_id} with status {status}")]
    IneligibleCampaign {
        id: String,
        campaign_id: String,
        status: CampaignStatus,
    },

    /// Impression outside its campaign's active window
    #[error("Impression {id} at {timestamp} is outside campaign {campaign_id}'s window")]
    OutsideCampaignWindow {
        id: String,
        campaign_id: String,
        timestamp: DateTime<Utc>,
    },

    /// Child event not strictly after its parent
    #[error("{table} {id} at {timestamp} is not after its parent at {parent_timestamp}")]
    TimestampOrder {
        table: &'static str,
        id: String,
        timestamp: DateTime<Utc>,
        parent_timestamp: DateTime<Utc>,
    },

    /// Click more than 30 seconds after its impression
    #[error("Click {id} is {seconds}s after its impression")]
    ClickOffset { id: String, seconds: i64 },

    /// Copied field differs from the parent row
    #[error("{table} {id} has {column} that differs from its parent row")]
    DenormalizedMismatch {
        table: &'static str,
        id: String,
        column: &'static str,
    },
}

/// Row counts covered by a successful check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    pub campaigns: usize,
    pub impressions: usize,
    pub clicks: usize,
    pub conversions: usize,
}

/// Validate every record and check ids are unique and increasing.
///
/// `sequence_of` maps an id to the sequence it belongs to and its number;
/// monotonicity is checked per sequence.
fn check_ids<'a, T, F>(rows: &'a [T], sequence_of: F) -> Result<HashMap<&'a str, usize>, IntegrityError>
where
    T: Record,
    F: Fn(&str) -> Option<(&'static str, u64)>,
{
    let table = T::definition().name;
    let mut index = HashMap::with_capacity(rows.len());
    let mut last: HashMap<&'static str, (u64, &str)> = HashMap::new();

    for (position, row) in rows.iter().enumerate() {
        row.validate()?;
        let id = row.id();
        if index.insert(id, position).is_some() {
            return Err(IntegrityError::DuplicateId {
                table,
                id: id.to_string(),
            });
        }
        if let Some((sequence, number)) = sequence_of(id) {
            if let Some((previous_number, previous)) = last.get(sequence) {
                if number <= *previous_number {
                    return Err(IntegrityError::NonMonotonicId {
                        table,
                        previous: previous.to_string(),
                        id: id.to_string(),
                    });
                }
            }
            last.insert(sequence, (number, id));
        }
    }

    Ok(index)
}

fn campaign_sequence(id: &str) -> Option<(&'static str, u64)> {
    ids::parse_sequence(id, ids::NEW_CAMPAIGN_PREFIX)
        .map(|n| (ids::NEW_CAMPAIGN_PREFIX, n))
        .or_else(|| ids::parse_sequence(id, ids::CAMPAIGN_PREFIX).map(|n| (ids::CAMPAIGN_PREFIX, n)))
}

fn sequence_with(prefix: &'static str) -> impl Fn(&str) -> Option<(&'static str, u64)> {
    move |id: &str| ids::parse_sequence(id, prefix).map(|n| (prefix, n))
}

fn check_impression(
    impression: &Impression,
    campaigns: &[Campaign],
    campaign_index: &HashMap<&str, usize>,
) -> Result<(), IntegrityError> {
    let campaign = campaign_index
        .get(impression.campaign_id.as_str())
        .map(|&i| &campaigns[i])
        .ok_or_else(|| IntegrityError::DanglingReference {
            table: "impression",
            id: impression.impression_id.clone(),
            column: "campaign_id",
            target: impression.campaign_id.clone(),
        })?;

    if !campaign.status.has_served() {
        return Err(IntegrityError::IneligibleCampaign {
            id: impression.impression_id.clone(),
            campaign_id: campaign.campaign_id.clone(),
            status: campaign.status,
        });
    }

    if impression.timestamp < campaign.starts_at() || impression.timestamp > campaign.ends_at() {
        return Err(IntegrityError::OutsideCampaignWindow {
            id: impression.impression_id.clone(),
            campaign_id: campaign.campaign_id.clone(),
            timestamp: impression.timestamp,
        });
    }

    Ok(())
}

fn check_click(click: &Click, impression: &Impression) -> Result<(), IntegrityError> {
    let mismatch = |column| IntegrityError::DenormalizedMismatch {
        table: "click",
        id: click.click_id.clone(),
        column,
    };
    if click.campaign_id != impression.campaign_id {
        return Err(mismatch("campaign_id"));
    }
    if click.device_type != impression.device_type {
        return Err(mismatch("device_type"));
    }
    if click.geo_region != impression.geo_region {
        return Err(mismatch("geo_region"));
    }
    if click.geo_country != impression.geo_country {
        return Err(mismatch("geo_country"));
    }

    if click.timestamp <= impression.timestamp {
        return Err(IntegrityError::TimestampOrder {
            table: "click",
            id: click.click_id.clone(),
            timestamp: click.timestamp,
            parent_timestamp: impression.timestamp,
        });
    }
    if click.timestamp - impression.timestamp > Duration::seconds(MAX_CLICK_OFFSET_SECONDS) {
        return Err(IntegrityError::ClickOffset {
            id: click.click_id.clone(),
            seconds: (click.timestamp - impression.timestamp).num_seconds(),
        });
    }

    Ok(())
}

/// Check every cross-table invariant of a finished dataset.
pub fn check_integrity(tables: &FunnelTables) -> Result<IntegrityReport, IntegrityError> {
    let campaign_index = check_ids(&tables.campaigns, campaign_sequence)?;
    let impression_index = check_ids(&tables.impressions, sequence_with(ids::IMPRESSION_PREFIX))?;
    let click_index = check_ids(&tables.clicks, sequence_with(ids::CLICK_PREFIX))?;
    check_ids(&tables.conversions, sequence_with(ids::CONVERSION_PREFIX))?;

    for impression in &tables.impressions {
        check_impression(impression, &tables.campaigns, &campaign_index)?;
    }

    let mut clicked = HashSet::with_capacity(tables.clicks.len());
    for click in &tables.clicks {
        let impression = impression_index
            .get(click.impression_id.as_str())
            .map(|&i| &tables.impressions[i])
            .ok_or_else(|| IntegrityError::DanglingReference {
                table: "click",
                id: click.click_id.clone(),
                column: "impression_id",
                target: click.impression_id.clone(),
            })?;
        if !clicked.insert(click.impression_id.as_str()) {
            return Err(IntegrityError::DuplicateId {
                table: "click.impression_id",
                id: click.impression_id.clone(),
            });
        }
        check_click(click, impression)?;
    }

    let mut converted = HashSet::with_capacity(tables.conversions.len());
    for conversion in &tables.conversions {
        let click = click_index
            .get(conversion.click_id.as_str())
            .map(|&i| &tables.clicks[i])
            .ok_or_else(|| IntegrityError::DanglingReference {
                table: "conversion",
                id: conversion.conversion_id.clone(),
                column: "click_id",
                target: conversion.click_id.clone(),
            })?;
        if !converted.insert(conversion.click_id.as_str()) {
            return Err(IntegrityError::DuplicateId {
                table: "conversion.click_id",
                id: conversion.click_id.clone(),
            });
        }
        let mismatch = |column| IntegrityError::DenormalizedMismatch {
            table: "conversion",
            id: conversion.conversion_id.clone(),
            column,
        };
        if conversion.impression_id != click.impression_id {
            return Err(mismatch("impression_id"));
        }
        if conversion.campaign_id != click.campaign_id {
            return Err(mismatch("campaign_id"));
        }
        if conversion.timestamp <= click.timestamp {
            return Err(IntegrityError::TimestampOrder {
                table: "conversion",
                id: conversion.conversion_id.clone(),
                timestamp: conversion.timestamp,
                parent_timestamp: click.timestamp,
            });
        }
    }

    Ok(IntegrityReport {
        campaigns: tables.campaigns.len(),
        impressions: tables.impressions.len(),
        clicks: tables.clicks.len(),
        conversions: tables.conversions.len(),
    })
}
