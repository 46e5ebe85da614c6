//! The finished dataset.

use crate::model::{Campaign, Click, Conversion, Impression};
use serde::Serialize;

/// The four funnel tables of one run, in generation order.
///
/// A value of this type is only ever produced whole: either every stage
/// completed or no tables exist at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunnelTables {
    pub campaigns: Vec<Campaign>,
    pub impressions: Vec<Impression>,
    pub clicks: Vec<Click>,
    pub conversions: Vec<Conversion>,
}

/// Headline figures of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FunnelSummary {
    pub campaigns: usize,
    pub impressions: usize,
    pub clicks: usize,
    pub conversions: usize,
    /// clicks / impressions
    pub click_rate: f64,
    /// conversions / clicks
    pub conversion_rate: f64,
    pub total_revenue_usd: f64,
    /// Impression cost plus click cost
    pub total_spend_usd: f64,
    /// Revenue over spend; 0 when nothing was spent
    pub roas: f64,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

impl FunnelTables {
    /// Compute row counts, realized rates and money totals.
    pub fn summary(&self) -> FunnelSummary {
        let total_revenue_usd: f64 = self.conversions.iter().map(|c| c.revenue_usd).sum();
        let total_spend_usd: f64 = self.impressions.iter().map(|i| i.cost_usd).sum::<f64>()
            + self.clicks.iter().map(|c| c.cost_usd).sum::<f64>();

        FunnelSummary {
            campaigns: self.campaigns.len(),
            impressions: self.impressions.len(),
            clicks: self.clicks.len(),
            conversions: self.conversions.len(),
            click_rate: ratio(self.clicks.len() as f64, self.impressions.len() as f64),
            conversion_rate: ratio(self.conversions.len() as f64, self.clicks.len() as f64),
            total_revenue_usd,
            total_spend_usd,
            roas: ratio(total_revenue_usd, total_spend_usd),
        }
    }

    /// Total number of rows across all tables.
    pub fn total_rows(&self) -> usize {
        self.campaigns.len() + self.impressions.len() + self.clicks.len() + self.conversions.len()
    }
}
