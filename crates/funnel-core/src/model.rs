//! Funnel record types.
//!
//! Records are plain immutable values. Categorical attributes are closed
//! enumerations whose serialized spelling is fixed by the downstream tables,
//! so every variant carries its exact wire string.

use crate::ids;
use crate::schema::{self, TableDefinition};
use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for record validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Identifier does not follow the table's format
    #[error("Invalid {table} identifier: '{id}'")]
    InvalidIdentifier { table: &'static str, id: String },

    /// Campaign end date is not after its start date
    #[error("Campaign {id} ends on {end} which is not after its start {start}")]
    InvalidDateRange {
        id: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// Monetary or count field below zero
    #[error("Field '{field}' of {id} must be non-negative, got {value}")]
    Negative {
        id: String,
        field: &'static str,
        value: f64,
    },

    /// A derived partition field disagrees with the record's timestamp
    #[error("Field '{field}' of {id} is '{actual}' but its timestamp implies '{expected}'")]
    DerivedFieldMismatch {
        id: String,
        field: &'static str,
        expected: String,
        actual: String,
    },

    /// Unknown categorical value
    #[error("Unknown {kind} value: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(ModelError::UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

string_enum! {
    /// Marketing channel a campaign runs on.
    Channel ("channel") {
        Display => "display",
        Search => "search",
        Social => "social",
        Video => "video",
        Native => "native",
        Email => "email",
        Affiliate => "affiliate",
    }
}

string_enum! {
    AdFormat ("ad_format") {
        Banner => "banner",
        Interstitial => "interstitial",
        VideoPreroll => "video_preroll",
        VideoMidroll => "video_midroll",
        NativeFeed => "native_feed",
        Carousel => "carousel",
    }
}

string_enum! {
    /// Geographic region, used both as a campaign target and an event location.
    GeoRegion ("geo_region") {
        UsEast => "US-EAST",
        UsWest => "US-WEST",
        UsCentral => "US-CENTRAL",
        Canada => "CANADA",
        Uk => "UK",
        EuWest => "EU-WEST",
        EuCentral => "EU-CENTRAL",
        Apac => "APAC",
    }
}

string_enum! {
    CampaignStatus ("status") {
        Active => "active",
        Paused => "paused",
        Completed => "completed",
        Draft => "draft",
    }
}

impl CampaignStatus {
    /// Whether a campaign in this status ever served impressions.
    ///
    /// Draft and paused campaigns never ran.
    pub fn has_served(&self) -> bool {
        matches!(self, CampaignStatus::Active | CampaignStatus::Completed)
    }
}

string_enum! {
    DeviceType ("device_type") {
        Desktop => "desktop",
        Mobile => "mobile",
        Tablet => "tablet",
        ConnectedTv => "connected_tv",
        Other => "other",
    }
}

string_enum! {
    Browser ("browser") {
        Chrome => "Chrome",
        Safari => "Safari",
        Firefox => "Firefox",
        Edge => "Edge",
        Other => "Other",
    }
}

string_enum! {
    OperatingSystem ("os") {
        Windows => "Windows",
        MacOs => "macOS",
        Ios => "iOS",
        Android => "Android",
        Linux => "Linux",
        Other => "Other",
    }
}

string_enum! {
    AdPosition ("ad_position") {
        AboveFold => "above_fold",
        BelowFold => "below_fold",
        Sidebar => "sidebar",
        InFeed => "in_feed",
    }
}

string_enum! {
    ConversionType ("conversion_type") {
        Purchase => "purchase",
        Signup => "signup",
        Download => "download",
        Subscription => "subscription",
        LeadForm => "lead_form",
    }
}

string_enum! {
    ProductCategory ("product_category") {
        Electronics => "Electronics",
        Clothing => "Clothing",
        Home => "Home",
        Sports => "Sports",
        Beauty => "Beauty",
    }
}

string_enum! {
    AttributionModel ("attribution_model") {
        LastClick => "last_click",
        FirstClick => "first_click",
        Linear => "linear",
        TimeDecay => "time_decay",
    }
}

/// Partition key for an event timestamp (`YYYY-MM-DD`).
pub fn date_key(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// Behaviour shared by the four table record types.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Column list and partition key of the record's table.
    fn definition() -> &'static TableDefinition;

    /// Primary identifier.
    fn id(&self) -> &str;

    /// Value of the partition column, if the table is partitioned.
    fn partition_value(&self) -> Option<&str>;

    /// Check field-level invariants.
    fn validate(&self) -> Result<(), ModelError>;
}

fn check_id(table: &'static str, id: &str, prefixes: &[&str]) -> Result<(), ModelError> {
    if prefixes
        .iter()
        .any(|prefix| ids::parse_sequence(id, prefix).is_some())
    {
        Ok(())
    } else {
        Err(ModelError::InvalidIdentifier {
            table,
            id: id.to_string(),
        })
    }
}

fn check_non_negative(id: &str, field: &'static str, value: f64) -> Result<(), ModelError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ModelError::Negative {
            id: id.to_string(),
            field,
            value,
        })
    }
}

fn check_date_key(id: &str, timestamp: &DateTime<Utc>, actual: &str) -> Result<(), ModelError> {
    let expected = date_key(timestamp);
    if expected == actual {
        Ok(())
    } else {
        Err(ModelError::DerivedFieldMismatch {
            id: id.to_string(),
            field: "date_key",
            expected,
            actual: actual.to_string(),
        })
    }
}

/// Root entity of the funnel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub campaign_id: String,
    pub campaign_name: String,
    pub channel: Channel,
    pub ad_format: AdFormat,
    pub budget_usd: f64,
    /// Not checked against `budget_usd`.
    pub daily_budget_usd: f64,
    pub target_cpa_usd: f64,
    pub target_region: GeoRegion,
    pub status: CampaignStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub advertiser_name: String,
    pub advertiser_industry: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    /// Midnight at the start of the campaign's first day.
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.start_date.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    /// Midnight at the start of the campaign's end date.
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.end_date.and_time(chrono::NaiveTime::MIN).and_utc()
    }
}

impl Record for Campaign {
    fn definition() -> &'static TableDefinition {
        &schema::CAMPAIGNS
    }

    fn id(&self) -> &str {
        &self.campaign_id
    }

    fn partition_value(&self) -> Option<&str> {
        None
    }

    fn validate(&self) -> Result<(), ModelError> {
        check_id(
            "campaign",
            &self.campaign_id,
            &[ids::CAMPAIGN_PREFIX, ids::NEW_CAMPAIGN_PREFIX],
        )?;
        if self.end_date <= self.start_date {
            return Err(ModelError::InvalidDateRange {
                id: self.campaign_id.clone(),
                start: self.start_date,
                end: self.end_date,
            });
        }
        check_non_negative(&self.campaign_id, "budget_usd", self.budget_usd)?;
        check_non_negative(&self.campaign_id, "daily_budget_usd", self.daily_budget_usd)?;
        check_non_negative(&self.campaign_id, "target_cpa_usd", self.target_cpa_usd)
    }
}

/// A single ad impression served for a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Impression {
    pub impression_id: String,
    pub campaign_id: String,
    pub timestamp: DateTime<Utc>,
    pub date_key: String,
    pub hour: u32,
    pub device_type: DeviceType,
    pub geo_region: GeoRegion,
    pub geo_country: String,
    pub geo_city: String,
    pub browser: Browser,
    pub os: OperatingSystem,
    pub ad_position: AdPosition,
    pub viewable: bool,
    pub cost_usd: f64,
    pub publisher_id: String,
    pub placement_id: String,
}

impl Record for Impression {
    fn definition() -> &'static TableDefinition {
        &schema::IMPRESSIONS
    }

    fn id(&self) -> &str {
        &self.impression_id
    }

    fn partition_value(&self) -> Option<&str> {
        Some(&self.date_key)
    }

    fn validate(&self) -> Result<(), ModelError> {
        check_id("impression", &self.impression_id, &[ids::IMPRESSION_PREFIX])?;
        check_date_key(&self.impression_id, &self.timestamp, &self.date_key)?;
        if self.hour != self.timestamp.hour() {
            return Err(ModelError::DerivedFieldMismatch {
                id: self.impression_id.clone(),
                field: "hour",
                expected: self.timestamp.hour().to_string(),
                actual: self.hour.to_string(),
            });
        }
        check_non_negative(&self.impression_id, "cost_usd", self.cost_usd)
    }
}

/// A click-through on an impression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Click {
    pub click_id: String,
    pub impression_id: String,
    pub campaign_id: String,
    pub timestamp: DateTime<Utc>,
    pub date_key: String,
    pub device_type: DeviceType,
    pub geo_region: GeoRegion,
    pub geo_country: String,
    pub landing_page_url: String,
    pub referrer_url: Option<String>,
    pub time_on_site_seconds: u32,
    pub pages_viewed: u32,
    /// Drawn independently of `time_on_site_seconds`.
    pub bounce: bool,
    pub cost_usd: f64,
}

impl Record for Click {
    fn definition() -> &'static TableDefinition {
        &schema::CLICKS
    }

    fn id(&self) -> &str {
        &self.click_id
    }

    fn partition_value(&self) -> Option<&str> {
        Some(&self.date_key)
    }

    fn validate(&self) -> Result<(), ModelError> {
        check_id("click", &self.click_id, &[ids::CLICK_PREFIX])?;
        check_date_key(&self.click_id, &self.timestamp, &self.date_key)?;
        check_non_negative(&self.click_id, "cost_usd", self.cost_usd)
    }
}

/// A conversion attributed to a click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub conversion_id: String,
    pub click_id: String,
    pub impression_id: String,
    pub campaign_id: String,
    pub timestamp: DateTime<Utc>,
    pub date_key: String,
    pub conversion_type: ConversionType,
    pub revenue_usd: f64,
    pub quantity: u32,
    pub currency: String,
    pub order_id: String,
    pub product_category: ProductCategory,
    pub new_customer: bool,
    pub device_type: DeviceType,
    pub geo_region: GeoRegion,
    pub attribution_model: AttributionModel,
}

impl Record for Conversion {
    fn definition() -> &'static TableDefinition {
        &schema::CONVERSIONS
    }

    fn id(&self) -> &str {
        &self.conversion_id
    }

    fn partition_value(&self) -> Option<&str> {
        Some(&self.date_key)
    }

    fn validate(&self) -> Result<(), ModelError> {
        check_id("conversion", &self.conversion_id, &[ids::CONVERSION_PREFIX])?;
        check_date_key(&self.conversion_id, &self.timestamp, &self.date_key)?;
        check_non_negative(&self.conversion_id, "revenue_usd", self.revenue_usd)
    }
}
