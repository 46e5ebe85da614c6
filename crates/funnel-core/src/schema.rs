//! Table definitions for the four funnel tables.
//!
//! Column order here is the serialization order of the matching record type
//! in [`crate::model`]; sinks rely on that to write headers and to pick the
//! partition column.

use serde::Serialize;

/// Logical column type, as the sink would declare it in a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    String,
    Double,
    Int,
    Boolean,
    Date,
    Timestamp,
}

/// Single column metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnDefinition {
    /// Column name
    pub name: &'static str,

    /// Column type
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Whether this column is nullable
    pub nullable: bool,
}

impl ColumnDefinition {
    /// Create a new non-null column definition.
    pub const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            nullable: false,
        }
    }

    /// Create a new nullable column definition.
    pub const fn nullable(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            nullable: true,
        }
    }
}

/// Table definition: name, columns and optional partition column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableDefinition {
    /// Table name
    pub name: &'static str,

    /// Column definitions, primary key first
    pub columns: &'static [ColumnDefinition],

    /// Column the sink partitions on
    pub partition_key: Option<&'static str>,
}

impl TableDefinition {
    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all column names in serialization order.
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// Name of the primary key column.
    pub fn primary_key(&self) -> &'static str {
        self.columns[0].name
    }
}

use ColumnType::*;

pub const CAMPAIGNS: TableDefinition = TableDefinition {
    name: "campaigns",
    columns: &[
        ColumnDefinition::new("campaign_id", String),
        ColumnDefinition::new("campaign_name", String),
        ColumnDefinition::new("channel", String),
        ColumnDefinition::new("ad_format", String),
        ColumnDefinition::new("budget_usd", Double),
        ColumnDefinition::new("daily_budget_usd", Double),
        ColumnDefinition::new("target_cpa_usd", Double),
        ColumnDefinition::new("target_region", String),
        ColumnDefinition::new("status", String),
        ColumnDefinition::new("start_date", Date),
        ColumnDefinition::new("end_date", Date),
        ColumnDefinition::new("advertiser_name", String),
        ColumnDefinition::new("advertiser_industry", String),
        ColumnDefinition::new("created_at", Timestamp),
        ColumnDefinition::new("updated_at", Timestamp),
    ],
    partition_key: None,
};

pub const IMPRESSIONS: TableDefinition = TableDefinition {
    name: "impressions",
    columns: &[
        ColumnDefinition::new("impression_id", String),
        ColumnDefinition::new("campaign_id", String),
        ColumnDefinition::new("timestamp", Timestamp),
        ColumnDefinition::new("date_key", String),
        ColumnDefinition::new("hour", Int),
        ColumnDefinition::new("device_type", String),
        ColumnDefinition::new("geo_region", String),
        ColumnDefinition::new("geo_country", String),
        ColumnDefinition::new("geo_city", String),
        ColumnDefinition::new("browser", String),
        ColumnDefinition::new("os", String),
        ColumnDefinition::new("ad_position", String),
        ColumnDefinition::new("viewable", Boolean),
        ColumnDefinition::new("cost_usd", Double),
        ColumnDefinition::new("publisher_id", String),
        ColumnDefinition::new("placement_id", String),
    ],
    partition_key: Some("date_key"),
};

pub const CLICKS: TableDefinition = TableDefinition {
    name: "clicks",
    columns: &[
        ColumnDefinition::new("click_id", String),
        ColumnDefinition::new("impression_id", String),
        ColumnDefinition::new("campaign_id", String),
        ColumnDefinition::new("timestamp", Timestamp),
        ColumnDefinition::new("date_key", String),
        ColumnDefinition::new("device_type", String),
        ColumnDefinition::new("geo_region", String),
        ColumnDefinition::new("geo_country", String),
        ColumnDefinition::new("landing_page_url", String),
        ColumnDefinition::nullable("referrer_url", String),
        ColumnDefinition::new("time_on_site_seconds", Int),
        ColumnDefinition::new("pages_viewed", Int),
        ColumnDefinition::new("bounce", Boolean),
        ColumnDefinition::new("cost_usd", Double),
    ],
    partition_key: Some("date_key"),
};

pub const CONVERSIONS: TableDefinition = TableDefinition {
    name: "conversions",
    columns: &[
        ColumnDefinition::new("conversion_id", String),
        ColumnDefinition::new("click_id", String),
        ColumnDefinition::new("impression_id", String),
        ColumnDefinition::new("campaign_id", String),
        ColumnDefinition::new("timestamp", Timestamp),
        ColumnDefinition::new("date_key", String),
        ColumnDefinition::new("conversion_type", String),
        ColumnDefinition::new("revenue_usd", Double),
        ColumnDefinition::new("quantity", Int),
        ColumnDefinition::new("currency", String),
        ColumnDefinition::new("order_id", String),
        ColumnDefinition::new("product_category", String),
        ColumnDefinition::new("new_customer", Boolean),
        ColumnDefinition::new("device_type", String),
        ColumnDefinition::new("geo_region", String),
        ColumnDefinition::new("attribution_model", String),
    ],
    partition_key: Some("date_key"),
};

/// All four tables in pipeline order.
pub const ALL_TABLES: [&TableDefinition; 4] = [&CAMPAIGNS, &IMPRESSIONS, &CLICKS, &CONVERSIONS];
