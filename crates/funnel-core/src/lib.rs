//! Core types for the adfunnel generator.
//!
//! This crate provides the foundational types shared by the generator, the
//! file sinks and the command-line tool:
//!
//! - [`Campaign`], [`Impression`], [`Click`], [`Conversion`] - typed funnel records
//! - [`ids`] - fixed, human-auditable identifier formats
//! - [`TableDefinition`] - column lists and partition keys of the four tables
//! - [`FunnelConfig`] - generation settings, loadable from YAML
//! - [`FunnelTables`] - the finished dataset handed to a sink
//!
//! # Architecture
//!
//! ```text
//! funnel-core (this crate)
//!    │
//!    ├─── funnel-generator   (produces FunnelTables from a FunnelConfig)
//!    │
//!    └─── funnel-sink        (writes FunnelTables as CSV / JSON Lines)
//! ```
//!
//! # Example
//!
//! ```rust
//! use funnel_core::{ids, FunnelConfig};
//!
//! let config = FunnelConfig::default();
//! config.validate().unwrap();
//!
//! assert_eq!(ids::campaign_id(7), "CMP-000007");
//! assert_eq!(ids::parse_sequence("IMP-0000000042", ids::IMPRESSION_PREFIX), Some(42));
//! ```

pub mod config;
pub mod ids;
pub mod integrity;
pub mod model;
pub mod schema;
pub mod sink;
pub mod tables;

// Re-exports for convenience
pub use config::{ConfigError, FunnelConfig};
pub use integrity::{check_integrity, IntegrityError, IntegrityReport};
pub use model::{
    AdFormat, AdPosition, AttributionModel, Browser, Campaign, CampaignStatus, Channel, Click,
    Conversion, ConversionType, DeviceType, GeoRegion, Impression, ModelError, OperatingSystem,
    ProductCategory, Record,
};
pub use schema::{ColumnDefinition, ColumnType, TableDefinition};
pub use sink::FunnelSink;
pub use tables::{FunnelSummary, FunnelTables};
