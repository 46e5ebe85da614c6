//! Deterministic advertising-funnel generator.
//!
//! This crate turns a [`FunnelConfig`] into four referentially consistent
//! tables. Every stage is a pure function of the previous stage's output and
//! the configuration; randomness comes from RNGs derived per entity from the
//! configured seed, so parallel and sequential runs produce the same rows.
//!
//! # Architecture
//!
//! ```text
//! FunnelConfig
//!        │
//!        ▼
//! ┌────────────────────┐
//! │ CampaignGenerator  │  CMP-######
//! └─────────┬──────────┘
//!           ▼  active / completed only
//! ┌────────────────────┐
//! │ImpressionGenerator │  IMP-##########   (parallel per campaign)
//! └─────────┬──────────┘
//!           ▼  subset at click_rate
//! ┌────────────────────┐
//! │  ClickGenerator    │  CLK-##########   (parallel per row)
//! └─────────┬──────────┘
//!           ▼  subset at conversion_rate, CPA from campaigns
//! ┌────────────────────┐
//! │ConversionGenerator │  CNV-##########   (parallel per row)
//! └─────────┬──────────┘
//!           ▼
//!     FunnelTables ──► FunnelSink
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use funnel_core::FunnelConfig;
//! use funnel_generator::FunnelGenerator;
//!
//! let mut config = FunnelConfig::ending_at(Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap());
//! config.num_campaigns = 5;
//! config.impressions_per_campaign = 100;
//!
//! let generator = FunnelGenerator::new(config).unwrap();
//! let tables = generator.generate().unwrap();
//! assert_eq!(tables.campaigns.len(), 5);
//! ```

pub mod append;
pub mod campaign;
pub mod click;
pub mod conversion;
pub mod error;
pub mod generators;
pub mod impression;
pub mod pipeline;
pub mod seed;

// Re-exports for convenience
pub use append::CampaignAppender;
pub use campaign::CampaignGenerator;
pub use click::ClickGenerator;
pub use conversion::{ConversionGenerator, CpaLookup, TargetCpa, FALLBACK_TARGET_CPA};
pub use error::GeneratorError;
pub use funnel_core::FunnelConfig;
pub use impression::ImpressionGenerator;
pub use pipeline::FunnelGenerator;
