//! Error type for generator operations.

use funnel_core::{ConfigError, ModelError};

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Rejected configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A generated record failed validation
    #[error("Generated record is invalid: {0}")]
    InvalidRecord(#[from] ModelError),

    /// Worker pool could not be created
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Appended campaign id already present in the existing table
    #[error("Campaign id {0} already exists")]
    DuplicateCampaignId(String),

    /// The sink failed to consume the finished tables
    #[error("Sink error: {0}")]
    Sink(#[source] Box<dyn std::error::Error + Send + Sync>),
}
