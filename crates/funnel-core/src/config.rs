//! Generation settings.
//!
//! A [`FunnelConfig`] can be built in code, loaded from a YAML file, or
//! assembled from command-line flags. Whatever the source, it goes through
//! [`FunnelConfig::validate`] before any table is generated.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Days a campaign start must leave before the end of the window.
pub const CAMPAIGN_HEADROOM_DAYS: i64 = 30;

/// Default length of the generation window when only its end is given.
pub const DEFAULT_WINDOW_DAYS: i64 = 90;

/// Error type for configuration problems.
///
/// These are raised before generation starts.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A rate outside `[0, 1]`
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidRate { name: &'static str, value: f64 },

    /// Window too short to fit a campaign start
    #[error("Generation window {start} .. {end} must span more than 30 days")]
    WindowTooShort {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Zero worker threads
    #[error("threads must be at least 1")]
    ZeroThreads,
}

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelConfig {
    /// Random seed; the same seed and settings always yield the same tables
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of campaigns to generate
    #[serde(default = "default_num_campaigns")]
    pub num_campaigns: u64,

    /// Average impressions per serving campaign
    #[serde(default = "default_impressions_per_campaign")]
    pub impressions_per_campaign: u64,

    /// Fraction of impressions that become clicks
    #[serde(default = "default_click_rate")]
    pub click_rate: f64,

    /// Fraction of clicks that become conversions
    #[serde(default = "default_conversion_rate")]
    pub conversion_rate: f64,

    /// Start of the generation window
    pub start: DateTime<Utc>,

    /// End of the generation window
    pub end: DateTime<Utc>,

    /// Value written to `updated_at`; defaults to `end`
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,

    /// Worker threads; defaults to the number of CPUs
    #[serde(default)]
    pub threads: Option<usize>,
}

fn default_seed() -> u64 {
    42
}

fn default_num_campaigns() -> u64 {
    50
}

fn default_impressions_per_campaign() -> u64 {
    10_000
}

fn default_click_rate() -> f64 {
    0.02
}

fn default_conversion_rate() -> f64 {
    0.05
}

impl Default for FunnelConfig {
    /// Defaults with a window of the 90 days ending now.
    fn default() -> Self {
        Self::ending_at(Utc::now())
    }
}

impl FunnelConfig {
    /// Default settings with a 90-day window ending at `end`.
    pub fn ending_at(end: DateTime<Utc>) -> Self {
        Self {
            seed: default_seed(),
            num_campaigns: default_num_campaigns(),
            impressions_per_campaign: default_impressions_per_campaign(),
            click_rate: default_click_rate(),
            conversion_rate: default_conversion_rate(),
            start: end - Duration::days(DEFAULT_WINDOW_DAYS),
            end,
            as_of: None,
            threads: None,
        }
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Timestamp stamped into `updated_at`.
    pub fn as_of(&self) -> DateTime<Utc> {
        self.as_of.unwrap_or(self.end)
    }

    /// Latest day a campaign may start on.
    pub fn last_campaign_start(&self) -> DateTime<Utc> {
        self.end - Duration::days(CAMPAIGN_HEADROOM_DAYS)
    }

    /// Reject settings that would invalidate every downstream stage.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_rate("click_rate", self.click_rate)?;
        check_rate("conversion_rate", self.conversion_rate)?;

        if self.end <= self.start + Duration::days(CAMPAIGN_HEADROOM_DAYS) {
            return Err(ConfigError::WindowTooShort {
                start: self.start,
                end: self.end,
            });
        }

        if self.threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }

        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn end() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = FunnelConfig::ending_at(end());
        assert_eq!(config.seed, 42);
        assert_eq!(config.num_campaigns, 50);
        assert_eq!(config.impressions_per_campaign, 10_000);
        assert_eq!(config.click_rate, 0.02);
        assert_eq!(config.conversion_rate, 0.05);
        assert_eq!(config.start, end() - Duration::days(90));
        assert_eq!(config.as_of(), end());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_rates() {
        let mut config = FunnelConfig::ending_at(end());
        config.click_rate = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRate {
                name: "click_rate",
                ..
            })
        ));

        let mut config = FunnelConfig::ending_at(end());
        config.conversion_rate = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRate {
                name: "conversion_rate",
                ..
            })
        ));

        let mut config = FunnelConfig::ending_at(end());
        config.click_rate = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_window_too_short() {
        let mut config = FunnelConfig::ending_at(end());
        config.start = end() - Duration::days(10);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WindowTooShort { .. })
        ));

        config.start = end() - Duration::days(30);
        assert!(config.validate().is_err());

        config.start = end() - Duration::days(31);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_threads() {
        let mut config = FunnelConfig::ending_at(end());
        config.threads = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroThreads)));
    }

    #[test]
    fn test_from_yaml_applies_defaults() {
        let yaml = r#"
seed: 7
click_rate: 0.1
start: "2024-01-01T00:00:00Z"
end: "2024-04-01T00:00:00Z"
"#;
        let config = FunnelConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.click_rate, 0.1);
        assert_eq!(config.conversion_rate, 0.05);
        assert_eq!(config.num_campaigns, 50);
        assert_eq!(config.threads, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("funnel.yaml");
        std::fs::write(
            &path,
            "num_campaigns: 3\nstart: \"2024-01-01T00:00:00Z\"\nend: \"2024-03-01T00:00:00Z\"\n",
        )
        .unwrap();

        let config = FunnelConfig::from_file(&path).unwrap();
        assert_eq!(config.num_campaigns, 3);

        assert!(matches!(
            FunnelConfig::from_file(dir.path().join("missing.yaml")),
            Err(ConfigError::IoError(_))
        ));
    }
}
