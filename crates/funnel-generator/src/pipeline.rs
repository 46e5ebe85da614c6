//! End-to-end generation run.

use crate::campaign::CampaignGenerator;
use crate::click::ClickGenerator;
use crate::conversion::ConversionGenerator;
use crate::error::GeneratorError;
use crate::impression::ImpressionGenerator;
use funnel_core::{FunnelConfig, FunnelSink, FunnelSummary, FunnelTables};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::time::Instant;
use tracing::info;

/// Runs the four stages in order on a dedicated worker pool.
pub struct FunnelGenerator {
    config: FunnelConfig,
    pool: ThreadPool,
}

impl FunnelGenerator {
    /// Validate `config` and set up the worker pool.
    ///
    /// Nothing is generated here; an invalid configuration is rejected
    /// before any work starts.
    pub fn new(config: FunnelConfig) -> Result<Self, GeneratorError> {
        config.validate()?;

        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("funnel-worker-{i}"));
        if let Some(threads) = config.threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;

        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &FunnelConfig {
        &self.config
    }

    /// Number of worker threads in the pool.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Generate all four tables.
    ///
    /// Either every stage succeeds and the complete dataset is returned, or
    /// the first error is returned and no tables are.
    pub fn generate(&self) -> Result<FunnelTables, GeneratorError> {
        let started = Instant::now();
        info!(
            "Generating funnel: seed {}, {} campaigns, {} impressions/campaign, window {} .. {}, {} threads",
            self.config.seed,
            self.config.num_campaigns,
            self.config.impressions_per_campaign,
            self.config.start,
            self.config.end,
            self.threads()
        );

        let tables = self.pool.install(|| self.run_stages())?;

        info!(
            "Generated {} rows in {:?}",
            tables.total_rows(),
            started.elapsed()
        );
        Ok(tables)
    }

    fn run_stages(&self) -> Result<FunnelTables, GeneratorError> {
        let config = &self.config;

        let campaigns = timed("campaigns", || CampaignGenerator::new(config).generate())?;
        let impressions = timed("impressions", || {
            ImpressionGenerator::new(config).generate(&campaigns)
        })?;
        let clicks = timed("clicks", || ClickGenerator::new(config).generate(&impressions))?;
        let conversions = timed("conversions", || {
            ConversionGenerator::new(config).generate(&clicks, &campaigns)
        })?;

        Ok(FunnelTables {
            campaigns,
            impressions,
            clicks,
            conversions,
        })
    }

    /// Generate the tables and hand them to `sink`.
    pub fn run_into<S: FunnelSink>(
        &self,
        sink: &mut S,
    ) -> Result<(FunnelSummary, S::Output), GeneratorError> {
        let tables = self.generate()?;
        let summary = tables.summary();
        let output = sink
            .write_tables(&tables)
            .map_err(|e| GeneratorError::Sink(Box::new(e)))?;
        Ok((summary, output))
    }
}

fn timed<T>(
    stage: &str,
    run: impl FnOnce() -> Result<Vec<T>, GeneratorError>,
) -> Result<Vec<T>, GeneratorError> {
    let started = Instant::now();
    let rows = run()?;
    info!("Generated {} {} in {:?}", rows.len(), stage, started.elapsed());
    Ok(rows)
}
