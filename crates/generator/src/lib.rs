//! Synthetic IQ feed for exercising the ingestion server without hardware.
//!
//! A [`SineSource`] produces batches, a [`WebhookClient`] posts them, and
//! [`Generator`] drives the two on a fixed interval.

pub mod client;
pub mod wave;

pub use client::WebhookClient;
pub use wave::SineSource;

use iq_config::GeneratorConfig;
use iq_core::Result;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn};

/// Outcome counters for a generator run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorStats {
    pub sent:   u64,
    pub failed: u64,
}

/// Fixed-rate batch emitter.
#[derive(Debug)]
pub struct Generator {
    source:   SineSource,
    client:   WebhookClient,
    points:   usize,
    interval: Duration,
    stats:    GeneratorStats,
}

impl Generator {
    pub fn new(source: SineSource, client: WebhookClient, points: usize, interval: Duration) -> Self {
        Self {
            source,
            client,
            points,
            interval,
            stats: GeneratorStats::default(),
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let source = SineSource::from_config(config)?;
        let client =
            WebhookClient::new(&config.webhook, Duration::from_secs(config.timeout_secs))?;

        Ok(Self::new(
            source,
            client,
            config.points,
            Duration::from_millis(config.interval_ms),
        ))
    }

    pub fn stats(&self) -> GeneratorStats {
        self.stats
    }

    /// Generate one batch and send it.  A failed send is logged and counted;
    /// the batch is not retried; the next tick carries on with fresh samples.
    pub async fn tick(&mut self) -> Result<()> {
        let batch = self.source.next_batch(self.points);

        match self.client.send(&batch).await {
            Ok(()) => {
                self.stats.sent += 1;
                info!("Successfully sent {} IQ data points to webhook", batch.len());
                Ok(())
            }
            Err(e) => {
                self.stats.failed += 1;
                warn!("Error sending data: {e}");
                Err(e)
            }
        }
    }

    /// Tick every interval.  Stops after `limit` batches, or never if `None`.
    pub async fn run(&mut self, limit: Option<u64>) -> GeneratorStats {
        info!(
            "Sending {} points every {} ms to {}",
            self.points,
            self.interval.as_millis(),
            self.client.url()
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut batches = 0u64;
        while limit.map_or(true, |limit| batches < limit) {
            ticker.tick().await;
            // Failures are already logged; the loop retries on the next tick.
            let _ = self.tick().await;
            batches += 1;
        }

        self.stats
    }
}
