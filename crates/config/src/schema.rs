use iq_core::{IqError, Result, DEFAULT_CAPACITY, MAX_SAMPLE_JSON_BYTES};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest request body the server buffers by default (16 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Root configuration structure parsed from `iq.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IqConfig {
    /// Ingestion / query server settings.
    pub server: ServerConfig,
    /// Synthetic sample generator settings.
    pub generator: GeneratorConfig,
}

impl IqConfig {
    /// Reject values that would make either binary misbehave.
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.generator.validate()?;

        // `[ ]` plus the widest possible element per point.
        let batch_bytes = self.generator.points.saturating_mul(MAX_SAMPLE_JSON_BYTES) + 2;
        if batch_bytes > self.server.max_body_bytes {
            return Err(IqError::Config(format!(
                "generator.points = {} can produce {batch_bytes}-byte batches, \
                 over server.max_body_bytes = {}",
                self.generator.points, self.server.max_body_bytes
            )));
        }
        Ok(())
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to listen on.
    pub bind: String,
    /// TCP port to listen on.
    pub port: u16,
    /// Maximum number of samples retained in memory.
    pub capacity: usize,
    /// Directory served for requests that match no API route.
    pub static_dir: Option<PathBuf>,
    /// Request bodies larger than this are answered with `413`.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind:           "0.0.0.0".to_string(),
            port:           7070,
            capacity:       DEFAULT_CAPACITY,
            static_dir:     None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(IqError::Config("server.capacity must be at least 1".into()));
        }
        if self.max_body_bytes == 0 {
            return Err(IqError::Config("server.max_body_bytes must be at least 1".into()));
        }
        Ok(())
    }
}

/// Synthetic generator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Ingestion endpoint the batches are posted to.
    pub webhook: String,
    /// Samples per batch.
    pub points: usize,
    /// Delay between batches in milliseconds.
    pub interval_ms: u64,
    /// Time increment between consecutive samples.
    pub step: f64,
    /// Peak amplitude of the sine/cosine components.
    pub amplitude: f64,
    /// Standard deviation of additive Gaussian noise (0 = clean signal).
    pub noise: f64,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Fixed RNG seed for reproducible noise.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            webhook:      "http://localhost:7070/webhook".to_string(),
            points:       10,
            interval_ms:  1_000,
            step:         0.1,
            amplitude:    1.0,
            noise:        0.0,
            timeout_secs: 10,
            seed:         None,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.points == 0 {
            return Err(IqError::Config("generator.points must be at least 1".into()));
        }
        if self.interval_ms == 0 {
            return Err(IqError::Config("generator.interval_ms must be at least 1".into()));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(IqError::Config(format!(
                "generator.step must be a positive number, got {}",
                self.step
            )));
        }
        if !self.amplitude.is_finite() {
            return Err(IqError::Config("generator.amplitude must be finite".into()));
        }
        if !self.noise.is_finite() || self.noise < 0.0 {
            return Err(IqError::Config(format!(
                "generator.noise must be a non-negative number, got {}",
                self.noise
            )));
        }
        Ok(())
    }
}
