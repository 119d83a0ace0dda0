use iq_config::GeneratorConfig;
use iq_core::{IqError, Result, Sample};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Continuous sine/cosine source: `real = A·sin(t)`, `imaginary = A·cos(t)`.
///
/// Time keeps running across batches, so consecutive batches join up into
/// one unbroken waveform.
#[derive(Debug)]
pub struct SineSource {
    /// Time of the first sample in the next batch.
    t: f64,
    step: f64,
    amplitude: f64,
    noise: Option<Normal<f64>>,
    rng: StdRng,
}

impl SineSource {
    /// Clean unit-amplitude source starting at `t = 0`.
    pub fn new(step: f64) -> Self {
        Self {
            t: 0.0,
            step,
            amplitude: 1.0,
            noise: None,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        Self::new(config.step)
            .with_amplitude(config.amplitude)
            .with_noise(config.noise, config.seed)
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Add zero-mean Gaussian noise with standard deviation `std_dev` to both
    /// components.  A `seed` makes the noise sequence reproducible.
    pub fn with_noise(mut self, std_dev: f64, seed: Option<u64>) -> Result<Self> {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.noise = if std_dev > 0.0 {
            let dist = Normal::new(0.0, std_dev)
                .map_err(|e| IqError::Config(format!("noise {std_dev}: {e}")))?;
            Some(dist)
        } else {
            None
        };
        Ok(self)
    }

    /// Time the next batch starts at.
    pub fn time(&self) -> f64 {
        self.t
    }

    /// Produce the next `count` samples and advance time by `count * step`.
    pub fn next_batch(&mut self, count: usize) -> Vec<Sample> {
        let start = self.t;
        let batch = (0..count)
            .map(|i| {
                let t = start + i as f64 * self.step;
                let mut real = self.amplitude * t.sin();
                let mut imaginary = self.amplitude * t.cos();
                if let Some(noise) = &self.noise {
                    real += noise.sample(&mut self.rng);
                    imaginary += noise.sample(&mut self.rng);
                }
                Sample::new(t, real, imaginary)
            })
            .collect();

        self.t = start + count as f64 * self.step;
        batch
    }
}
