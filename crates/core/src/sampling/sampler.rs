//! The one random stream behind every sampled quantity
//!
//! A [`Sampler`] owns a `SmallRng` and a [`SamplingConfig`]. Every
//! constructor consumes draws from that stream, so two samplers built with
//! the same seed and called in the same order give identical quantities.
//!
//! ```
//! use fermi_core::sampling::{Sampler, SamplingConfig};
//!
//! let mut sampler = Sampler::seeded(42, SamplingConfig::default().with_samples(1_000)).unwrap();
//! let height = sampler.normal(1.6, 1.9).unwrap();
//! assert_eq!(height.len(), 1_000);
//! assert!(height.is_dimensionless());
//! ```
//!
//! # Dimension tags
//! Constructors return dimensionless quantities; raw sample arrays come from
//! the free functions in [`distributions`](super::distributions). A
//! dimension is attached by tagging the result directly or by multiplying
//! with a unit, which also scales:
//!
//! ```
//! use fermi_core::sampling::{Sampler, SamplingConfig};
//! use fermi_core::units::si::{length, meter, KILO};
//!
//! let mut sampler = Sampler::seeded(7, SamplingConfig::default().with_samples(100)).unwrap();
//! let tagged = sampler.normal(1.6, 1.9).unwrap().with_dimension(length());
//! let scaled = &sampler.normal(3.0, 5.0).unwrap() * &(KILO * &meter());
//! assert_eq!(tagged.dimension(), scaled.dimension());
//! ```

use super::config::SamplingConfig;
use super::distributions as dist;
use crate::core_types::{Quantity, DIMENSIONLESS};
use crate::error::{FermiError, Result};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Sampler {
    rng: SmallRng,
    config: SamplingConfig,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
            config: SamplingConfig::default(),
        }
    }
}

impl Sampler {
    /// Sampler seeded from the operating system.
    pub fn new(config: SamplingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rng: SmallRng::from_os_rng(),
            config,
        })
    }

    /// Reproducible sampler.
    pub fn seeded(seed: u64, config: SamplingConfig) -> Result<Self> {
        config.validate()?;
        debug!(seed, samples = config.samples, "seeded sampler");
        Ok(Self {
            rng: SmallRng::seed_from_u64(seed),
            config,
        })
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    pub fn samples(&self) -> usize {
        self.config.samples
    }

    fn wrap(values: Vec<f64>) -> Quantity {
        Quantity::dimensionless(values)
    }

    pub fn plusminus(&mut self, mean: f64, sigma: f64) -> Result<Quantity> {
        dist::plusminus(&mut self.rng, self.config.samples, mean, sigma).map(Self::wrap)
    }

    pub fn epsilon(&mut self) -> Result<Quantity> {
        dist::epsilon(&mut self.rng, self.config.samples).map(Self::wrap)
    }

    /// Normal with `[a, b]` as its central interval at the configured confidence.
    pub fn normal(&mut self, a: f64, b: f64) -> Result<Quantity> {
        let p = self.config.confidence;
        dist::normal(&mut self.rng, self.config.samples, a, b, p).map(Self::wrap)
    }

    pub fn lognormal(&mut self, a: f64, b: f64) -> Result<Quantity> {
        let p = self.config.confidence;
        dist::lognormal(&mut self.rng, self.config.samples, a, b, p).map(Self::wrap)
    }

    pub fn logstudent(&mut self, a: f64, b: f64, df: f64) -> Result<Quantity> {
        let p = self.config.confidence;
        dist::logstudent(&mut self.rng, self.config.samples, a, b, df, p).map(Self::wrap)
    }

    pub fn uniform(&mut self, left: f64, right: f64) -> Result<Quantity> {
        dist::uniform(&mut self.rng, self.config.samples, left, right).map(Self::wrap)
    }

    pub fn rectangular(&mut self, center: f64, width: f64) -> Result<Quantity> {
        dist::rectangular(&mut self.rng, self.config.samples, center, width).map(Self::wrap)
    }

    pub fn triangular(&mut self, center: f64, width: f64, right: Option<f64>) -> Result<Quantity> {
        dist::triangular(&mut self.rng, self.config.samples, center, width, right).map(Self::wrap)
    }

    pub fn beta(&mut self, a: f64, b: f64) -> Result<Quantity> {
        dist::beta(&mut self.rng, self.config.samples, a, b).map(Self::wrap)
    }

    pub fn outof(&mut self, successes: f64, total: f64) -> Result<Quantity> {
        dist::outof(&mut self.rng, self.config.samples, successes, total).map(Self::wrap)
    }

    pub fn against(&mut self, a: f64, b: f64) -> Result<Quantity> {
        dist::against(&mut self.rng, self.config.samples, a, b).map(Self::wrap)
    }

    pub fn gamma(&mut self, shape: f64) -> Result<Quantity> {
        dist::gamma(&mut self.rng, self.config.samples, shape).map(Self::wrap)
    }

    pub fn data(&mut self, values: &[f64], weights: Option<&[f64]>) -> Result<Quantity> {
        dist::data(&mut self.rng, self.config.samples, values, weights).map(Self::wrap)
    }

    /// Bootstrap mixture of quantities. Components must share one dimension,
    /// which the result keeps.
    pub fn mixture(&mut self, components: &[&Quantity], weights: Option<&[f64]>) -> Result<Quantity> {
        let dimension = match components.split_first() {
            Some((first, rest)) => {
                if let Some(other) = rest.iter().find(|q| !q.conforms(first)) {
                    return Err(FermiError::DimensionMismatch {
                        left: first.dimension().to_string(),
                        right: other.dimension().to_string(),
                    });
                }
                first.dimension().clone()
            }
            None => DIMENSIONLESS,
        };
        let sources: Vec<&[f64]> = components.iter().map(|q| q.values()).collect();
        let values = dist::mixture(&mut self.rng, self.config.samples, &sources, weights)?;
        Ok(Quantity::new(values, dimension))
    }

    pub fn percent(&mut self, pct: f64) -> Result<Quantity> {
        let p = self.config.confidence;
        dist::percent(&mut self.rng, self.config.samples, pct, p).map(Self::wrap)
    }

    pub fn db(&mut self, x: f64) -> Result<Quantity> {
        let p = self.config.confidence;
        dist::db(&mut self.rng, self.config.samples, x, p).map(Self::wrap)
    }

    pub fn sigfig(&mut self, literal: &str) -> Result<Quantity> {
        dist::sigfig(&mut self.rng, self.config.samples, literal).map(Self::wrap)
    }

    /// Normal fit of an existing quantity; keeps its dimension.
    pub fn normalfit(&mut self, source: &Quantity) -> Result<Quantity> {
        let values = dist::normalfit(&mut self.rng, self.config.samples, source.values())?;
        Ok(Quantity::new(values, source.dimension().clone()))
    }
}
