//! Sample-count and confidence configuration
//!
//! Every calibrated constructor needs two numbers: how many samples to draw
//! and what coverage the user's informal bounds stand for. They travel
//! together in [`SamplingConfig`] so the dependency shows up where a
//! [`Sampler`](super::Sampler) is built.

use crate::error::{FermiError, Result};
use serde::{Deserialize, Serialize};

/// Default number of Monte-Carlo samples per quantity.
pub const DEFAULT_SAMPLES: usize = 200_000;

/// Default coverage of a user-stated range: the mass of a normal within one
/// standard deviation of its mean.
pub const DEFAULT_CONFIDENCE: f64 = 0.6826894;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Samples drawn by every constructor
    pub samples: usize,
    /// Coverage probability assigned to `(a, b)` bounds
    pub confidence: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            confidence: DEFAULT_CONFIDENCE,
        }
    }
}

impl SamplingConfig {
    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Tail mass outside the configured coverage.
    pub fn alpha(&self) -> f64 {
        1.0 - self.confidence
    }

    /// Reject configurations no constructor can honour.
    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            return Err(FermiError::InvalidParameters(
                "sample count must be positive".into(),
            ));
        }
        validate_confidence(self.confidence)
    }
}

pub(crate) fn validate_confidence(p: f64) -> Result<()> {
    if p > 0.0 && p < 1.0 {
        Ok(())
    } else {
        Err(FermiError::InvalidParameters(format!(
            "confidence must lie in (0, 1), got {p}"
        )))
    }
}
