//! Shared setup for integration tests

use fermi_core::sampling::{Sampler, SamplingConfig};
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Reproducible sampler with `samples` draws per quantity.
#[allow(dead_code)]
pub fn seeded(seed: u64, samples: usize) -> Sampler {
    Sampler::seeded(seed, SamplingConfig::default().with_samples(samples))
        .expect("valid sampling config")
}
