//! Monte-Carlo sampling: configuration, calibrated distributions and the
//! stateful [`Sampler`]

pub mod config;
pub mod distributions;
pub mod sampler;
pub mod special;

pub use config::{SamplingConfig, DEFAULT_CONFIDENCE, DEFAULT_SAMPLES};
pub use distributions::DEFAULT_STUDENT_DF;
pub use sampler::Sampler;
