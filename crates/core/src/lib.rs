//! Fermi Estimation Core Library
//!
//! Order-of-magnitude estimation with uncertainty carried as samples. A
//! [`Quantity`] is a large array of Monte Carlo draws tagged with a physical
//! [`Dimension`]; arithmetic on quantities checks dimensions and propagates
//! the uncertainty sample by sample.
//!
//! ## Pieces
//! - `core_types`: the dimension algebra and the quantity engine with its
//!   Conforming / Mapped / Nonlinear dispatch
//! - `sampling`: calibrated distributions drawn from one seeded stream
//! - `summary`: intervals and significant-figure formatting
//! - `units` and `render`: SI data and plain-text reports
//!
//! ```
//! use fermi_core::sampling::{Sampler, SamplingConfig};
//! use fermi_core::{Dimension, Quantity};
//!
//! let mut sampler = Sampler::seeded(1, SamplingConfig::default().with_samples(10_000)).unwrap();
//! let meter = Quantity::make("m");
//! let second = Quantity::make("s");
//! let distance = &sampler.normal(90.0, 110.0).unwrap() * &meter;
//! let time = &sampler.normal(9.0, 11.0).unwrap() * &second;
//! let speed = &distance / &time;
//! assert_eq!(speed.dimension(), &(&Dimension::make("m") / &Dimension::make("s")));
//! assert!(distance.checked_add(&time).is_err());
//! ```

// Core types: dimensions, dispatch and quantities
pub mod core_types;
pub mod error;

// Sampling and summaries
pub mod sampling;
pub mod summary;

// Boundary collaborators
pub mod render;
pub mod units;

// Re-export core types
pub use core_types::{apply, Dimension, ElementwiseOp, Exponent, OpClass, Operand, Quantity, Symbol};
pub use core_types::DIMENSIONLESS;
pub use error::{FermiError, Result};

// Re-export sampling and rendering
pub use render::Report;
pub use sampling::{Sampler, SamplingConfig};
pub use units::HumanNames;
