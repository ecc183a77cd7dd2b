//! SI units and the human-name registry
//!
//! Pure data built on the core types; nothing in `core_types` depends on it.

pub mod names;
pub mod si;

pub use names::HumanNames;
