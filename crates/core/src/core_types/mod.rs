//! Core types: dimensions, the elementwise dispatch table and quantities

pub mod dimension;
pub mod dispatch;
pub(crate) mod kernels;
pub mod quantity;

pub use dimension::{as_dimension, Dimension, Exponent, Power, Symbol, Term, DIMENSIONLESS};
pub use dispatch::{ElementwiseOp, OpClass, OutputDimension};
pub use quantity::{apply, apply_into, apply_named, Operand, Quantity};
