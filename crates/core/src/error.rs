//! Error type shared by the dimension algebra, quantity engine, samplers and
//! summaries.
//!
//! Every variant is a local precondition failure: it is raised synchronously
//! at the call that violated the contract and is never retried internally.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = FermiError> = std::result::Result<T, E>;

/// Errors raised by `fermi-core`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FermiError {
    /// An algebraic operator on a Symbol/Dimension received the wrong kind of operand
    /// (e.g. `2 / length`, `length * 3`, or promoting a number to a Dimension).
    #[error("invalid operand: {0}")]
    InvalidOperand(String),

    /// A conforming operation (add, subtract, min, max) saw unequal dimensions.
    #[error("dimension mismatch: cannot combine [{left}] with [{right}]")]
    DimensionMismatch {
        /// Rendered dimension of the first mismatching operand
        left: String,
        /// Rendered dimension of the second mismatching operand
        right: String,
    },

    /// A nonlinear function (or an exponent) needs a dimensionless operand.
    #[error("{op} requires a dimensionless operand, got [{dimension}]")]
    RequiresDimensionless {
        /// Operation that was requested
        op: String,
        /// Rendered dimension that was rejected
        dimension: String,
    },

    /// The requested elementwise operation has no dispatch class.
    ///
    /// Callers are expected to treat this as "not implemented for Quantity"
    /// and fall back to their own handling; see [`FermiError::is_unsupported`].
    #[error("operation '{op}' is not implemented for Quantity")]
    UnsupportedOperation {
        /// Name of the operation as requested
        op: String,
    },

    /// A decimal literal did not match the expected grammar.
    #[error("cannot parse '{input}' as a decimal literal: {reason}")]
    ParseError {
        /// Text that was rejected
        input: String,
        /// Which part of the grammar failed
        reason: String,
    },

    /// Distribution or configuration parameters outside their domain.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Two sample arrays that are neither the same length nor broadcastable.
    #[error("sample arrays of length {left} and {right} cannot be combined")]
    ShapeMismatch {
        /// Length of the first array
        left: usize,
        /// Length of the second array
        right: usize,
    },
}

impl FermiError {
    /// True for [`FermiError::UnsupportedOperation`], the one kind a dispatcher
    /// may recover from by taking a default path.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedOperation { .. })
    }

    pub(crate) fn unsupported(op: impl Into<String>) -> Self {
        Self::UnsupportedOperation { op: op.into() }
    }

    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        Self::ParseError {
            input: input.to_owned(),
            reason: reason.into(),
        }
    }
}
