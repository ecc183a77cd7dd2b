//! Closed dispatch table for elementwise operations on quantities
//!
//! Every supported operation is a variant of [`ElementwiseOp`] and maps to
//! exactly one [`OpClass`]. Anything else is resolved at lookup time to
//! [`FermiError::UnsupportedOperation`], so a caller can fall back to its own
//! handling instead of failing hard.
//!
//! | Class | Operations | Dimension rule |
//! |---|---|---|
//! | Conforming | add, subtract, minimum, maximum | operands equal, result keeps it |
//! | Mapped | multiply, divide, floor_divide, divmod | combined by the Dimension operator |
//! | Nonlinear | sin, cos, exp, log, ... | operands dimensionless, result dimensionless |

use crate::error::{FermiError, Result};
use std::fmt;
use std::str::FromStr;

/// Dimension rule of an operation class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpClass {
    /// All quantity operands share one dimension, which the result keeps
    Conforming,
    /// Operand dimensions combine through the matching Dimension operator
    Mapped,
    /// Operands must be dimensionless; the result is dimensionless
    Nonlinear,
}

/// How the dimension of one output is formed from two input dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputDimension {
    /// Same as the (common) input dimension
    Common,
    /// Product of the input dimensions
    Product,
    /// Quotient of the input dimensions
    Quotient,
    /// Dimension of the first input
    First,
    /// No dimension
    Dimensionless,
}

/// Every elementwise operation a quantity supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementwiseOp {
    Add,
    Subtract,
    Minimum,
    Maximum,
    Multiply,
    Divide,
    FloorDivide,
    /// Floor quotient and remainder in one pass
    DivMod,
    Sin,
    Cos,
    Tan,
    Arcsin,
    Arccos,
    Arctan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Exp2,
    Expm1,
    Log,
    Log2,
    Log10,
    Log1p,
}

impl ElementwiseOp {
    /// Every supported operation, in table order.
    pub const ALL: [ElementwiseOp; 24] = [
        Self::Add,
        Self::Subtract,
        Self::Minimum,
        Self::Maximum,
        Self::Multiply,
        Self::Divide,
        Self::FloorDivide,
        Self::DivMod,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Arcsin,
        Self::Arccos,
        Self::Arctan,
        Self::Sinh,
        Self::Cosh,
        Self::Tanh,
        Self::Exp,
        Self::Exp2,
        Self::Expm1,
        Self::Log,
        Self::Log2,
        Self::Log10,
        Self::Log1p,
    ];

    pub const fn class(self) -> OpClass {
        match self {
            Self::Add | Self::Subtract | Self::Minimum | Self::Maximum => OpClass::Conforming,
            Self::Multiply | Self::Divide | Self::FloorDivide | Self::DivMod => OpClass::Mapped,
            Self::Sin
            | Self::Cos
            | Self::Tan
            | Self::Arcsin
            | Self::Arccos
            | Self::Arctan
            | Self::Sinh
            | Self::Cosh
            | Self::Tanh
            | Self::Exp
            | Self::Exp2
            | Self::Expm1
            | Self::Log
            | Self::Log2
            | Self::Log10
            | Self::Log1p => OpClass::Nonlinear,
        }
    }

    /// Number of inputs.
    pub const fn arity(self) -> usize {
        match self.class() {
            OpClass::Nonlinear => 1,
            OpClass::Conforming | OpClass::Mapped => 2,
        }
    }

    /// Dimension rule for each output, in output order.
    pub const fn outputs(self) -> &'static [OutputDimension] {
        match self {
            Self::DivMod => &[OutputDimension::Quotient, OutputDimension::First],
            Self::Multiply => &[OutputDimension::Product],
            Self::Divide | Self::FloorDivide => &[OutputDimension::Quotient],
            _ => match self.class() {
                OpClass::Conforming => &[OutputDimension::Common],
                _ => &[OutputDimension::Dimensionless],
            },
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::FloorDivide => "floor_divide",
            Self::DivMod => "divmod",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Arcsin => "arcsin",
            Self::Arccos => "arccos",
            Self::Arctan => "arctan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Exp => "exp",
            Self::Exp2 => "exp2",
            Self::Expm1 => "expm1",
            Self::Log => "log",
            Self::Log2 => "log2",
            Self::Log10 => "log10",
            Self::Log1p => "log1p",
        }
    }

    /// Look an operation up by name.
    ///
    /// Unknown names are `UnsupportedOperation`, never a panic.
    pub fn from_name(name: &str) -> Result<Self> {
        let key = name.trim().to_ascii_lowercase();
        let alias = match key.as_str() {
            "true_divide" => "divide",
            "fmin" => "minimum",
            "fmax" => "maximum",
            "ln" => "log",
            other => other,
        };
        Self::ALL
            .into_iter()
            .find(|op| op.name() == alias)
            .ok_or_else(|| FermiError::unsupported(name))
    }

    /// Scalar kernel of a single-output binary operation.
    pub(crate) fn binary_kernel(self) -> Option<fn(f64, f64) -> f64> {
        let kernel: fn(f64, f64) -> f64 = match self {
            Self::Add => |a, b| a + b,
            Self::Subtract => |a, b| a - b,
            Self::Minimum => f64::min,
            Self::Maximum => f64::max,
            Self::Multiply => |a, b| a * b,
            Self::Divide => |a, b| a / b,
            Self::FloorDivide => |a, b| (a / b).floor(),
            _ => return None,
        };
        Some(kernel)
    }

    /// Scalar kernel of a unary operation.
    pub(crate) fn unary_kernel(self) -> Option<fn(f64) -> f64> {
        let kernel: fn(f64) -> f64 = match self {
            Self::Sin => f64::sin,
            Self::Cos => f64::cos,
            Self::Tan => f64::tan,
            Self::Arcsin => f64::asin,
            Self::Arccos => f64::acos,
            Self::Arctan => f64::atan,
            Self::Sinh => f64::sinh,
            Self::Cosh => f64::cosh,
            Self::Tanh => f64::tanh,
            Self::Exp => f64::exp,
            Self::Exp2 => f64::exp2,
            Self::Expm1 => f64::exp_m1,
            Self::Log => f64::ln,
            Self::Log2 => f64::log2,
            Self::Log10 => f64::log10,
            Self::Log1p => f64::ln_1p,
            _ => return None,
        };
        Some(kernel)
    }
}

impl fmt::Display for ElementwiseOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementwiseOp {
    type Err = FermiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}
