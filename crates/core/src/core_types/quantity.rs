//! Dimensioned Monte-Carlo quantities
//!
//! A [`Quantity`] couples a sample array with exactly one [`Dimension`].
//! Arithmetic runs elementwise over the samples while the dimension is
//! combined in parallel, so uncertainty and units propagate together.
//!
//! Every elementwise operation goes through [`apply`], which classifies the
//! request through [`ElementwiseOp::class`] before touching any samples:
//!
//! - **Conforming** ops need equal dimensions and keep them;
//! - **Mapped** ops combine dimensions with the Dimension operators;
//! - **Nonlinear** ops need dimensionless inputs and return dimensionless.
//!
//! Bare numbers and arrays ([`Operand::Scalar`], [`Operand::Array`]) count
//! as dimensionless. A length-1 array broadcasts against any length.
//!
//! # Usage
//! ```
//! use fermi_core::{Dimension, Quantity};
//!
//! let meter = Quantity::make("m");
//! let second = Quantity::make("s");
//! let speed = &(&meter * 30.0) / &second;
//! assert_eq!(speed.dimension(), &(Dimension::make("m") / Dimension::make("s")));
//! assert!(speed.checked_add(&meter).is_err());
//! ```

use super::dimension::{exponent_from_f64, Dimension, Exponent, Power, DIMENSIONLESS};
use super::dispatch::{ElementwiseOp, OpClass, OutputDimension};
use super::kernels::{
    assign_binary, floor_divmod, map_binary, map_binary_pair, map_unary, sorted, write_binary,
};
use crate::error::{FermiError, Result};
use crate::summary::interval::{self, quantile_sorted};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use tracing::trace;

static NO_DIMENSION: Dimension = DIMENSIONLESS;

/// Sample array tagged with a physical dimension.
///
/// Equality compares the dimension and every sample. Two independent draws
/// of the same distribution are therefore almost never equal; use
/// [`Quantity::as_scalar`] to compare or key single-sample quantities.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    values: Vec<f64>,
    dimension: Dimension,
}

/// Input to an elementwise operation.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Quantity(&'a Quantity),
    /// Dimensionless number, broadcast over the other operand
    Scalar(f64),
    /// Dimensionless sample array
    Array(&'a [f64]),
}

impl<'a> Operand<'a> {
    pub fn values(&self) -> &[f64] {
        match self {
            Operand::Quantity(q) => &q.values,
            Operand::Scalar(value) => std::slice::from_ref(value),
            Operand::Array(values) => values,
        }
    }

    pub fn dimension(&self) -> &Dimension {
        match self {
            Operand::Quantity(q) => &q.dimension,
            Operand::Scalar(_) | Operand::Array(_) => &NO_DIMENSION,
        }
    }
}

impl<'a> From<&'a Quantity> for Operand<'a> {
    fn from(quantity: &'a Quantity) -> Self {
        Operand::Quantity(quantity)
    }
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl<'a> From<&'a [f64]> for Operand<'a> {
    fn from(values: &'a [f64]) -> Self {
        Operand::Array(values)
    }
}

impl<'a> From<&'a Vec<f64>> for Operand<'a> {
    fn from(values: &'a Vec<f64>) -> Self {
        Operand::Array(values)
    }
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Dimension of each output of `op`, or the error the dispatch class raises.
fn output_dimensions(op: ElementwiseOp, inputs: &[Operand<'_>]) -> Result<Vec<Dimension>> {
    if inputs.len() != op.arity() {
        return Err(FermiError::InvalidOperand(format!(
            "{op} takes {} operand(s), got {}",
            op.arity(),
            inputs.len()
        )));
    }

    match op.class() {
        OpClass::Conforming => {
            let first = inputs[0].dimension();
            if let Some(other) = inputs[1..].iter().find(|i| !i.dimension().conforms(first)) {
                return Err(FermiError::DimensionMismatch {
                    left: first.to_string(),
                    right: other.dimension().to_string(),
                });
            }
        }
        OpClass::Nonlinear => {
            if let Some(bad) = inputs.iter().find(|i| !i.dimension().is_dimensionless()) {
                return Err(FermiError::RequiresDimensionless {
                    op: op.name().into(),
                    dimension: bad.dimension().to_string(),
                });
            }
        }
        OpClass::Mapped => {}
    }

    let left = inputs[0].dimension();
    let right = inputs.get(1).map_or(&NO_DIMENSION, Operand::dimension);
    Ok(op
        .outputs()
        .iter()
        .map(|rule| match rule {
            OutputDimension::Common | OutputDimension::First => left.clone(),
            OutputDimension::Product => left * right,
            OutputDimension::Quotient => left / right,
            OutputDimension::Dimensionless => DIMENSIONLESS,
        })
        .collect())
}

/// Dimension of a single-output operation; multi-output ops are rejected.
fn single_output(op: ElementwiseOp, inputs: &[Operand<'_>]) -> Result<Dimension> {
    let mut dimensions = output_dimensions(op, inputs)?;
    match (dimensions.pop(), dimensions.is_empty()) {
        (Some(dimension), true) => Ok(dimension),
        _ => Err(FermiError::unsupported(format!(
            "{op} into a single output"
        ))),
    }
}

/// Run `op` on `inputs`, returning one Quantity per output.
///
/// # Errors
/// - `DimensionMismatch` for a Conforming op on unequal dimensions
/// - `RequiresDimensionless` for a Nonlinear op on a dimensioned input
/// - `ShapeMismatch` for arrays that cannot broadcast
/// - `InvalidOperand` for the wrong number of inputs
pub fn apply(op: ElementwiseOp, inputs: &[Operand<'_>]) -> Result<Vec<Quantity>> {
    let dimensions = output_dimensions(op, inputs)?;
    trace!(op = %op, class = ?op.class(), inputs = inputs.len(), "dispatch");

    let outputs = match (op.unary_kernel(), op.binary_kernel(), inputs) {
        (Some(kernel), _, [x]) => vec![map_unary(x.values(), kernel)],
        (_, Some(kernel), [a, b]) => vec![map_binary(a.values(), b.values(), kernel)?],
        (_, _, [a, b]) if op == ElementwiseOp::DivMod => {
            let (quotient, remainder) = map_binary_pair(a.values(), b.values(), floor_divmod)?;
            vec![quotient, remainder]
        }
        _ => return Err(FermiError::unsupported(op.name())),
    };

    Ok(outputs
        .into_iter()
        .zip(dimensions)
        .map(|(values, dimension)| Quantity::new(values, dimension))
        .collect())
}

/// Like [`apply`] by operation name; unknown names are `UnsupportedOperation`
/// so the caller can fall back.
pub fn apply_named(name: &str, inputs: &[Operand<'_>]) -> Result<Vec<Quantity>> {
    apply(ElementwiseOp::from_name(name)?, inputs)
}

/// Run a single-output Conforming or Mapped op and write the result into
/// `out`, reusing its sample buffer.
///
/// `out` must already have the broadcast length of the inputs.
pub fn apply_into(op: ElementwiseOp, inputs: &[Operand<'_>], out: &mut Quantity) -> Result<()> {
    if op.class() == OpClass::Nonlinear {
        return Err(FermiError::unsupported(format!("{op} (in place)")));
    }
    let dimension = single_output(op, inputs)?;
    let (Some(kernel), [a, b]) = (op.binary_kernel(), inputs) else {
        return Err(FermiError::unsupported(format!("{op} (in place)")));
    };
    write_binary(a.values(), b.values(), kernel, &mut out.values)?;
    out.dimension = dimension;
    Ok(())
}

// ============================================================================
// QUANTITY
// ============================================================================

impl Quantity {
    pub fn new(values: Vec<f64>, dimension: Dimension) -> Self {
        Self { values, dimension }
    }

    pub fn dimensionless(values: Vec<f64>) -> Self {
        Self::new(values, DIMENSIONLESS)
    }

    /// Single-sample quantity, e.g. the literal `5 m`.
    pub fn scalar(value: f64, dimension: Dimension) -> Self {
        Self::new(vec![value], dimension)
    }

    /// One unit of a new base dimension named `name`.
    pub fn make(name: impl Into<String>) -> Self {
        Self::scalar(1.0, Dimension::make(name))
    }

    #[must_use]
    pub fn with_dimension(self, dimension: Dimension) -> Self {
        Self { dimension, ..self }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    /// Same dimension, whatever the samples.
    pub fn conforms(&self, other: &Quantity) -> bool {
        self.dimension.conforms(&other.dimension)
    }

    /// The value of a single-sample quantity.
    pub fn as_scalar(&self) -> Option<f64> {
        match self.values.as_slice() {
            [value] => Some(*value),
            _ => None,
        }
    }

    /// This quantity used as an exponent. Only single-sample quantities
    /// qualify; the dimension is checked by the receiving `checked_pow`.
    pub fn as_power(&self) -> Result<Power> {
        let value = self.as_scalar().ok_or_else(|| {
            FermiError::InvalidOperand(format!(
                "a dimension exponent must be a single value, got {} samples",
                self.len()
            ))
        })?;
        Ok(Power::Scalar {
            value,
            dimension: self.dimension.clone(),
        })
    }

    // ------------------------------------------------------------------
    // Elementwise operations
    // ------------------------------------------------------------------

    fn binary(&self, op: ElementwiseOp, rhs: Operand<'_>) -> Result<Quantity> {
        let inputs = [Operand::Quantity(self), rhs];
        let dimension = single_output(op, &inputs)?;
        let kernel = op
            .binary_kernel()
            .ok_or_else(|| FermiError::unsupported(op.name()))?;
        Ok(Quantity::new(
            map_binary(&self.values, rhs.values(), kernel)?,
            dimension,
        ))
    }

    pub fn checked_add<'a>(&'a self, rhs: impl Into<Operand<'a>>) -> Result<Quantity> {
        self.binary(ElementwiseOp::Add, rhs.into())
    }

    pub fn checked_sub<'a>(&'a self, rhs: impl Into<Operand<'a>>) -> Result<Quantity> {
        self.binary(ElementwiseOp::Subtract, rhs.into())
    }

    /// Elementwise minimum; NaN loses to a number.
    pub fn minimum<'a>(&'a self, rhs: impl Into<Operand<'a>>) -> Result<Quantity> {
        self.binary(ElementwiseOp::Minimum, rhs.into())
    }

    pub fn maximum<'a>(&'a self, rhs: impl Into<Operand<'a>>) -> Result<Quantity> {
        self.binary(ElementwiseOp::Maximum, rhs.into())
    }

    pub fn checked_mul<'a>(&'a self, rhs: impl Into<Operand<'a>>) -> Result<Quantity> {
        self.binary(ElementwiseOp::Multiply, rhs.into())
    }

    pub fn checked_div<'a>(&'a self, rhs: impl Into<Operand<'a>>) -> Result<Quantity> {
        self.binary(ElementwiseOp::Divide, rhs.into())
    }

    pub fn floor_div<'a>(&'a self, rhs: impl Into<Operand<'a>>) -> Result<Quantity> {
        self.binary(ElementwiseOp::FloorDivide, rhs.into())
    }

    /// Floor quotient (dimension `self / rhs`) and remainder (dimension of `self`).
    pub fn divmod<'a>(&'a self, rhs: impl Into<Operand<'a>>) -> Result<(Quantity, Quantity)> {
        let mut outputs = apply(ElementwiseOp::DivMod, &[Operand::Quantity(self), rhs.into()])?;
        match (outputs.pop(), outputs.pop()) {
            (Some(remainder), Some(quotient)) => Ok((quotient, remainder)),
            _ => Err(FermiError::unsupported("divmod")),
        }
    }

    /// Apply a Nonlinear op such as [`ElementwiseOp::Sin`].
    pub fn map(&self, op: ElementwiseOp) -> Result<Quantity> {
        let dimension = single_output(op, &[Operand::Quantity(self)])?;
        let kernel = op
            .unary_kernel()
            .ok_or_else(|| FermiError::unsupported(op.name()))?;
        Ok(Quantity::new(map_unary(&self.values, kernel), dimension))
    }

    /// `self = self op rhs` without allocating a new sample buffer.
    ///
    /// Only single-output Conforming and Mapped ops qualify. The buffer
    /// cannot grow, so `rhs` must match `self` in length or have one sample.
    pub fn apply_assign<'a>(&mut self, op: ElementwiseOp, rhs: impl Into<Operand<'a>>) -> Result<()> {
        let rhs = rhs.into();
        if op.class() == OpClass::Nonlinear {
            return Err(FermiError::unsupported(format!("{op} (in place)")));
        }
        let dimension = single_output(op, &[Operand::Quantity(&*self), rhs])?;
        let kernel = op
            .binary_kernel()
            .ok_or_else(|| FermiError::unsupported(format!("{op} (in place)")))?;
        assign_binary(&mut self.values, rhs.values(), kernel)?;
        self.dimension = dimension;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Powers
    // ------------------------------------------------------------------

    /// Raise to an exact rational power.
    ///
    /// `InvalidOperand` if a dimension exponent overflows.
    pub fn pow(&self, power: Exponent) -> Result<Quantity> {
        let dimension = self.dimension.try_pow(power)?;
        let integer = power
            .is_integer()
            .then(|| i32::try_from(*power.numer()).ok())
            .flatten();
        let values = match integer {
            Some(n) => self.values.iter().map(|x| x.powi(n)).collect(),
            None => {
                let real = *power.numer() as f64 / *power.denom() as f64;
                self.values.iter().map(|x| x.powf(real)).collect()
            }
        };
        Ok(Quantity::new(values, dimension))
    }

    /// Raise to a small integer power.
    ///
    /// # Panics
    /// If a dimension exponent overflows, like [`Dimension::powi`].
    #[track_caller]
    pub fn powi(&self, power: i32) -> Quantity {
        Quantity::new(
            self.values.iter().map(|x| x.powi(power)).collect(),
            self.dimension.powi(i64::from(power)),
        )
    }

    /// Raise to a real power.
    ///
    /// A dimensioned quantity needs a power that is a small rational, since
    /// dimension exponents are exact; anything else is `InvalidOperand`.
    pub fn powf(&self, power: f64) -> Result<Quantity> {
        let dimension = if self.is_dimensionless() {
            DIMENSIONLESS
        } else {
            self.dimension.try_pow(exponent_from_f64(power)?)?
        };
        Ok(Quantity::new(
            map_binary(&self.values, &[power], f64::powf)?,
            dimension,
        ))
    }

    /// `self ** exponent` with a Quantity exponent.
    ///
    /// The exponent must be dimensionless. A dimensionless base accepts a
    /// sampled exponent elementwise; a dimensioned base needs a single-value
    /// exponent so the result has one dimension.
    pub fn checked_pow(&self, exponent: &Quantity) -> Result<Quantity> {
        if !exponent.is_dimensionless() {
            return Err(FermiError::RequiresDimensionless {
                op: "power".into(),
                dimension: exponent.dimension.to_string(),
            });
        }
        if self.is_dimensionless() {
            return Ok(Quantity::dimensionless(map_binary(
                &self.values,
                &exponent.values,
                f64::powf,
            )?));
        }
        let dimension = self.dimension.checked_pow(exponent.as_power()?)?;
        let values = map_binary(&self.values, &exponent.values, f64::powf)?;
        Ok(Quantity::new(values, dimension))
    }

    // ------------------------------------------------------------------
    // Statistics
    // ------------------------------------------------------------------

    /// Samples in ascending order (NaN last).
    pub fn sorted_values(&self) -> Vec<f64> {
        sorted(&self.values)
    }

    pub fn mean(&self) -> Option<Quantity> {
        let mean = interval::mean(&self.values)?;
        Some(Quantity::scalar(mean, self.dimension.clone()))
    }

    pub fn median(&self) -> Option<Quantity> {
        let median = interval::median(&self.sorted_values())?;
        Some(Quantity::scalar(median, self.dimension.clone()))
    }

    /// Linearly interpolated `p`-quantile, `p` in `[0, 1]`.
    pub fn quantile(&self, p: f64) -> Option<Quantity> {
        let value = quantile_sorted(&self.sorted_values(), p)?;
        Some(Quantity::scalar(value, self.dimension.clone()))
    }
}

/// Unary Nonlinear shorthands, each `self.map(op)`.
macro_rules! nonlinear_methods {
    ($($name:ident => $op:ident),* $(,)?) => {
        impl Quantity {
            $(
                pub fn $name(&self) -> Result<Quantity> {
                    self.map(ElementwiseOp::$op)
                }
            )*
        }
    };
}

nonlinear_methods! {
    sin => Sin,
    cos => Cos,
    tan => Tan,
    exp => Exp,
    ln => Log,
    log10 => Log10,
}

impl fmt::Debug for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SHOWN: usize = 4;
        f.debug_struct("Quantity")
            .field("dimension", &self.dimension.to_string())
            .field("len", &self.values.len())
            .field("head", &&self.values[..self.values.len().min(SHOWN)])
            .finish()
    }
}

// ============================================================================
// OPERATORS
// ============================================================================
//
// `+` and `-` can fail on a dimension mismatch, so they return `Result`.
// `*`, `/` and unary `-` only fail when sample arrays cannot broadcast, which
// is a programming error (all samplers share one length), and they panic
// in that case.

#[track_caller]
fn infallible(result: Result<Quantity>) -> Quantity {
    match result {
        Ok(quantity) => quantity,
        Err(err) => panic!("{err}"),
    }
}

impl Add<&Quantity> for &Quantity {
    type Output = Result<Quantity>;
    fn add(self, rhs: &Quantity) -> Result<Quantity> {
        self.checked_add(rhs)
    }
}

impl Sub<&Quantity> for &Quantity {
    type Output = Result<Quantity>;
    fn sub(self, rhs: &Quantity) -> Result<Quantity> {
        self.checked_sub(rhs)
    }
}

impl Add for Quantity {
    type Output = Result<Quantity>;
    fn add(self, rhs: Quantity) -> Result<Quantity> {
        &self + &rhs
    }
}

impl Sub for Quantity {
    type Output = Result<Quantity>;
    fn sub(self, rhs: Quantity) -> Result<Quantity> {
        &self - &rhs
    }
}

impl Mul<&Quantity> for &Quantity {
    type Output = Quantity;
    #[track_caller]
    fn mul(self, rhs: &Quantity) -> Quantity {
        infallible(self.checked_mul(rhs))
    }
}

impl Div<&Quantity> for &Quantity {
    type Output = Quantity;
    #[track_caller]
    fn div(self, rhs: &Quantity) -> Quantity {
        infallible(self.checked_div(rhs))
    }
}

impl Mul for Quantity {
    type Output = Quantity;
    #[track_caller]
    fn mul(self, rhs: Quantity) -> Quantity {
        &self * &rhs
    }
}

impl Div for Quantity {
    type Output = Quantity;
    #[track_caller]
    fn div(self, rhs: Quantity) -> Quantity {
        &self / &rhs
    }
}

impl Mul<f64> for &Quantity {
    type Output = Quantity;
    #[track_caller]
    fn mul(self, rhs: f64) -> Quantity {
        infallible(self.checked_mul(rhs))
    }
}

impl Mul<&Quantity> for f64 {
    type Output = Quantity;
    #[track_caller]
    fn mul(self, rhs: &Quantity) -> Quantity {
        rhs * self
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;
    #[track_caller]
    fn mul(self, rhs: f64) -> Quantity {
        &self * rhs
    }
}

impl Mul<Quantity> for f64 {
    type Output = Quantity;
    #[track_caller]
    fn mul(self, rhs: Quantity) -> Quantity {
        &rhs * self
    }
}

impl Div<f64> for &Quantity {
    type Output = Quantity;
    #[track_caller]
    fn div(self, rhs: f64) -> Quantity {
        infallible(self.checked_div(rhs))
    }
}

impl Div<&Quantity> for f64 {
    type Output = Quantity;
    #[track_caller]
    fn div(self, rhs: &Quantity) -> Quantity {
        infallible(apply_scalar_left(ElementwiseOp::Divide, self, rhs))
    }
}

impl Div<f64> for Quantity {
    type Output = Quantity;
    #[track_caller]
    fn div(self, rhs: f64) -> Quantity {
        &self / rhs
    }
}

impl Div<Quantity> for f64 {
    type Output = Quantity;
    #[track_caller]
    fn div(self, rhs: Quantity) -> Quantity {
        self / &rhs
    }
}

fn apply_scalar_left(op: ElementwiseOp, lhs: f64, rhs: &Quantity) -> Result<Quantity> {
    let inputs = [Operand::Scalar(lhs), Operand::Quantity(rhs)];
    let dimension = single_output(op, &inputs)?;
    let kernel = op
        .binary_kernel()
        .ok_or_else(|| FermiError::unsupported(op.name()))?;
    Ok(Quantity::new(map_binary(&[lhs], &rhs.values, kernel)?, dimension))
}

impl Neg for &Quantity {
    type Output = Quantity;
    fn neg(self) -> Quantity {
        Quantity::new(map_unary(&self.values, |x| -x), self.dimension.clone())
    }
}

impl Neg for Quantity {
    type Output = Quantity;
    fn neg(self) -> Quantity {
        -&self
    }
}
