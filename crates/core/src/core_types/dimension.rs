//! Symbolic dimension algebra
//!
//! A [`Dimension`] is a simplified map from base [`Symbol`]s to non-zero
//! rational exponents. Dimensions form a multiplicative group: `*` and `/`
//! add and subtract exponents per symbol, and [`Dimension::pow`] multiplies
//! every exponent.
//!
//! # Invariants
//! - No stored exponent is zero; absence of a symbol means exponent zero.
//! - Equality and hashing are over the simplified map, stored in a
//!   `BTreeMap` so both are independent of construction order.
//!
//! The statically typed operators (`Symbol * Dimension`, ...) cannot fail.
//! Operands whose kind is only known at runtime go through [`Term`], which is
//! where `InvalidOperand` is produced.
//!
//! # Usage
//! ```
//! use fermi_core::core_types::dimension::{Dimension, Symbol};
//!
//! let length = Symbol::new("m");
//! let time = Symbol::new("s");
//! let velocity = &length / &time;
//! assert_eq!(velocity.to_string(), "m s^-1");
//! assert!((&velocity / &velocity).is_dimensionless());
//! ```

use crate::error::{FermiError, Result};
use num_rational::Rational64;
use num_traits::{CheckedMul, One, Zero};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Div, Mul};

/// Rational exponent of a base symbol.
pub type Exponent = Rational64;

/// Largest denominator accepted when a float exponent is converted to a rational.
pub const MAX_EXPONENT_DENOMINATOR: i64 = 1_000;

/// The empty dimension (a pure number).
pub const DIMENSIONLESS: Dimension = Dimension {
    exponents: BTreeMap::new(),
};

// ============================================================================
// SYMBOL
// ============================================================================

/// Atomic named base dimension, e.g. `m` or `kg`.
///
/// Equality, hashing and ordering are by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Symbol(name.into())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Lift to a one-entry Dimension with exponent 1.
    pub fn as_dimension(&self) -> Dimension {
        self.pow(Exponent::one())
    }

    /// One-entry Dimension with the given exponent.
    pub fn pow(&self, power: Exponent) -> Dimension {
        Dimension::from_iter([(self.clone(), power)])
    }

    pub fn powi(&self, power: i64) -> Dimension {
        self.pow(Exponent::from_integer(power))
    }

    /// `1 / symbol`
    pub fn recip(&self) -> Dimension {
        self.powi(-1)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

// ============================================================================
// DIMENSION
// ============================================================================

/// Simplified mapping from base symbol to non-zero rational exponent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Symbol, Exponent>",
    into = "BTreeMap<Symbol, Exponent>"
)]
pub struct Dimension {
    exponents: BTreeMap<Symbol, Exponent>,
}

impl Dimension {
    /// One-entry Dimension for a freshly named base symbol.
    pub fn make(name: impl Into<String>) -> Self {
        Symbol::new(name).as_dimension()
    }

    /// Drop every entry whose exponent is exactly zero.
    ///
    /// Dimensions are always stored simplified, so this is idempotent and
    /// only needed by code that assembles a map by hand.
    pub fn simplify(mut self) -> Self {
        self.exponents.retain(|_, power| !power.is_zero());
        self
    }

    #[inline]
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.is_empty()
    }

    /// Dimensions conform when they are equal.
    #[inline]
    pub fn conforms(&self, other: &Dimension) -> bool {
        self == other
    }

    /// Exponent of `symbol`, zero when absent.
    pub fn exponent(&self, symbol: &Symbol) -> Exponent {
        self.exponents.get(symbol).copied().unwrap_or_else(Exponent::zero)
    }

    /// Entries in canonical (name) order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &Exponent)> {
        self.exponents.iter()
    }

    /// Number of base symbols with non-zero exponent.
    pub fn len(&self) -> usize {
        self.exponents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_dimensionless()
    }

    /// Multiply every exponent by `power`.
    ///
    /// # Panics
    /// If an exponent no longer fits an `i64` ratio; [`Dimension::try_pow`]
    /// reports that as an error instead.
    #[track_caller]
    pub fn pow(&self, power: Exponent) -> Dimension {
        match self.try_pow(power) {
            Ok(dimension) => dimension,
            Err(e) => panic!("{e}"),
        }
    }

    #[track_caller]
    pub fn powi(&self, power: i64) -> Dimension {
        self.pow(Exponent::from_integer(power))
    }

    /// Multiply every exponent by `power`, or `InvalidOperand` on overflow.
    pub fn try_pow(&self, power: Exponent) -> Result<Dimension> {
        self.exponents
            .iter()
            .map(|(symbol, exponent)| {
                exponent
                    .checked_mul(&power)
                    .map(|scaled| (symbol.clone(), scaled))
                    .ok_or_else(|| {
                        FermiError::InvalidOperand(format!(
                            "exponent of {symbol} overflows: ({exponent}) * ({power})"
                        ))
                    })
            })
            .collect()
    }

    /// Exponentiation by a runtime-kinded power.
    ///
    /// A scalar carrying a dimension is rejected with `RequiresDimensionless`;
    /// a float that is not a small rational is rejected with `InvalidOperand`.
    pub fn checked_pow(&self, power: Power) -> Result<Dimension> {
        match power {
            Power::Exact(exponent) => self.try_pow(exponent),
            Power::Real(value) => self.try_pow(exponent_from_f64(value)?),
            Power::Scalar { value, dimension } => {
                if !dimension.is_dimensionless() {
                    return Err(FermiError::RequiresDimensionless {
                        op: "dimension exponent".into(),
                        dimension: dimension.to_string(),
                    });
                }
                self.try_pow(exponent_from_f64(value)?)
            }
        }
    }

    /// `1 / dimension`
    pub fn recip(&self) -> Dimension {
        self.powi(-1)
    }

    fn combine(&self, other: &Dimension, sign: i64) -> Dimension {
        let mut exponents = self.exponents.clone();
        for (symbol, power) in &other.exponents {
            *exponents.entry(symbol.clone()).or_insert_with(Exponent::zero) +=
                power * Exponent::from_integer(sign);
        }
        Dimension { exponents }.simplify()
    }
}

impl FromIterator<(Symbol, Exponent)> for Dimension {
    /// Accumulates repeated symbols, then simplifies.
    fn from_iter<I: IntoIterator<Item = (Symbol, Exponent)>>(iter: I) -> Self {
        let mut exponents = BTreeMap::new();
        for (symbol, power) in iter {
            *exponents.entry(symbol).or_insert_with(Exponent::zero) += power;
        }
        Dimension { exponents }.simplify()
    }
}

impl From<BTreeMap<Symbol, Exponent>> for Dimension {
    fn from(exponents: BTreeMap<Symbol, Exponent>) -> Self {
        Dimension { exponents }.simplify()
    }
}

impl From<Dimension> for BTreeMap<Symbol, Exponent> {
    fn from(dimension: Dimension) -> Self {
        dimension.exponents
    }
}

impl From<Symbol> for Dimension {
    fn from(symbol: Symbol) -> Self {
        symbol.as_dimension()
    }
}

impl From<&Symbol> for Dimension {
    fn from(symbol: &Symbol) -> Self {
        symbol.as_dimension()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return f.write_str("1");
        }
        for (i, (symbol, power)) in self.exponents.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if power.is_one() {
                write!(f, "{symbol}")?;
            } else {
                write!(f, "{symbol}^{power}")?;
            }
        }
        Ok(())
    }
}

// Typed operators. All forward to `Dimension::combine` on borrowed operands.
macro_rules! dimension_binop {
    ($lhs:ty, $rhs:ty) => {
        impl Mul<&$rhs> for &$lhs {
            type Output = Dimension;
            fn mul(self, rhs: &$rhs) -> Dimension {
                Dimension::from(self).combine(&Dimension::from(rhs), 1)
            }
        }

        impl Div<&$rhs> for &$lhs {
            type Output = Dimension;
            fn div(self, rhs: &$rhs) -> Dimension {
                Dimension::from(self).combine(&Dimension::from(rhs), -1)
            }
        }

        impl Mul<$rhs> for $lhs {
            type Output = Dimension;
            fn mul(self, rhs: $rhs) -> Dimension {
                &self * &rhs
            }
        }

        impl Div<$rhs> for $lhs {
            type Output = Dimension;
            fn div(self, rhs: $rhs) -> Dimension {
                &self / &rhs
            }
        }
    };
}

impl From<&Dimension> for Dimension {
    fn from(dimension: &Dimension) -> Self {
        dimension.clone()
    }
}

dimension_binop!(Symbol, Symbol);
dimension_binop!(Symbol, Dimension);
dimension_binop!(Dimension, Symbol);
dimension_binop!(Dimension, Dimension);

// ============================================================================
// RUNTIME-KINDED OPERANDS
// ============================================================================

/// Power accepted by [`Dimension::checked_pow`].
#[derive(Debug, Clone, PartialEq)]
pub enum Power {
    /// Exact rational exponent
    Exact(Exponent),
    /// Plain real exponent, converted to a rational with bounded denominator
    Real(f64),
    /// Scalar carrying its own dimension (e.g. a one-sample Quantity)
    Scalar { value: f64, dimension: Dimension },
}

impl From<Exponent> for Power {
    fn from(exponent: Exponent) -> Self {
        Power::Exact(exponent)
    }
}

impl From<i64> for Power {
    fn from(power: i64) -> Self {
        Power::Exact(Exponent::from_integer(power))
    }
}

impl From<f64> for Power {
    fn from(power: f64) -> Self {
        Power::Real(power)
    }
}

/// Algebra operand whose kind is only known at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Symbol(Symbol),
    Dimension(Dimension),
    Number(f64),
}

impl From<Symbol> for Term {
    fn from(symbol: Symbol) -> Self {
        Term::Symbol(symbol)
    }
}

impl From<Dimension> for Term {
    fn from(dimension: Dimension) -> Self {
        Term::Dimension(dimension)
    }
}

impl From<f64> for Term {
    fn from(value: f64) -> Self {
        Term::Number(value)
    }
}

impl Term {
    /// `self * rhs`; numbers are never accepted.
    pub fn checked_mul(&self, rhs: &Term) -> Result<Dimension> {
        match (self, rhs) {
            (Term::Number(_), _) | (_, Term::Number(_)) => Err(FermiError::InvalidOperand(
                "can only multiply Symbols and Dimensions by Symbols or Dimensions".into(),
            )),
            _ => Ok(&as_dimension(self)? * &as_dimension(rhs)?),
        }
    }

    /// `self / rhs`; the literal `1` is the only number allowed as a dividend.
    pub fn checked_div(&self, rhs: &Term) -> Result<Dimension> {
        match (self, rhs) {
            (_, Term::Number(_)) => Err(FermiError::InvalidOperand(
                "can only divide Symbols and Dimensions by Symbols or Dimensions".into(),
            )),
            (Term::Number(n), divisor) if *n == 1.0 => Ok(as_dimension(divisor)?.recip()),
            (Term::Number(n), _) => Err(FermiError::InvalidOperand(format!(
                "cannot divide {n} by a Dimension (only 1)"
            ))),
            _ => Ok(&as_dimension(self)? / &as_dimension(rhs)?),
        }
    }

    pub fn checked_pow(&self, power: Power) -> Result<Dimension> {
        as_dimension(self)?.checked_pow(power)
    }
}

/// Promote a Symbol or Dimension to a Dimension.
pub fn as_dimension(term: &Term) -> Result<Dimension> {
    match term {
        Term::Symbol(symbol) => Ok(symbol.as_dimension()),
        Term::Dimension(dimension) => Ok(dimension.clone()),
        Term::Number(n) => Err(FermiError::InvalidOperand(format!(
            "only Symbols and Dimensions can be promoted to Dimensions, got {n}"
        ))),
    }
}

/// Best rational approximation of `value` with denominator at most
/// [`MAX_EXPONENT_DENOMINATOR`], via continued fractions.
pub fn exponent_from_f64(value: f64) -> Result<Exponent> {
    let not_rational = || {
        FermiError::InvalidOperand(format!(
            "exponent {value} is not a rational with denominator <= {MAX_EXPONENT_DENOMINATOR}"
        ))
    };
    if !value.is_finite() || value.abs() > 1e12 {
        return Err(not_rational());
    }

    let tolerance = 1e-9 * value.abs().max(1.0);
    // Convergents h/k, seeded with h(-2)=0, h(-1)=1, k(-2)=1, k(-1)=0.
    let (mut h_prev, mut h) = (0_i64, 1_i64);
    let (mut k_prev, mut k) = (1_i64, 0_i64);
    let mut rest = value;

    for _ in 0..64 {
        let term = rest.floor();
        let a = term as i64;
        let h_next = a
            .checked_mul(h)
            .and_then(|x| x.checked_add(h_prev))
            .ok_or_else(not_rational)?;
        let k_next = a
            .checked_mul(k)
            .and_then(|x| x.checked_add(k_prev))
            .ok_or_else(not_rational)?;
        if k_next > MAX_EXPONENT_DENOMINATOR {
            break;
        }
        (h_prev, h) = (h, h_next);
        (k_prev, k) = (k, k_next);

        if (h as f64 / k as f64 - value).abs() <= tolerance {
            return Ok(Exponent::new(h, k));
        }
        let fraction = rest - term;
        if fraction == 0.0 {
            break;
        }
        rest = 1.0 / fraction;
    }
    Err(not_rational())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab() -> (Symbol, Symbol) {
        (Symbol::new("a"), Symbol::new("b"))
    }

    #[test]
    fn test_symbol_name_and_equality() {
        let a = Symbol::new("a");
        assert_eq!(a.name(), "a");
        assert_eq!(a, Symbol::new("a"));
        assert!(Symbol::new("a") < Symbol::new("b"));
    }

    #[test]
    fn test_symbol_products() {
        let (a, b) = ab();
        let prod = &a * &b;
        assert_eq!(prod.exponent(&a), Exponent::one());
        assert_eq!(prod.exponent(&b), Exponent::one());

        let quot = &a / &b;
        assert_eq!(quot.exponent(&b), Exponent::from_integer(-1));

        assert_eq!(&(&a / &b) * &b, a.as_dimension());
        assert_eq!(a.powi(2).exponent(&a), Exponent::from_integer(2));
        assert_eq!(a.recip().exponent(&a), Exponent::from_integer(-1));

        assert!(!prod.is_dimensionless());
        assert!((&b / &b).is_dimensionless());
        let cancelled = &(&(&(&a.powi(2) / &b) / &a) * &b) / &a;
        assert!(cancelled.is_dimensionless());
    }

    #[test]
    fn test_zero_exponents_are_dropped() {
        let (a, b) = ab();
        let explicit: Dimension = [(a.clone(), Exponent::one()), (b, Exponent::zero())]
            .into_iter()
            .collect();
        assert_eq!(explicit, a.as_dimension());
        assert_eq!(explicit.len(), 1);
        assert_eq!(explicit.clone().simplify(), explicit);
    }

    #[test]
    fn test_group_identities() {
        let (a, b) = ab();
        let q1 = &a * &b;
        let q2 = &a / &b;

        let lhs = &q1 * &q2;
        let rhs = &(&(&q1.powi(2) / &q2) / &q1) * &q2.powi(2);
        assert_eq!(lhs, rhs);

        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let hash = |d: &Dimension| {
            let mut h = DefaultHasher::new();
            d.hash(&mut h);
            h.finish()
        };
        assert_eq!(hash(&lhs), hash(&rhs));

        assert_eq!(&a / &q1, &(&a / &a) / &b);
        assert_eq!(q2.recip(), &b / &a);
    }

    #[test]
    fn test_make_round_trip() {
        let x = Dimension::make("x");
        assert!((&x / &x).is_dimensionless());
        assert_eq!(&x / &x, DIMENSIONLESS);
    }

    #[test]
    fn test_display() {
        let (a, b) = ab();
        assert_eq!(DIMENSIONLESS.to_string(), "1");
        assert_eq!(a.as_dimension().to_string(), "a");
        assert_eq!((&a * &b).to_string(), "a b");
        assert_eq!((&a / &b.powi(2)).to_string(), "a b^-2");
        assert_eq!(a.pow(Exponent::new(1, 2)).to_string(), "a^1/2");
    }

    #[test]
    fn test_term_rejects_numbers() {
        let (a, b) = ab();
        let ta = Term::from(a.clone());
        let tq = Term::from(&a * &b);

        assert_eq!(Term::Number(1.0).checked_div(&ta).unwrap(), a.recip());
        assert_eq!(Term::Number(1.0).checked_div(&tq).unwrap(), (&a * &b).recip());

        for bad in [
            Term::Number(2.0).checked_div(&ta),
            Term::Number(2.5).checked_div(&tq),
            ta.checked_div(&Term::Number(2.0)),
            tq.checked_div(&Term::Number(1.0)),
            Term::Number(2.0).checked_mul(&ta),
            ta.checked_mul(&Term::Number(2.0)),
            tq.checked_mul(&Term::Number(1.0)),
        ] {
            assert!(matches!(bad, Err(FermiError::InvalidOperand(_))), "{bad:?}");
        }

        assert_eq!(ta.checked_mul(&tq).unwrap(), &a * &(&a * &b));
    }

    #[test]
    fn test_as_dimension() {
        let a = Symbol::new("a");
        let q = &a * &a;
        assert_eq!(as_dimension(&Term::from(a.clone())).unwrap(), &q / &a);
        assert_eq!(as_dimension(&Term::from(q.clone())).unwrap(), q);
        assert!(matches!(
            as_dimension(&Term::Number(3.0)),
            Err(FermiError::InvalidOperand(_))
        ));
    }

    #[test]
    fn test_checked_pow() {
        let a = Symbol::new("a");
        let d = a.powi(2);
        assert_eq!(d.checked_pow(Power::Real(0.5)).unwrap(), a.as_dimension());
        assert_eq!(
            d.checked_pow(Power::Scalar {
                value: 1.5,
                dimension: DIMENSIONLESS
            })
            .unwrap(),
            a.powi(3)
        );
        assert!(matches!(
            d.checked_pow(Power::Scalar {
                value: 2.0,
                dimension: a.as_dimension()
            }),
            Err(FermiError::RequiresDimensionless { .. })
        ));
        assert!(matches!(
            d.checked_pow(Power::Real(f64::NAN)),
            Err(FermiError::InvalidOperand(_))
        ));
    }

    #[test]
    fn test_try_pow_reports_overflow() {
        let big = Symbol::new("a").powi(i64::MAX / 2);
        assert!(matches!(
            big.try_pow(Exponent::from_integer(4)),
            Err(FermiError::InvalidOperand(_))
        ));
        assert!(matches!(
            big.checked_pow(Power::Exact(Exponent::from_integer(3))),
            Err(FermiError::InvalidOperand(_))
        ));
        assert_eq!(big.try_pow(Exponent::from_integer(2)).unwrap(), Symbol::new("a").powi(i64::MAX - 1));
    }

    #[test]
    #[should_panic(expected = "overflows")]
    fn test_pow_panics_on_overflow() {
        let _ = Symbol::new("a").powi(i64::MAX).pow(Exponent::from_integer(2));
    }

    #[test]
    fn test_exponent_from_f64() {
        assert_eq!(exponent_from_f64(0.5).unwrap(), Exponent::new(1, 2));
        assert_eq!(exponent_from_f64(-2.0).unwrap(), Exponent::from_integer(-2));
        assert_eq!(exponent_from_f64(1.0 / 3.0).unwrap(), Exponent::new(1, 3));
        assert_eq!(exponent_from_f64(-0.25).unwrap(), Exponent::new(-1, 4));
        assert!(exponent_from_f64(std::f64::consts::PI).is_err());
    }
}
