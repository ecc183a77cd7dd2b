//! Algebraic laws of `Dimension` under multiplication, division and powers
mod common;

use fermi_core::core_types::{Exponent, Power, Term};
use fermi_core::{Dimension, FermiError, Symbol, DIMENSIONLESS};
use proptest::prelude::*;
use std::collections::BTreeMap;

const NAMES: [&str; 5] = ["m", "s", "kg", "A", "K"];

// Strategy for small dimensions over a fixed alphabet with exponents in -3..=3
fn small_dimension() -> impl Strategy<Value = Dimension> {
    proptest::collection::vec((0..NAMES.len(), -3i64..=3, 1i64..=2), 0..=4).prop_map(|terms| {
        terms
            .into_iter()
            .map(|(i, num, den)| (Symbol::new(NAMES[i]), Exponent::new(num, den)))
            .collect()
    })
}

fn small_exponent() -> impl Strategy<Value = Exponent> {
    (-6i64..=6, 1i64..=4).prop_map(|(num, den)| Exponent::new(num, den))
}

proptest! {
    #[test]
    fn symbol_product_divides_back(i in 0..NAMES.len(), j in 0..NAMES.len()) {
        let a = Symbol::new(NAMES[i]);
        let b = Symbol::new(NAMES[j]);
        prop_assert_eq!(&(&a * &b) / &b, a.as_dimension());
    }

    #[test]
    fn exponents_add(d in small_dimension(), r in small_exponent(), s in small_exponent()) {
        prop_assert_eq!(&d.pow(r) * &d.pow(s), d.pow(r + s));
    }

    #[test]
    fn mul_commutative(a in small_dimension(), b in small_dimension()) {
        prop_assert_eq!(&a * &b, &b * &a);
    }

    #[test]
    fn mul_associative(a in small_dimension(), b in small_dimension(), c in small_dimension()) {
        prop_assert_eq!(&(&a * &b) * &c, &a * &(&b * &c));
    }

    #[test]
    fn identity_and_inverse(a in small_dimension()) {
        prop_assert_eq!(&a * &DIMENSIONLESS, a.clone());
        prop_assert!((&a / &a).is_dimensionless());
        prop_assert!((&a * &a.recip()).is_dimensionless());
    }

    #[test]
    fn division_is_multiplication_by_reciprocal(a in small_dimension(), b in small_dimension()) {
        prop_assert_eq!(&a / &b, &a * &b.recip());
    }

    #[test]
    fn powers_distribute(a in small_dimension(), b in small_dimension(), n in -4i64..=4) {
        prop_assert_eq!((&a * &b).powi(n), &a.powi(n) * &b.powi(n));
        prop_assert_eq!(a.powi(n).powi(2), a.powi(2 * n));
    }

    #[test]
    fn simplify_is_idempotent(a in small_dimension()) {
        let once = a.clone().simplify();
        prop_assert_eq!(once.clone().simplify(), once.clone());
        prop_assert_eq!(once, a.clone());
        prop_assert!(a.iter().all(|(_, power)| *power != Exponent::from_integer(0)));
    }
}

#[test]
fn test_zero_exponents_are_ignored() {
    let mut with_zero = BTreeMap::new();
    with_zero.insert(Symbol::new("a"), Exponent::from_integer(1));
    with_zero.insert(Symbol::new("b"), Exponent::from_integer(0));
    let explicit: Dimension = with_zero.into();
    assert_eq!(explicit, Dimension::make("a"));
    assert_eq!(explicit.len(), 1);
}

#[test]
fn test_same_name_divides_to_dimensionless() {
    let x = Dimension::make("x");
    assert!((&x / &Dimension::make("x")).is_dimensionless());
    assert_eq!(DIMENSIONLESS.to_string(), "1");
}

#[test]
fn test_velocity_rendering() {
    let m = Symbol::new("m");
    let s = Symbol::new("s");
    let velocity = &m / &s;
    assert_eq!(velocity.exponent(&m), Exponent::from_integer(1));
    assert_eq!(velocity.exponent(&s), Exponent::from_integer(-1));
    assert_eq!(velocity.to_string(), "m s^-1");
    assert_eq!(Dimension::make("m").powi(2).to_string(), "m^2");
    assert_eq!(
        Dimension::make("m").pow(Exponent::new(1, 2)).to_string(),
        "m^1/2"
    );
}

#[test]
fn test_runtime_terms() {
    let meter = Term::from(Symbol::new("m"));
    let second = Term::from(Dimension::make("s"));

    assert_eq!(
        meter.checked_div(&second).unwrap(),
        &Dimension::make("m") / &Dimension::make("s")
    );
    assert_eq!(
        Term::Number(1.0).checked_div(&second).unwrap(),
        Dimension::make("s").recip()
    );
    assert!(matches!(
        Term::Number(2.0).checked_div(&second),
        Err(FermiError::InvalidOperand(_))
    ));
    assert!(matches!(
        meter.checked_mul(&Term::Number(3.0)),
        Err(FermiError::InvalidOperand(_))
    ));
    assert_eq!(
        meter.checked_pow(Power::Real(0.5)).unwrap(),
        Dimension::make("m").pow(Exponent::new(1, 2))
    );
    assert!(matches!(
        meter.checked_pow(Power::Scalar {
            value: 2.0,
            dimension: Dimension::make("s"),
        }),
        Err(FermiError::RequiresDimensionless { .. })
    ));
}
