//! Quantity arithmetic through the Conforming / Mapped / Nonlinear dispatch
mod common;

use approx::assert_relative_eq;
use fermi_core::core_types::apply_into;
use fermi_core::units::si::{meter, second};
use fermi_core::{apply, Dimension, ElementwiseOp, FermiError, Operand, Quantity};

fn meters(values: &[f64]) -> Quantity {
    Quantity::new(values.to_vec(), Dimension::make("m"))
}

#[test]
fn test_conforming_ops_check_dimensions() {
    let a = meters(&[1.0, 2.0, 3.0]);
    let b = meters(&[10.0, 20.0, 30.0]);

    let sum = (&a + &b).unwrap();
    assert_eq!(sum.dimension(), &Dimension::make("m"));
    assert_eq!(sum.values(), &[11.0, 22.0, 33.0]);
    assert_eq!((&b - &a).unwrap().values(), &[9.0, 18.0, 27.0]);

    let t = Quantity::new(vec![1.0, 2.0, 3.0], Dimension::make("s"));
    assert!(matches!(&a + &t, Err(FermiError::DimensionMismatch { .. })));
    assert!(matches!(a.maximum(&t), Err(FermiError::DimensionMismatch { .. })));
    // bare numbers are dimensionless, so they do not add to lengths
    assert!(matches!(a.checked_add(5.0), Err(FermiError::DimensionMismatch { .. })));
}

#[test]
fn test_mapped_ops_combine_dimensions() {
    let x = meters(&[2.0, 4.0]);
    let rate = Quantity::new(vec![1.0, 2.0], Dimension::make("s").recip());
    let speed = &x * &rate;
    assert_eq!(speed.dimension(), (&meter() / &second()).dimension());
    assert_eq!(speed.dimension().to_string(), "m s^-1");
    assert_eq!(speed.values(), &[2.0, 8.0]);

    let (quotient, remainder) = meters(&[7.0, -7.0]).divmod(&meters(&[2.0, 2.0])).unwrap();
    assert!(quotient.is_dimensionless());
    assert_eq!(quotient.values(), &[3.0, -4.0]);
    assert_eq!(remainder.dimension(), &Dimension::make("m"));
    assert_eq!(remainder.values(), &[1.0, 1.0]);
}

#[test]
fn test_nonlinear_ops_need_dimensionless_input() {
    let angle = Quantity::dimensionless(vec![0.0, std::f64::consts::FRAC_PI_2]);
    let sine = angle.sin().unwrap();
    assert!(sine.is_dimensionless());
    assert_relative_eq!(sine.values()[1], 1.0);

    let length = meters(&[1.0]);
    assert!(matches!(
        length.exp(),
        Err(FermiError::RequiresDimensionless { .. })
    ));
    // a ratio of lengths is dimensionless again
    let ratio = &length / &meters(&[2.0]);
    assert_relative_eq!(ratio.ln().unwrap().values()[0], 0.5f64.ln());
}

#[test]
fn test_scalars_broadcast_against_samples() {
    let q = meters(&[1.0, 2.0, 3.0]);
    let doubled = 2.0 * &q;
    assert_eq!(doubled.values(), &[2.0, 4.0, 6.0]);
    assert_eq!(doubled.dimension(), q.dimension());

    let per_meter = 6.0 / &q;
    assert_eq!(per_meter.values(), &[6.0, 3.0, 2.0]);
    assert_eq!(per_meter.dimension(), &Dimension::make("m").recip());

    let mismatched = meters(&[1.0, 2.0]);
    assert!(matches!(
        q.checked_mul(&mismatched),
        Err(FermiError::ShapeMismatch { left: 3, right: 2 })
    ));
}

#[test]
fn test_unknown_operation_is_distinct() {
    let q = Quantity::dimensionless(vec![1.0]);
    let err = fermi_core::core_types::apply_named("gamma_function", &[Operand::from(&q)])
        .unwrap_err();
    assert!(err.is_unsupported());
    assert!(!FermiError::InvalidOperand("x".into()).is_unsupported());
}

#[test]
fn test_in_place_write_reuses_buffer() {
    let a = meters(&[1.0, 2.0, 3.0]);
    let b = meters(&[1.0, 1.0, 1.0]);
    let mut out = Quantity::dimensionless(vec![0.0; 3]);
    apply_into(ElementwiseOp::Add, &[Operand::from(&a), Operand::from(&b)], &mut out).unwrap();
    assert_eq!(out, meters(&[2.0, 3.0, 4.0]));

    let err = apply_into(ElementwiseOp::DivMod, &[Operand::from(&a), Operand::from(&b)], &mut out);
    assert!(err.unwrap_err().is_unsupported());

    let mut acc = meters(&[1.0, 2.0, 3.0]);
    acc.apply_assign(ElementwiseOp::Multiply, &b).unwrap();
    assert_eq!(acc.dimension(), &Dimension::make("m").powi(2));
}

#[test]
fn test_apply_returns_one_quantity_per_output() {
    let a = meters(&[5.0]);
    let b = meters(&[2.0]);
    let outputs = apply(ElementwiseOp::DivMod, &[Operand::from(&a), Operand::from(&b)]).unwrap();
    assert_eq!(outputs.len(), 2);
    assert!(matches!(
        apply(ElementwiseOp::Add, &[Operand::from(&a)]),
        Err(FermiError::InvalidOperand(_))
    ));
}

#[test]
fn test_powers() {
    let area = meters(&[2.0, 3.0]).powi(2);
    assert_eq!(area.values(), &[4.0, 9.0]);
    assert_eq!(area.dimension().to_string(), "m^2");

    let side = area.powf(0.5).unwrap();
    assert_relative_eq!(side.values()[1], 3.0, epsilon = 1e-12);
    assert_eq!(side.dimension(), &Dimension::make("m"));

    let sampled_exponent = Quantity::dimensionless(vec![1.0, 2.0]);
    assert!(matches!(
        area.checked_pow(&sampled_exponent),
        Err(FermiError::InvalidOperand(_))
    ));
}
