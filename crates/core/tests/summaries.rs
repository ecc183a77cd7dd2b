//! Intervals, significant figures and rendered reports
mod common;

use approx::assert_relative_eq;
use fermi_core::summary::{interval, shortest_interval, sigfig_resolution, summarize, DEFAULT_ALPHA};
use fermi_core::units::si::{kilogram, meter, second};
use fermi_core::{FermiError, HumanNames, Report};

/// Deterministic exponential-shaped sample: inverse CDF at evenly spaced points.
fn exponential_sample(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| -(1.0 - (i as f64 + 0.5) / n as f64).ln())
        .collect()
}

#[test]
fn test_sigfig_resolution_examples() {
    assert_relative_eq!(sigfig_resolution("234.04").unwrap(), 0.01, max_relative = 1e-12);
    assert_relative_eq!(sigfig_resolution("2342e3").unwrap(), 1000.0);
    assert_eq!(sigfig_resolution("0").unwrap(), 0.0);
    assert_eq!(sigfig_resolution("0.000").unwrap(), 0.0);
    assert_relative_eq!(sigfig_resolution("-2342e-3").unwrap(), 1e-3, max_relative = 1e-12);
    assert!(matches!(
        sigfig_resolution("twelve"),
        Err(FermiError::ParseError { .. })
    ));
}

#[test]
fn test_shortest_interval_on_skewed_data() {
    let sorted = exponential_sample(10_000);
    let (sym_low, sym_high) = interval(&sorted, DEFAULT_ALPHA).unwrap();
    let (low, high) = shortest_interval(&sorted, DEFAULT_ALPHA).unwrap();
    assert!(high - low < sym_high - sym_low);
    // the density peaks at zero, so the narrowest window hugs it
    assert!(low < sym_low);
}

#[test]
fn test_shortest_interval_matches_symmetric_on_symmetric_data() {
    let sorted: Vec<f64> = (0..1_001).map(f64::from).collect();
    let symmetric = interval(&sorted, DEFAULT_ALPHA).unwrap();
    let shortest = shortest_interval(&sorted, DEFAULT_ALPHA).unwrap();
    assert_relative_eq!(shortest.1 - shortest.0, symmetric.1 - symmetric.0);
}

#[test]
fn test_small_samples_fall_back_to_full_range() {
    let sorted = [1.0, 2.0, 3.0, 4.0];
    assert_eq!(interval(&sorted, DEFAULT_ALPHA), Some((1.0, 4.0)));
    assert_eq!(shortest_interval(&sorted, DEFAULT_ALPHA), Some((1.0, 4.0)));
    assert_eq!(interval(&[], DEFAULT_ALPHA), None);
}

#[test]
fn test_summarize_rounds_to_interval_magnitude() {
    let sorted: Vec<f64> = (0..=1_000).map(|i| 1_000.0 + f64::from(i) * 0.01).collect();
    let (mid, low, high) = summarize(&sorted, 2).unwrap();
    assert_eq!(mid, "1,005.0");
    assert!(low.starts_with("1,00"));
    assert!(high.starts_with("1,00"));
}

#[test]
fn test_report_for_a_fermi_estimate() {
    let mut sampler = common::seeded(12, 50_000);
    let mass = &sampler.normal(1_200.0, 1_600.0).unwrap() * &kilogram();
    let speed = &sampler.normal(25.0, 35.0).unwrap() * &(&meter() / &second());
    let energy = 0.5 * &(&mass * &speed.powi(2));

    let report = Report::new(&energy, 0.68).unwrap().with_names(&HumanNames::si());
    assert!(report.low < report.mid && report.mid < report.high);
    let text = report.to_string();
    assert!(text.ends_with("[kg m^2 s^-2] {energy}"), "{text}");
    assert!(text.contains(" to "), "{text}");
}
