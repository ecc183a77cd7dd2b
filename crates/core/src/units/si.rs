//! SI base dimensions, units, prefixes and a few physical constants
//!
//! Flat data on top of the core types. Every unit is a single-sample
//! [`Quantity`], so `3.0 * &kilo_meter()` style expressions broadcast over
//! sampled quantities. Measured constants carry their published standard
//! uncertainty and are therefore drawn through a [`Sampler`].

use crate::core_types::{Dimension, Quantity};
use crate::error::Result;
use crate::sampling::Sampler;

// ============================================================================
// PREFIXES
// ============================================================================

/// Informal "lots", 1e27
pub const HELLA: f64 = 1e27;
pub const YOTTA: f64 = 1e24;
pub const ZETTA: f64 = 1e21;
pub const EXA: f64 = 1e18;
pub const PETA: f64 = 1e15;
pub const TERA: f64 = 1e12;
pub const GIGA: f64 = 1e9;
pub const MEGA: f64 = 1e6;
/// Not an official SI prefix
pub const MYRIA: f64 = 1e4;
pub const KILO: f64 = 1e3;
pub const HECTO: f64 = 1e2;
pub const DECA: f64 = 1e1;
pub const DECI: f64 = 1e-1;
pub const CENTI: f64 = 1e-2;
pub const MILLI: f64 = 1e-3;
pub const MICRO: f64 = 1e-6;
pub const NANO: f64 = 1e-9;
pub const PICO: f64 = 1e-12;
pub const FEMTO: f64 = 1e-15;
pub const ATTO: f64 = 1e-18;
pub const ZEPTO: f64 = 1e-21;
pub const YOCTO: f64 = 1e-24;

// ============================================================================
// BASE DIMENSIONS
// ============================================================================

pub fn length() -> Dimension {
    Dimension::make("m")
}

pub fn time() -> Dimension {
    Dimension::make("s")
}

pub fn mass() -> Dimension {
    Dimension::make("kg")
}

pub fn current() -> Dimension {
    Dimension::make("A")
}

pub fn temperature() -> Dimension {
    Dimension::make("K")
}

pub fn amount() -> Dimension {
    Dimension::make("mol")
}

pub fn luminous_intensity() -> Dimension {
    Dimension::make("cd")
}

pub fn information() -> Dimension {
    Dimension::make("bit")
}

pub fn currency() -> Dimension {
    Dimension::make("dollar")
}

// ============================================================================
// UNITS
// ============================================================================

fn unit(dimension: Dimension) -> Quantity {
    Quantity::scalar(1.0, dimension)
}

pub fn meter() -> Quantity {
    unit(length())
}

pub fn second() -> Quantity {
    unit(time())
}

pub fn kilogram() -> Quantity {
    unit(mass())
}

pub fn gram() -> Quantity {
    kilogram() * MILLI
}

pub fn ampere() -> Quantity {
    unit(current())
}

pub fn kelvin() -> Quantity {
    unit(temperature())
}

pub fn mole() -> Quantity {
    unit(amount())
}

pub fn candela() -> Quantity {
    unit(luminous_intensity())
}

pub fn bit() -> Quantity {
    unit(information())
}

pub fn dollar() -> Quantity {
    unit(currency())
}

/// kg m s^-2
pub fn newton() -> Quantity {
    &(&kilogram() * &meter()) / &second().powi(2)
}

pub fn joule() -> Quantity {
    &newton() * &meter()
}

pub fn watt() -> Quantity {
    &joule() / &second()
}

pub fn pascal() -> Quantity {
    &newton() / &meter().powi(2)
}

pub fn coulomb() -> Quantity {
    &ampere() * &second()
}

pub fn volt() -> Quantity {
    &watt() / &ampere()
}

pub fn ohm() -> Quantity {
    &volt() / &ampere()
}

pub fn hertz() -> Quantity {
    second().powi(-1)
}

pub fn minute() -> Quantity {
    second() * 60.0
}

pub fn hour() -> Quantity {
    minute() * 60.0
}

pub fn day() -> Quantity {
    hour() * 24.0
}

pub fn week() -> Quantity {
    day() * 7.0
}

/// Conventional standard gravity, exact by definition.
pub fn standard_gravity() -> Quantity {
    9.80665 * &(&meter() / &second().powi(2))
}

// ============================================================================
// MEASURED CONSTANTS
// ============================================================================

/// `value ± sigma` in `unit`.
fn measured(sampler: &mut Sampler, value: f64, sigma: f64, unit: &Quantity) -> Result<Quantity> {
    Ok(&sampler.plusminus(value, sigma)? * unit)
}

/// Newtonian constant of gravitation (CODATA 2014).
pub fn gravitational_constant(sampler: &mut Sampler) -> Result<Quantity> {
    let unit = &(&newton() * &meter().powi(2)) / &kilogram().powi(2);
    measured(sampler, 6.67408e-11, 0.00031e-11, &unit)
}

pub fn boltzmann(sampler: &mut Sampler) -> Result<Quantity> {
    measured(sampler, 1.38064852e-23, 0.00000079e-23, &(&joule() / &kelvin()))
}

pub fn elementary_charge(sampler: &mut Sampler) -> Result<Quantity> {
    measured(sampler, 1.6021766208e-19, 0.0000000098e-19, &coulomb())
}

pub fn planck(sampler: &mut Sampler) -> Result<Quantity> {
    measured(sampler, 6.626070040e-34, 0.000000081e-34, &(&joule() * &second()))
}

pub fn avogadro(sampler: &mut Sampler) -> Result<Quantity> {
    measured(sampler, 6.022140857e23, 0.000000074e23, &mole().powi(-1))
}

/// Calendar year length: 303 common and 97 leap years per 400-year
/// Gregorian cycle.
pub fn year(sampler: &mut Sampler) -> Result<Quantity> {
    let days = sampler.data(&[365.0, 366.0], Some(&[303.0, 97.0]))?;
    Ok(&days * &day())
}

/// Calendar month length over the same 400-year cycle (4800 months).
pub fn month(sampler: &mut Sampler) -> Result<Quantity> {
    let days = sampler.data(&[31.0, 29.0, 30.0, 28.0], Some(&[2800.0, 97.0, 1600.0, 303.0]))?;
    Ok(&days * &day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::SamplingConfig;
    use approx::assert_relative_eq;

    #[test]
    fn test_derived_unit_dimensions() {
        assert_eq!(newton().dimension().to_string(), "kg m s^-2");
        assert_eq!(joule().dimension().to_string(), "kg m^2 s^-2");
        assert_eq!(watt().dimension().to_string(), "kg m^2 s^-3");
        assert_eq!(pascal().dimension().to_string(), "kg m^-1 s^-2");
        assert_eq!(volt().dimension(), &(joule().dimension() / coulomb().dimension()));
        assert!((&hertz() * &second()).is_dimensionless());
    }

    #[test]
    fn test_scaled_units() {
        assert_relative_eq!(week().as_scalar().unwrap(), 604_800.0);
        assert_relative_eq!(gram().as_scalar().unwrap(), 1e-3);
        assert_eq!(gram().dimension(), &mass());
        assert_relative_eq!(KILO * MILLI, 1.0);
    }

    #[test]
    fn test_calendar_means() {
        let mut sampler =
            Sampler::seeded(11, SamplingConfig::default().with_samples(100_000)).unwrap();
        let year = year(&mut sampler).unwrap();
        assert_eq!(year.dimension(), &time());
        let days = year.mean().unwrap().as_scalar().unwrap() / 86_400.0;
        assert_relative_eq!(days, 365.2425, epsilon = 0.01);

        let month = month(&mut sampler).unwrap();
        let days = month.mean().unwrap().as_scalar().unwrap() / 86_400.0;
        assert_relative_eq!(days, 365.2425 / 12.0, epsilon = 0.02);
    }

    #[test]
    fn test_constants_carry_units() {
        let mut sampler = Sampler::seeded(5, SamplingConfig::default().with_samples(1_000)).unwrap();
        let g = gravitational_constant(&mut sampler).unwrap();
        assert_eq!(g.dimension().to_string(), "kg^-1 m^3 s^-2");
        assert_relative_eq!(g.mean().unwrap().as_scalar().unwrap(), 6.67408e-11, max_relative = 1e-4);
        let k = boltzmann(&mut sampler).unwrap();
        assert_eq!(k.dimension(), &(joule().dimension() / &temperature()));
        let e = elementary_charge(&mut sampler).unwrap();
        let h = planck(&mut sampler).unwrap();
        let n_a = avogadro(&mut sampler).unwrap();
        assert_eq!(n_a.dimension(), &amount().recip());
        // e^2 / h has the dimension of conductance
        let conductance = &(&e * &e) / &h;
        assert_eq!(conductance.dimension(), &(ampere().dimension() / volt().dimension()));
    }
}
