//! Human-readable labels for common dimensions
//!
//! [`HumanNames`] is an ordinary value: build it once (usually with
//! [`HumanNames::si`]) and hand it to whatever renders output. Nothing in the
//! dimension algebra or the quantity engine looks labels up.

use super::si::{
    coulomb, currency, current, joule, length, mass, ohm, temperature, time, volt, watt,
};
use crate::core_types::{Dimension, DIMENSIONLESS};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct HumanNames {
    names: FxHashMap<Dimension, String>,
}

impl HumanNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels for the SI base dimensions and the usual derived ones.
    ///
    /// Entries are stored in a fixed order; a later entry for the same
    /// dimension replaces an earlier one.
    pub fn si() -> Self {
        let m = length();
        let s = time();
        let kg = mass();
        let a = current();
        let k = temperature();
        let per_s = s.recip();

        let energy = joule().dimension().clone();
        let potential = volt().dimension().clone();
        let weber = &potential * &s;

        let entries: Vec<(Dimension, &str)> = vec![
            (m.clone(), "length"),
            (s.clone(), "time"),
            (kg.clone(), "mass"),
            (a.clone(), "current"),
            (k.clone(), "temperature"),
            (currency(), "currency"),
            (Dimension::make("mol"), "amount of substance"),
            (Dimension::make("bit"), "information"),
            (Dimension::make("cd"), "luminous intensity"),
            (DIMENSIONLESS, "dimensionless"),
            (m.powi(2), "area"),
            (m.powi(3), "volume"),
            (per_s.clone(), "frequency"),
            (&m * &per_s, "velocity"),
            (&m / &s.powi(2), "acceleration"),
            (&(&m * &kg) / &s, "momentum"),
            (&(&m * &kg) / &s.powi(2), "force"),
            (watt().dimension().clone(), "power"),
            (&kg / &(&m * &s.powi(2)), "pressure"),
            (energy.clone(), "energy"),
            (&(&m.powi(2) * &kg) / &s, "angular momentum"),
            (&m.powi(2) * &kg, "moment of inertia"),
            (&m.powi(3) / &s, "flow"),
            (&kg / &m.powi(3), "mass density"),
            (&m.powi(3) / &kg, "specific volume"),
            (&a / &m.powi(2), "electric current density"),
            (&currency() / &kg, "price per mass"),
            (&energy / &m.powi(2), "surface tension"),
            (coulomb().dimension().clone(), "charge"),
            (coulomb().dimension() / &m.powi(2), "surface charge density"),
            (coulomb().dimension() / &m.powi(3), "electric charge density"),
            (potential.clone(), "electric potential"),
            (&potential / &m, "electric field strength"),
            (&a / &m, "magnetic field strength"),
            (ohm().dimension().clone(), "electric resistance"),
            (ohm().dimension().recip(), "electric conductance"),
            (weber.clone(), "magnetic flux"),
            (&weber / &a, "inductance"),
            (&weber / &m.powi(2), "magnetic flux density"),
            (&energy / &k, "heat capacity"),
            (&energy / &(&kg * &k), "specific heat capacity"),
        ];

        let mut names = Self::new();
        for (dimension, name) in entries {
            names.store(dimension, name);
        }
        names
    }

    /// Label `dimension`, replacing any existing label.
    pub fn store(&mut self, dimension: Dimension, name: impl Into<String>) {
        self.names.insert(dimension, name.into());
    }

    pub fn lookup(&self, dimension: &Dimension) -> Option<&str> {
        self.names.get(dimension).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
