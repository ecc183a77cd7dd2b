//! Plain-text reports for sampled quantities
//!
//! A [`Report`] is computed from a [`Quantity`] once and then displayed:
//!
//! ```text
//! 1,235. (1,230. to 1,241.) [kg m^2 s^-2] {energy}
//! ```
//!
//! The middle value is the median, the range is the central interval at the
//! requested confidence, and every number is rounded to the magnitude of
//! that range.

use crate::core_types::{Dimension, Quantity};
use crate::summary::{quantile_sorted, round_repr, DEFAULT_PADDING};
use crate::units::HumanNames;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
    pub dimension: Dimension,
    pub name: Option<String>,
}

impl Report {
    /// Quantiles at `(1 - confidence) / 2`, `0.5` and `(1 + confidence) / 2`.
    ///
    /// # Returns
    /// - `None` if the quantity has no samples or `confidence` is outside `[0, 1]`.
    pub fn new(quantity: &Quantity, confidence: f64) -> Option<Self> {
        if !(0.0..=1.0).contains(&confidence) {
            return None;
        }
        let sorted = quantity.sorted_values();
        let tail = (1.0 - confidence) / 2.0;
        Some(Self {
            low: quantile_sorted(&sorted, tail)?,
            mid: quantile_sorted(&sorted, 0.5)?,
            high: quantile_sorted(&sorted, 1.0 - tail)?,
            dimension: quantity.dimension().clone(),
            name: None,
        })
    }

    /// Attach the registry's label for this dimension, if it has one.
    pub fn with_names(mut self, names: &HumanNames) -> Self {
        self.name = names.lookup(&self.dimension).map(str::to_owned);
        self
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.range() > 0.0 {
            let (mid, low, high) = round_repr(self.mid, self.low, self.high, DEFAULT_PADDING);
            write!(f, "{mid} ({low} to {high})")?;
        } else {
            write!(f, "{}", self.mid)?;
        }
        write!(f, " [{}]", self.dimension)?;
        if let Some(name) = &self.name {
            write!(f, " {{{name}}}")?;
        }
        Ok(())
    }
}
