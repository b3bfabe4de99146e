//! A magnitude paired with a [`Unit`].

use super::conversion::{ConversionError, Unit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric value carrying a physical unit.
///
/// Quantities are only ever converted explicitly. Comparing or combining
/// quantities with incompatible units is an error rather than a coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Shorthand for a quantity in a single registered unit symbol.
    ///
    /// ```
    /// use rpsg_core::units::Quantity;
    ///
    /// let g = Quantity::of(9.81, "m s-2");
    /// assert_eq!(g.unit.normalized(), "m / s^2");
    /// ```
    ///
    /// Strings that do not parse fall back to being treated as a single
    /// symbol, which then fails on first conversion.
    pub fn of(value: f64, unit: &str) -> Self {
        let unit = Unit::parse(unit).unwrap_or_else(|_| Unit::from_symbol(unit));
        Self { value, unit }
    }

    /// A quantity without physical dimension.
    pub fn dimensionless(value: f64) -> Self {
        Self::new(value, Unit::dimensionless())
    }

    pub fn is_compatible(&self, unit: &Unit) -> bool {
        self.unit.is_compatible(unit)
    }

    /// Converts this quantity into `unit`.
    pub fn to(&self, unit: &Unit) -> Result<Self, ConversionError> {
        Ok(Self::new(self.to_value(unit)?, unit.clone()))
    }

    /// The magnitude of this quantity expressed in `unit`.
    pub fn to_value(&self, unit: &Unit) -> Result<f64, ConversionError> {
        self.unit.convert_to(self.value, unit)
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self::dimensionless(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_dimensionless() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}
