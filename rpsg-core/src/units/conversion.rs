//! Unit conversion calculations.
//!
//! This module provides the high-level [`Unit`] type that combines parsing,
//! normalization, and conversion into a single API.
//!
//! # Example
//!
//! ```
//! use rpsg_core::units::Unit;
//!
//! let a = Unit::parse("m s-2").unwrap();
//! let b = Unit::parse("m / s^2").unwrap();
//! assert_eq!(a, b);
//!
//! let au = Unit::parse("AU").unwrap();
//! let km = Unit::parse("km").unwrap();
//! let factor = au.conversion_factor(&km).unwrap();
//! assert!((factor - 1.495978707e8).abs() < 1.0);
//! ```

use super::dimension::Dimension;
use super::parser::{ParseError, ParsedUnit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Error type for unit conversion failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Units have incompatible dimensions (or mix linear and logarithmic scales).
    #[error("cannot convert from '{from_unit}' to '{to_unit}': incompatible dimensions ({from} vs {to})")]
    IncompatibleDimensions {
        from: Dimension,
        to: Dimension,
        from_unit: String,
        to_unit: String,
    },
    /// One of the units could not be resolved.
    #[error("unit parse error: {0}")]
    ParseError(#[from] ParseError),
}

/// Whether magnitudes in a unit are linear or base-10 logarithms.
///
/// A logarithmic unit `log(um)` holds `log10(x / 1 um)`. Converting between
/// two logarithmic units of the same dimension is an additive shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UnitKind {
    #[default]
    Linear,
    Logarithmic,
}

/// A parsed and validated unit.
///
/// # Equality
///
/// Two units are equal if they have the same normalized representation and
/// the same [`UnitKind`]. `Unit::parse("km/s") == Unit::parse("km s-1")`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// The original input string (preserved for display).
    original: String,
    parsed: ParsedUnit,
    kind: UnitKind,
}

impl Unit {
    /// Parses a unit string.
    ///
    /// `log(<unit>)` produces a logarithmic unit.
    ///
    /// ```
    /// use rpsg_core::units::{Unit, UnitKind};
    ///
    /// let size = Unit::parse("log(um)").unwrap();
    /// assert_eq!(size.kind(), UnitKind::Logarithmic);
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        if let Some(inner) = trimmed
            .strip_prefix("log(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Ok(Self {
                original: input.to_string(),
                parsed: ParsedUnit::parse(inner)?,
                kind: UnitKind::Logarithmic,
            });
        }
        Ok(Self {
            original: input.to_string(),
            parsed: ParsedUnit::parse(input)?,
            kind: UnitKind::Linear,
        })
    }

    /// Builds a unit from a single registered symbol without parsing.
    ///
    /// The symbol is resolved against the registry lazily, so an unknown
    /// symbol surfaces when the unit is first compared or converted.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Self {
        Self::compound(&[(symbol, 1)])
    }

    /// Builds a unit from `(symbol, exponent)` pairs without parsing.
    #[must_use]
    pub fn compound(parts: &[(&str, i32)]) -> Self {
        let mut components = BTreeMap::new();
        for (symbol, exp) in parts {
            *components.entry((*symbol).to_string()).or_insert(0) += exp;
        }
        let parsed = ParsedUnit::from_components(components);
        Self {
            original: parsed.normalized(),
            parsed,
            kind: UnitKind::Linear,
        }
    }

    /// The dimensionless unit.
    #[must_use]
    pub fn dimensionless() -> Self {
        Self {
            original: "1".to_string(),
            parsed: ParsedUnit::dimensionless(),
            kind: UnitKind::Linear,
        }
    }

    /// Returns the logarithmic counterpart of this unit.
    #[must_use]
    pub fn logarithmic(&self) -> Self {
        Self {
            original: format!("log({})", self.normalized()),
            parsed: self.parsed.clone(),
            kind: UnitKind::Logarithmic,
        }
    }

    /// Returns the original input string.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[must_use]
    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    #[must_use]
    pub fn is_logarithmic(&self) -> bool {
        self.kind == UnitKind::Logarithmic
    }

    /// Returns the normalized string representation (without any `log()` wrapper).
    #[must_use]
    pub fn normalized(&self) -> String {
        self.parsed.normalized()
    }

    /// Returns true if this unit is linear and physically dimensionless.
    ///
    /// Returns false if the dimension cannot be computed (unknown unit).
    #[must_use]
    pub fn is_dimensionless(&self) -> bool {
        self.kind == UnitKind::Linear && self.parsed.is_dimensionless().unwrap_or(false)
    }

    /// Returns the physical dimension of this unit.
    pub fn dimension(&self) -> Result<Dimension, ParseError> {
        self.parsed.dimension()
    }

    /// Returns the conversion factor to coherent base units.
    pub fn to_si_factor(&self) -> Result<f64, ParseError> {
        self.parsed.to_si_factor()
    }

    /// Returns true if this unit can be converted to the target unit.
    ///
    /// Units are compatible if they have the same physical dimension and the
    /// same scale kind.
    pub fn is_compatible(&self, other: &Self) -> bool {
        if self.kind != other.kind {
            return false;
        }
        match (self.dimension(), other.dimension()) {
            (Ok(d1), Ok(d2)) => d1.is_compatible(&d2),
            _ => false,
        }
    }

    /// Calculates the multiplicative factor from this unit to the target unit.
    ///
    /// For logarithmic units this is the ratio of the underlying linear units;
    /// use [`Unit::convert_to`] to convert magnitudes.
    ///
    /// # Errors
    ///
    /// Returns an error if the units have incompatible dimensions or kinds.
    pub fn conversion_factor(&self, other: &Self) -> Result<f64, ConversionError> {
        let dim_self = self.dimension()?;
        let dim_other = other.dimension()?;

        if !dim_self.is_compatible(&dim_other) || self.kind != other.kind {
            return Err(ConversionError::IncompatibleDimensions {
                from: dim_self,
                to: dim_other,
                from_unit: self.to_string(),
                to_unit: other.to_string(),
            });
        }

        // value_self * factor_self = base value = value_other * factor_other
        Ok(self.to_si_factor()? / other.to_si_factor()?)
    }

    /// Converts a magnitude from this unit to the target unit.
    pub fn convert_to(&self, value: f64, other: &Self) -> Result<f64, ConversionError> {
        let factor = self.conversion_factor(other)?;
        Ok(match self.kind {
            UnitKind::Linear => value * factor,
            UnitKind::Logarithmic => value + factor.log10(),
        })
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.parsed == other.parsed
    }
}

impl Eq for Unit {}

impl std::hash::Hash for Unit {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.parsed.hash(state);
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            UnitKind::Linear => write!(f, "{}", self.normalized()),
            UnitKind::Logarithmic => write!(f, "log({})", self.normalized()),
        }
    }
}

/// Calculates the conversion factor between two unit strings.
///
/// ```
/// use rpsg_core::units::conversion_factor;
///
/// let factor = conversion_factor("bar", "Pa").unwrap();
/// assert!((factor - 1e5).abs() < 1e-6);
/// ```
pub fn conversion_factor(from: &str, to: &str) -> Result<f64, ConversionError> {
    Unit::parse(from)?.conversion_factor(&Unit::parse(to)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::registry::EARTH_MASS;

    #[test]
    fn test_unit_equality_across_notations() {
        let a = Unit::parse("km/s").unwrap();
        let b = Unit::parse("km s-1").unwrap();
        let c = Unit::compound(&[("km", 1), ("s", -1)]);
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_is_compatible() {
        let accel = Unit::parse("m s-2").unwrap();
        let density = Unit::parse("g cm-3").unwrap();
        let kg = Unit::from_symbol("kg");
        let earth = Unit::from_symbol("M_earth");

        assert!(!accel.is_compatible(&density));
        assert!(earth.is_compatible(&kg));
        assert!(!kg.is_compatible(&accel));
    }

    #[test]
    fn test_earth_mass_to_kg() {
        let earth = Unit::from_symbol("M_earth");
        let kg = Unit::from_symbol("kg");
        let factor = earth.conversion_factor(&kg).unwrap();
        assert!((factor - EARTH_MASS).abs() / EARTH_MASS < 1e-12);
    }

    #[test]
    fn test_pressure_conversions() {
        let atm = Unit::from_symbol("atm");
        let torr = Unit::from_symbol("torr");
        let converted = atm.convert_to(1.0, &torr).unwrap();
        assert!((converted - 760.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_conversion() {
        let deg = Unit::from_symbol("deg");
        let arcsec = Unit::from_symbol("arcsec");
        assert!((deg.convert_to(1.0, &arcsec).unwrap() - 3600.0).abs() < 1e-6);
    }

    #[test]
    fn test_incompatible_dimensions_error() {
        let s = Unit::from_symbol("s");
        let kg = Unit::from_symbol("kg");
        assert!(matches!(
            s.conversion_factor(&kg),
            Err(ConversionError::IncompatibleDimensions { .. })
        ));
    }

    #[test]
    fn test_logarithmic_units() {
        let log_um = Unit::parse("log(um)").unwrap();
        let log_m = Unit::from_symbol("m").logarithmic();
        let um = Unit::from_symbol("um");

        assert!(log_um.is_logarithmic());
        assert!(!log_um.is_compatible(&um));
        assert!(log_um.is_compatible(&log_m));
        assert!(!log_um.is_dimensionless());

        // log10(1 um) = log10(1e-6 m)
        let shifted = log_um.convert_to(0.0, &log_m).unwrap();
        assert!((shifted + 6.0).abs() < 1e-12);
        assert_eq!(log_um.to_string(), "log(um)");
    }

    #[test]
    fn test_unknown_symbol_is_not_compatible() {
        let bogus = Unit::from_symbol("furlong");
        let m = Unit::from_symbol("m");
        assert!(!bogus.is_compatible(&m));
        assert!(matches!(
            bogus.conversion_factor(&m),
            Err(ConversionError::ParseError(ParseError::UnknownUnit(_)))
        ));
    }

    #[test]
    fn test_conversion_factor_helper() {
        let factor = conversion_factor("AU", "km").unwrap();
        assert!((factor - 1.495_978_707e8).abs() < 1e-3);
    }

    #[test]
    fn test_original_preserved() {
        let unit = Unit::parse("g  mol-1").unwrap();
        assert_eq!(unit.original(), "g  mol-1");
        assert_eq!(unit.normalized(), "g / mol");
    }
}
