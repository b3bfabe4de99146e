//! Unit registry with the units PSG configurations are written in.
//!
//! This module provides a registry of known units with their dimensions
//! and conversion factors to SI base units. It includes:
//!
//! - SI base units and prefixes
//! - Astronomical lengths and masses (`AU`, `pc`, `R_sun`, `M_earth`, ...)
//! - Angles, pressures, frequencies and mixing ratios
//! - PSG pseudo units (`diameter`, `diffraction`, `resolving_power`)
//!
//! # Conversion Factor Convention
//!
//! All conversion factors are defined as the multiplier to convert FROM
//! the registered unit TO the coherent base unit. For example:
//! - AU has factor 1.495978707e11 (1 AU = 1.495978707e11 m)
//! - deg has factor π/180 (1 deg = 0.01745 rad)

use super::dimension::Dimension;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::LazyLock;

/// Information about a known unit.
#[derive(Debug, Clone)]
pub struct UnitInfo {
    /// The canonical name of this unit.
    pub name: String,
    /// The physical dimension of this unit.
    pub dimension: Dimension,
    /// Conversion factor to the coherent base unit.
    pub to_si_factor: f64,
    /// The base unit a prefixed unit was derived from.
    pub base_unit: Option<String>,
}

impl UnitInfo {
    fn new(name: &str, dimension: Dimension, to_si_factor: f64) -> Self {
        Self {
            name: name.to_string(),
            dimension,
            to_si_factor,
            base_unit: None,
        }
    }
}

/// SI prefix multipliers.
#[derive(Debug, Clone, Copy)]
pub struct SiPrefix {
    pub symbol: &'static str,
    pub factor: f64,
}

/// All SI prefixes from yocto to yotta.
pub static SI_PREFIXES: &[SiPrefix] = &[
    SiPrefix { symbol: "Y", factor: 1e24 },
    SiPrefix { symbol: "Z", factor: 1e21 },
    SiPrefix { symbol: "E", factor: 1e18 },
    SiPrefix { symbol: "P", factor: 1e15 },
    SiPrefix { symbol: "T", factor: 1e12 },
    SiPrefix { symbol: "G", factor: 1e9 },
    SiPrefix { symbol: "M", factor: 1e6 },
    SiPrefix { symbol: "k", factor: 1e3 },
    SiPrefix { symbol: "h", factor: 1e2 },
    SiPrefix { symbol: "da", factor: 1e1 },
    SiPrefix { symbol: "d", factor: 1e-1 },
    SiPrefix { symbol: "c", factor: 1e-2 },
    SiPrefix { symbol: "m", factor: 1e-3 },
    // 'u' stands in for micro (μ)
    SiPrefix { symbol: "u", factor: 1e-6 },
    SiPrefix { symbol: "n", factor: 1e-9 },
    SiPrefix { symbol: "p", factor: 1e-12 },
    SiPrefix { symbol: "f", factor: 1e-15 },
    SiPrefix { symbol: "a", factor: 1e-18 },
    SiPrefix { symbol: "z", factor: 1e-21 },
    SiPrefix { symbol: "y", factor: 1e-24 },
];

/// Seconds per Julian year.
pub const SECONDS_PER_YEAR: f64 = 365.25 * 24.0 * 3600.0;
/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 24.0 * 3600.0;
/// Seconds per hour.
pub const SECONDS_PER_HOUR: f64 = 3600.0;
/// Seconds per minute.
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Astronomical unit in metres (IAU 2012).
pub const METRES_PER_AU: f64 = 1.495_978_707e11;
/// Parsec in metres.
pub const METRES_PER_PARSEC: f64 = 3.085_677_581_491_367e16;
/// Nominal solar radius in metres.
pub const SOLAR_RADIUS: f64 = 6.957e8;
/// Nominal equatorial Earth radius in metres.
pub const EARTH_RADIUS: f64 = 6.378_1e6;
/// Nominal equatorial Jupiter radius in metres.
pub const JUPITER_RADIUS: f64 = 7.149_2e7;
/// Solar mass in kilograms.
pub const SOLAR_MASS: f64 = 1.988_409_870_698_051e30;
/// Earth mass in kilograms.
pub const EARTH_MASS: f64 = 5.972_167_867_791_379e24;
/// Jupiter mass in kilograms.
pub const JUPITER_MASS: f64 = 1.898_124_597_336_050_5e27;

/// Standard atmosphere in pascal.
pub const PASCALS_PER_ATM: f64 = 101_325.0;
/// Pound-force per square inch in pascal.
pub const PASCALS_PER_PSI: f64 = 6_894.757_293_168_361;

/// The global unit registry.
pub static UNIT_REGISTRY: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Registry of known units with their dimensions and conversion factors.
#[derive(Debug)]
pub struct UnitRegistry {
    /// Map from unit symbol to unit info.
    units: HashMap<&'static str, UnitInfo>,
    /// Map from alias to canonical name.
    aliases: HashMap<&'static str, &'static str>,
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRegistry {
    /// Creates a new unit registry populated with the standard units.
    pub fn new() -> Self {
        let mut registry = Self {
            units: HashMap::new(),
            aliases: HashMap::new(),
        };
        registry.register_base_units();
        registry.register_time_units();
        registry.register_astronomical_units();
        registry.register_angle_units();
        registry.register_pressure_units();
        registry.register_mixing_ratio_units();
        registry.register_energy_units();
        registry.register_psg_units();
        registry
    }

    /// Looks up a unit by symbol, handling prefixes and aliases.
    pub fn lookup(&self, symbol: &str) -> Option<UnitInfo> {
        if let Some(info) = self.units.get(symbol) {
            return Some(info.clone());
        }

        if let Some(&canonical) = self.aliases.get(symbol) {
            if let Some(info) = self.units.get(canonical) {
                return Some(info.clone());
            }
        }

        self.lookup_prefixed(symbol)
    }

    /// Attempts to parse a symbol as a prefixed version of a base unit.
    fn lookup_prefixed(&self, symbol: &str) -> Option<UnitInfo> {
        // Longer prefixes first so "da" wins over "d"
        let mut prefixes: Vec<_> = SI_PREFIXES.iter().collect();
        prefixes.sort_by(|a, b| b.symbol.len().cmp(&a.symbol.len()));

        for prefix in prefixes {
            let Some(base_symbol) = symbol.strip_prefix(prefix.symbol) else {
                continue;
            };
            let base = self.units.get(base_symbol).or_else(|| {
                self.aliases
                    .get(base_symbol)
                    .and_then(|canonical| self.units.get(canonical))
            });
            if let Some(base_info) = base {
                return Some(UnitInfo {
                    name: symbol.to_string(),
                    dimension: base_info.dimension,
                    to_si_factor: base_info.to_si_factor * prefix.factor,
                    base_unit: Some(base_info.name.clone()),
                });
            }
        }
        None
    }

    fn insert(&mut self, symbol: &'static str, dimension: Dimension, factor: f64) {
        self.units
            .insert(symbol, UnitInfo::new(symbol, dimension, factor));
    }

    /// Registers SI base units.
    fn register_base_units(&mut self) {
        self.insert("kg", Dimension::MASS, 1.0);
        self.insert("g", Dimension::MASS, 1e-3);
        self.insert("t", Dimension::MASS, 1e3);
        self.insert("m", Dimension::LENGTH, 1.0);
        self.insert("s", Dimension::TIME, 1.0);
        self.insert("K", Dimension::TEMPERATURE, 1.0);
        self.insert("mol", Dimension::AMOUNT, 1.0);
        self.insert("A", Dimension::CURRENT, 1.0);
        self.insert("Hz", Dimension::FREQUENCY, 1.0);

        self.insert("1", Dimension::dimensionless(), 1.0);
        self.aliases.insert("dimensionless", "1");
        self.aliases.insert("scl", "1");
    }

    fn register_time_units(&mut self) {
        self.insert("yr", Dimension::TIME, SECONDS_PER_YEAR);
        self.insert("day", Dimension::TIME, SECONDS_PER_DAY);
        self.insert("h", Dimension::TIME, SECONDS_PER_HOUR);
        self.insert("min", Dimension::TIME, SECONDS_PER_MINUTE);

        self.aliases.insert("year", "yr");
        self.aliases.insert("years", "yr");
        self.aliases.insert("d", "day");
        self.aliases.insert("days", "day");
        self.aliases.insert("hour", "h");
        self.aliases.insert("hours", "h");
        self.aliases.insert("minute", "min");
        self.aliases.insert("minutes", "min");
        self.aliases.insert("sec", "s");
        self.aliases.insert("second", "s");
        self.aliases.insert("seconds", "s");
    }

    fn register_astronomical_units(&mut self) {
        self.insert("AU", Dimension::LENGTH, METRES_PER_AU);
        self.insert("pc", Dimension::LENGTH, METRES_PER_PARSEC);
        self.insert("AA", Dimension::LENGTH, 1e-10);
        self.insert("R_sun", Dimension::LENGTH, SOLAR_RADIUS);
        self.insert("R_earth", Dimension::LENGTH, EARTH_RADIUS);
        self.insert("R_jup", Dimension::LENGTH, JUPITER_RADIUS);
        self.insert("M_sun", Dimension::MASS, SOLAR_MASS);
        self.insert("M_earth", Dimension::MASS, EARTH_MASS);
        self.insert("M_jup", Dimension::MASS, JUPITER_MASS);

        self.aliases.insert("au", "AU");
        self.aliases.insert("Angstrom", "AA");
        self.aliases.insert("angstrom", "AA");
        self.aliases.insert("parsec", "pc");
    }

    fn register_angle_units(&mut self) {
        self.insert("rad", Dimension::ANGLE, 1.0);
        self.insert("deg", Dimension::ANGLE, PI / 180.0);
        self.insert("arcmin", Dimension::ANGLE, PI / (180.0 * 60.0));
        self.insert("arcsec", Dimension::ANGLE, PI / (180.0 * 3600.0));

        self.aliases.insert("degree", "deg");
        self.aliases.insert("degrees", "deg");
        self.aliases.insert("radian", "rad");
    }

    fn register_pressure_units(&mut self) {
        self.insert("Pa", Dimension::PRESSURE, 1.0);
        self.insert("bar", Dimension::PRESSURE, 1e5);
        self.insert("atm", Dimension::PRESSURE, PASCALS_PER_ATM);
        self.insert("torr", Dimension::PRESSURE, PASCALS_PER_ATM / 760.0);
        self.insert("psi", Dimension::PRESSURE, PASCALS_PER_PSI);

        self.aliases.insert("Torr", "torr");
    }

    /// Registers mixing ratios. All are dimensionless scale factors.
    fn register_mixing_ratio_units(&mut self) {
        let dimensionless = Dimension::dimensionless();
        self.insert("pct", dimensionless, 1e-2);
        self.insert("ppm", dimensionless, 1e-6);
        self.insert("ppb", dimensionless, 1e-9);
        self.insert("ppt", dimensionless, 1e-12);
        self.insert("ppmv", dimensionless, 1e-6);
        self.insert("ppbv", dimensionless, 1e-9);
        self.insert("pptv", dimensionless, 1e-12);

        self.aliases.insert("%", "pct");
        self.aliases.insert("percent", "pct");
    }

    fn register_energy_units(&mut self) {
        self.insert("J", Dimension::ENERGY, 1.0);
        self.insert("W", Dimension::POWER, 1.0);
    }

    /// Registers units that only exist in PSG configurations.
    fn register_psg_units(&mut self) {
        self.insert("electron", Dimension::ELECTRON, 1.0);
        self.insert("diameter", Dimension::DIAMETER, 1.0);
        self.insert("diffraction", Dimension::DIFFRACTION, 1.0);
        self.insert("resolving_power", Dimension::RESOLVING_POWER, 1.0);

        self.aliases.insert("electrons", "electron");
        self.aliases.insert("diffrac", "diffraction");
        self.aliases.insert("RP", "resolving_power");
    }
}
