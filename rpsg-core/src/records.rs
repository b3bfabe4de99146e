//! Molecule and aerosol records for the atmosphere composition blocks.
//!
//! A record stores its abundance already expressed in a unit PSG understands,
//! together with that unit's code. Scalars are written with code `scl`.

use crate::errors::{RPSGError, RPSGResult};
use crate::units::{Quantity, Unit};
use serde::{Deserialize, Serialize};

/// Units with a PSG abundance code, as `(unit symbol, code)`.
///
/// PSG only knows the volume mixing-ratio spellings, so `ppm` is written as
/// `ppmv`. Codes are looked up from the first matching entry.
const ABUNDANCE_CODES: &[(&str, &str)] = &[
    ("pct", "%"),
    ("ppmv", "ppmv"),
    ("ppbv", "ppbv"),
    ("pptv", "pptv"),
    ("ppm", "ppmv"),
    ("ppb", "ppbv"),
    ("ppt", "pptv"),
];

pub const SCALE_CODE: &str = "scl";
const MICRON_CODE: &str = "um";
const LOG_MICRON_CODE: &str = "lum";

/// Expresses an abundance as `(magnitude, code)`.
fn code_abundance(abundance: &Quantity) -> RPSGResult<(f64, String)> {
    for (symbol, code) in ABUNDANCE_CODES {
        if abundance.unit == Unit::from_symbol(symbol) {
            return Ok((abundance.value, (*code).to_string()));
        }
    }
    if !abundance.unit.is_dimensionless() {
        return Err(RPSGError::UnitMismatch {
            expected: "a dimensionless abundance".to_string(),
            got: abundance.unit.to_string(),
        });
    }
    let value = abundance.to_value(&Unit::dimensionless())?;
    Ok((value, SCALE_CODE.to_string()))
}

/// Looks up the unit named by an abundance code.
fn abundance_unit(code: &str) -> RPSGResult<Unit> {
    if code == SCALE_CODE {
        return Ok(Unit::dimensionless());
    }
    ABUNDANCE_CODES
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(symbol, _)| Unit::from_symbol(symbol))
        .ok_or_else(|| RPSGError::value_error("abundance unit", format!("unknown code {code:?}")))
}

fn code_size(size: &Quantity) -> RPSGResult<(f64, String)> {
    let micron = Unit::from_symbol("um");
    if size.unit.is_logarithmic() {
        let value = size.to_value(&micron.logarithmic())?;
        return Ok((value, LOG_MICRON_CODE.to_string()));
    }
    if size.unit.is_dimensionless() {
        let value = size.to_value(&Unit::dimensionless())?;
        return Ok((value, SCALE_CODE.to_string()));
    }
    Ok((size.to_value(&micron)?, MICRON_CODE.to_string()))
}

fn size_unit(code: &str) -> RPSGResult<Unit> {
    match code {
        SCALE_CODE => Ok(Unit::dimensionless()),
        MICRON_CODE => Ok(Unit::from_symbol("um")),
        LOG_MICRON_CODE => Ok(Unit::from_symbol("um").logarithmic()),
        other => Err(RPSGError::value_error(
            "aerosol size unit",
            format!("unknown code {other:?}"),
        )),
    }
}

/// A gas in the atmosphere composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Molecule {
    pub name: String,
    /// Line-list or database reference, e.g. `HIT[1]`.
    pub kind: String,
    pub abn: f64,
    pub unit_code: String,
}

impl Molecule {
    /// ```
    /// use rpsg_core::records::Molecule;
    /// use rpsg_core::units::Quantity;
    ///
    /// let water = Molecule::new("H2O", "HIT[1]", Quantity::of(1.0, "%")).unwrap();
    /// assert_eq!(water.unit_code, "%");
    /// let co2 = Molecule::new("CO2", "HIT[2]", 1.0).unwrap();
    /// assert_eq!(co2.unit_code, "scl");
    /// ```
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        abundance: impl Into<Quantity>,
    ) -> RPSGResult<Self> {
        let (abn, unit_code) = code_abundance(&abundance.into())?;
        Ok(Self {
            name: name.into(),
            kind: kind.into(),
            abn,
            unit_code,
        })
    }

    /// Rebuilds a molecule from values already in coded form.
    pub fn from_code(name: &str, kind: &str, abn: f64, unit_code: &str) -> RPSGResult<Self> {
        Self::new(name, kind, Quantity::new(abn, abundance_unit(unit_code)?))
    }

    pub fn abundance(&self) -> RPSGResult<Quantity> {
        Ok(Quantity::new(self.abn, abundance_unit(&self.unit_code)?))
    }
}

/// An aerosol in the atmosphere composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aerosol {
    pub name: String,
    pub kind: String,
    pub abn: f64,
    pub unit_code: String,
    /// Particle size, in the unit named by `size_unit_code`.
    pub size: f64,
    pub size_unit_code: String,
}

impl Aerosol {
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        abundance: impl Into<Quantity>,
        size: impl Into<Quantity>,
    ) -> RPSGResult<Self> {
        let (abn, unit_code) = code_abundance(&abundance.into())?;
        let (size, size_unit_code) = code_size(&size.into())?;
        Ok(Self {
            name: name.into(),
            kind: kind.into(),
            abn,
            unit_code,
            size,
            size_unit_code,
        })
    }

    pub fn from_code(
        name: &str,
        kind: &str,
        abn: f64,
        unit_code: &str,
        size: f64,
        size_unit_code: &str,
    ) -> RPSGResult<Self> {
        Self::new(
            name,
            kind,
            Quantity::new(abn, abundance_unit(unit_code)?),
            Quantity::new(size, size_unit(size_unit_code)?),
        )
    }

    pub fn abundance(&self) -> RPSGResult<Quantity> {
        Ok(Quantity::new(self.abn, abundance_unit(&self.unit_code)?))
    }

    pub fn particle_size(&self) -> RPSGResult<Quantity> {
        Ok(Quantity::new(self.size, size_unit(&self.size_unit_code)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn test_molecule_percent() {
        let mol = Molecule::new("H2O", "HIT[1]", Quantity::of(1.0, "%")).unwrap();
        assert!(is_close!(mol.abn, 1.0));
        assert_eq!(mol.unit_code, "%");
    }

    #[test]
    fn test_molecule_scalar() {
        let mol = Molecule::new("H2O", "HIT[1]", 1.0).unwrap();
        assert!(is_close!(mol.abn, 1.0));
        assert_eq!(mol.unit_code, "scl");
    }

    #[test]
    fn test_molecule_ppm_uses_volume_code() {
        let mol = Molecule::new("CH4", "HIT[6]", Quantity::of(1800.0, "ppb")).unwrap();
        assert_eq!(mol.unit_code, "ppbv");
        assert!(is_close!(mol.abn, 1800.0));
    }

    #[test]
    fn test_molecule_rejects_dimensional_abundance() {
        let err = Molecule::new("H2O", "HIT[1]", Quantity::of(1.0, "kg")).unwrap_err();
        assert!(matches!(err, RPSGError::UnitMismatch { .. }));
    }

    #[test]
    fn test_aerosol_codes() {
        let aero = Aerosol::new("Water", "watertype", 1.0, Quantity::of(1.0, "um")).unwrap();
        assert_eq!(aero.unit_code, "scl");
        assert!(is_close!(aero.size, 1.0));
        assert_eq!(aero.size_unit_code, "um");

        let log_um = Unit::from_symbol("um").logarithmic();
        let aero = Aerosol::new(
            "Water",
            "watertype",
            Quantity::of(1.0, "%"),
            Quantity::new(4.0, log_um),
        )
        .unwrap();
        assert_eq!(aero.unit_code, "%");
        assert!(is_close!(aero.size, 4.0));
        assert_eq!(aero.size_unit_code, "lum");
    }

    #[test]
    fn test_aerosol_size_converted_to_microns() {
        let aero = Aerosol::new("Dust", "dust_dat", 1.0, Quantity::of(2.0, "mm")).unwrap();
        assert!(is_close!(aero.size, 2000.0));
        assert_eq!(aero.size_unit_code, "um");

        let aero = Aerosol::new("Dust", "dust_dat", 1.0, 1.0).unwrap();
        assert_eq!(aero.size_unit_code, "scl");
    }

    #[test]
    fn test_from_code_round_trip() {
        let aero = Aerosol::from_code("WaterIce", "waterice_dat", 10.0, "ppmv", 3.0, "lum").unwrap();
        assert_eq!(aero.unit_code, "ppmv");
        assert_eq!(aero.size_unit_code, "lum");
        assert!(is_close!(aero.size, 3.0));

        assert!(Molecule::from_code("H2O", "HIT[1]", 1.0, "furlongs").is_err());
    }
}
