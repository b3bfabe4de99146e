//! Telescope configurations, selected by `GENERATOR-TELESCOPE`.
//!
//! All telescopes share the aperture, beam and spectral range keywords.
//! `GENERATOR-TELESCOPE1` and `GENERATOR-TELESCOPE3` mean different things
//! per variant.

use rpsg_core::family::{Polymorphic, Variant};
use rpsg_core::field::{Field, UnitCode};
use rpsg_core::format::FloatFormat;
use rpsg_core::model::Schema;
use rpsg_core::units::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TelescopeKind {
    SingleDish,
    Interferometer,
    Coronagraph,
    Aotf,
    Lidar,
}

pub type Telescope = Polymorphic<TelescopeKind>;

const SCI4: FloatFormat = FloatFormat::Scientific(4);

fn beam_units() -> Vec<UnitCode> {
    vec![
        UnitCode::new(Unit::from_symbol("arcsec"), "arcsec", SCI4),
        UnitCode::new(Unit::from_symbol("arcmin"), "arcmin", SCI4),
        UnitCode::new(Unit::from_symbol("deg"), "deg", SCI4),
        UnitCode::new(Unit::from_symbol("km"), "km", SCI4),
        UnitCode::new(Unit::from_symbol("diameter"), "diameter", SCI4),
        UnitCode::new(Unit::from_symbol("diffraction"), "diffrac", SCI4),
    ]
}

/// Spectral units, in priority order.
fn spectral_units() -> Vec<UnitCode> {
    vec![
        UnitCode::new(Unit::from_symbol("um"), "um", SCI4),
        UnitCode::new(Unit::from_symbol("nm"), "nm", SCI4),
        UnitCode::new(Unit::from_symbol("mm"), "mm", SCI4),
        UnitCode::new(Unit::from_symbol("AA"), "An", SCI4),
        UnitCode::new(Unit::compound(&[("cm", -1)]), "cm", SCI4),
        UnitCode::new(Unit::from_symbol("MHz"), "MHz", SCI4),
        UnitCode::new(Unit::from_symbol("GHz"), "GHz", SCI4),
        UnitCode::new(Unit::from_symbol("kHz"), "kHz", SCI4),
    ]
}

fn resolution_units() -> Vec<UnitCode> {
    let mut units = vec![UnitCode::new(Unit::from_symbol("RP"), "RP", SCI4)];
    units.extend(spectral_units());
    units
}

fn shared() -> Schema {
    Schema::new()
        .field(
            "aperture",
            Field::quantity("generator-diamtele", Unit::from_symbol("m")),
        )
        .field("zodi", Field::float("generator-telescope2"))
        .field(
            "fov",
            Field::coded_quantity("generator-beam", "generator-beamunit", beam_units()),
        )
        .field(
            "range1",
            Field::coded_quantity("generator-range1", "generator-rangeunit", spectral_units()),
        )
        .field(
            "range2",
            Field::coded_quantity("generator-range2", "generator-rangeunit", spectral_units()),
        )
        .field(
            "resolution",
            Field::coded_quantity(
                "generator-resolution",
                "generator-resolutionunit",
                resolution_units(),
            ),
        )
}

impl Variant for TelescopeKind {
    const FAMILY: &'static str = "telescope";
    const DISCRIMINATOR: &'static str = "telescope";
    const TAG: &'static str = "GENERATOR-TELESCOPE";

    fn variants() -> &'static [Self] {
        &[
            Self::SingleDish,
            Self::Interferometer,
            Self::Coronagraph,
            Self::Aotf,
            Self::Lidar,
        ]
    }

    fn tag(self) -> &'static str {
        match self {
            Self::SingleDish => "SINGLE",
            Self::Interferometer => "ARRAY",
            Self::Coronagraph => "CORONA",
            Self::Aotf => "AOTF",
            Self::Lidar => "LIDAR",
        }
    }

    fn schema(self) -> Schema {
        match self {
            Self::SingleDish | Self::Aotf | Self::Lidar => shared(),
            Self::Interferometer => {
                shared().field("n_telescopes", Field::integer("generator-telescope1"))
            }
            Self::Coronagraph => shared()
                .field("contrast", Field::float("generator-telescope1"))
                .field("iwa", Field::float("generator-telescope3")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpsg_core::codec::RawConfig;
    use rpsg_core::field::Value;
    use rpsg_core::units::Quantity;

    #[test]
    fn test_spectral_range_units() {
        let scope = Telescope::new(TelescopeKind::SingleDish)
            .unwrap()
            .with("range1", Quantity::of(1.0, "um"))
            .unwrap()
            .with("range2", Quantity::of(5000.0, "nm"))
            .unwrap()
            .with("resolution", Quantity::of(70.0, "RP"))
            .unwrap()
            .with("fov", Quantity::of(1.0, "diffraction"))
            .unwrap();
        assert_eq!(
            scope.content(),
            "<GENERATOR-BEAM>1.0000e+00\n\
             <GENERATOR-BEAMUNIT>diffrac\n\
             <GENERATOR-RANGE1>1.0000e+00\n\
             <GENERATOR-RANGEUNIT>um\n\
             <GENERATOR-RANGE2>5.0000e+00\n\
             <GENERATOR-RESOLUTION>7.0000e+01\n\
             <GENERATOR-RESOLUTIONUNIT>RP\n\
             <GENERATOR-TELESCOPE>SINGLE"
        );
    }

    #[test]
    fn test_wavenumber_range() {
        let scope = Telescope::new(TelescopeKind::SingleDish)
            .unwrap()
            .with("range1", Quantity::of(2000.0, "cm-1"))
            .unwrap();
        assert!(scope.content().contains("<GENERATOR-RANGEUNIT>cm"));
    }

    #[test]
    fn test_coronagraph_fields() {
        let raw = RawConfig::parse(
            "<GENERATOR-TELESCOPE>CORONA\n<GENERATOR-TELESCOPE1>1e-10\n<GENERATOR-TELESCOPE3>2",
        );
        let corona = Telescope::from_raw(&raw).unwrap();
        assert_eq!(corona.variant(), TelescopeKind::Coronagraph);
        assert_eq!(corona.get("contrast"), Some(&Value::Float(1e-10)));
        assert_eq!(corona.get("iwa"), Some(&Value::Float(2.0)));

        let raw = RawConfig::parse("<GENERATOR-TELESCOPE>ARRAY\n<GENERATOR-TELESCOPE1>4");
        let array = Telescope::from_raw(&raw).unwrap();
        assert_eq!(array.get("n_telescopes"), Some(&Value::Integer(4)));
    }
}
