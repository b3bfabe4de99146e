//! The `ATMOSPHERE*` keywords.
//!
//! `ATMOSPHERE-STRUCTURE` selects the shape of the block. A coma reuses the
//! pressure and weight tags of an equilibrium atmosphere for its gas
//! production rate and expansion velocity.

use rpsg_core::family::{Polymorphic, Variant};
use rpsg_core::field::{Field, UnitCode};
use rpsg_core::format::FloatFormat;
use rpsg_core::model::Schema;
use rpsg_core::units::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtmosphereKind {
    /// No atmosphere.
    None,
    /// A hydrostatic atmosphere described by a vertical profile.
    Equilibrium,
    /// An expanding cometary coma.
    Coma,
}

/// An atmosphere of any structure.
pub type Atmosphere = Polymorphic<AtmosphereKind>;

fn pressure_units() -> Vec<UnitCode> {
    ["Pa", "bar", "kbar", "mbar", "ubar", "atm", "torr", "psi"]
        .into_iter()
        .map(|code| UnitCode::new(Unit::from_symbol(code), code, FloatFormat::Scientific(4)))
        .collect()
}

/// Fields every atmosphere with gas in it carries.
fn shared() -> Schema {
    Schema::new()
        .field(
            "continuum",
            Field::char("atmosphere-continuum").max_length(300),
        )
        .field("molecules", Field::molecules())
        .field("aerosols", Field::aerosols())
        .field("nmax", Field::integer("atmosphere-nmax"))
        .field("lmax", Field::integer("atmosphere-lmax"))
        .field(
            "description",
            Field::char("atmosphere-description").max_length(200),
        )
        .field("profile", Field::profile())
}

impl Variant for AtmosphereKind {
    const FAMILY: &'static str = "atmosphere";
    const DISCRIMINATOR: &'static str = "structure";
    const TAG: &'static str = "ATMOSPHERE-STRUCTURE";

    fn variants() -> &'static [Self] {
        &[Self::None, Self::Equilibrium, Self::Coma]
    }

    fn tag(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Equilibrium => "Equilibrium",
            Self::Coma => "Coma",
        }
    }

    fn schema(self) -> Schema {
        match self {
            Self::None => Schema::new(),
            Self::Equilibrium => shared()
                .field(
                    "pressure",
                    Field::coded_quantity(
                        "atmosphere-pressure",
                        "atmosphere-punit",
                        pressure_units(),
                    ),
                )
                .field(
                    "temperature",
                    Field::quantity("atmosphere-temperature", Unit::from_symbol("K")),
                )
                .field(
                    "weight",
                    Field::quantity(
                        "atmosphere-weight",
                        Unit::compound(&[("g", 1), ("mol", -1)]),
                    ),
                ),
            Self::Coma => shared()
                .field(
                    "gas_production",
                    Field::quantity("atmosphere-pressure", Unit::compound(&[("s", -1)]))
                        .with_format(FloatFormat::Scientific(4)),
                )
                .field(
                    "at_1au",
                    Field::boolean("atmosphere-punit").with_tokens("gasau", "gas"),
                )
                .field(
                    "expansion_velocity",
                    Field::quantity(
                        "atmosphere-weight",
                        Unit::compound(&[("m", 1), ("s", -1)]),
                    ),
                )
                .field(
                    "tau",
                    Field::quantity("atmosphere-tau", Unit::from_symbol("s")),
                ),
        }
    }
}
