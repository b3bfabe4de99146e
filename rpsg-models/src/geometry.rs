//! The `GEOMETRY*` keywords: where the observer sits.

use crate::{Section, STELLAR_TYPES};
use rpsg_core::field::{Field, UnitCode};
use rpsg_core::format::FloatFormat;
use rpsg_core::model::Schema;
use rpsg_core::units::Unit;

/// Observing geometry.
pub struct Geometry;

fn altitude_units() -> Vec<UnitCode> {
    ["AU", "km", "diameter", "pc"]
        .into_iter()
        .map(|code| UnitCode::new(Unit::from_symbol(code), code, FloatFormat::Fixed(4)))
        .collect()
}

impl Section for Geometry {
    const NAME: &'static str = "geometry";

    fn schema() -> Schema {
        Schema::new()
            .field("geometry", Field::char("geometry").max_length(20))
            .field("reference", Field::char("geometry-ref").max_length(50))
            .field("offset", Field::geometry_offset())
            .field(
                "obs_altitude",
                Field::coded_quantity(
                    "geometry-obs-altitude",
                    "geometry-altitude-unit",
                    altitude_units(),
                ),
            )
            .field(
                "azimuth",
                Field::quantity("geometry-azimuth", Unit::from_symbol("deg")),
            )
            .field("user_parameter", Field::geometry_user_param())
            .field(
                "stellar_type",
                Field::choices("geometry-stellar-type", STELLAR_TYPES),
            )
            .field(
                "stellar_temperature",
                Field::quantity("geometry-stellar-temperature", Unit::from_symbol("K")),
            )
            .field(
                "stellar_magnitude",
                Field::float("geometry-stellar-magnitude"),
            )
            .field("disk_angles", Field::integer("geometry-disk-angles"))
    }
}
