//! The `OBJECT*` keywords: what is being observed.

use crate::{Section, STELLAR_TYPES};
use rpsg_core::field::Field;
use rpsg_core::model::Schema;
use rpsg_core::units::Unit;

pub const OBJECT_KINDS: &[&str] = &["Exoplanet", "Planet", "Asteroid", "Moon", "Comet", "Object"];

/// The observed object and its host star.
pub struct Target;

impl Section for Target {
    const NAME: &'static str = "target";

    fn schema() -> Schema {
        let deg = || Unit::from_symbol("deg");
        let km_s = || Unit::compound(&[("km", 1), ("s", -1)]);
        Schema::new()
            .field("object", Field::choices("object", OBJECT_KINDS))
            .field("name", Field::char("object-name").max_length(50))
            .field("date", Field::date("object-date"))
            .field(
                "diameter",
                Field::quantity("object-diameter", Unit::from_symbol("km")),
            )
            .field("gravity", Field::gravity())
            .field(
                "star_distance",
                Field::quantity("object-star-distance", Unit::from_symbol("AU")),
            )
            .field(
                "star_velocity",
                Field::quantity("object-star-velocity", km_s()),
            )
            .field(
                "solar_longitude",
                Field::quantity("object-solar-longitude", deg()),
            )
            .field(
                "solar_latitude",
                Field::quantity("object-solar-latitude", deg()),
            )
            .field("season", Field::quantity("object-season", deg()))
            .field("inclination", Field::quantity("object-inclination", deg()))
            .field(
                "position_angle",
                Field::quantity("object-position-angle", deg()),
            )
            .field(
                "star_type",
                Field::choices("object-star-type", STELLAR_TYPES),
            )
            .field(
                "star_temperature",
                Field::quantity("object-star-temperature", Unit::from_symbol("K")),
            )
            .field(
                "star_radius",
                Field::quantity("object-star-radius", Unit::from_symbol("R_sun")),
            )
            .field("star_metallicity", Field::float("object-star-metallicity"))
            .field(
                "obs_longitude",
                Field::quantity("object-obs-longitude", deg()),
            )
            .field("obs_latitude", Field::quantity("object-obs-latitude", deg()))
            .field("obs_velocity", Field::quantity("object-obs-velocity", km_s()))
            .field(
                "period",
                Field::quantity("object-period", Unit::from_symbol("day")),
            )
            .field("orbit", Field::char("object-orbit").max_length(100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpsg_core::field::Value;
    use rpsg_core::units::Quantity;

    #[test]
    fn test_earth_like_target() {
        let target = Target::build()
            .unwrap()
            .with("object", "Planet")
            .unwrap()
            .with("name", "Earth")
            .unwrap()
            .with("diameter", Quantity::of(12742.0, "km"))
            .unwrap()
            .with("gravity", Quantity::of(1.0, "M_earth"))
            .unwrap();
        let content = target.content();
        assert!(content.contains("<OBJECT>Planet"));
        assert!(content.contains("<OBJECT-DIAMETER>12742.00"));
        assert!(content.contains("<OBJECT-GRAVITY-UNIT>kg"));
    }

    #[test]
    fn test_rejects_unknown_object() {
        let mut target = Target::build().unwrap();
        assert!(target.set("object", "Nebula").is_err());
    }

    #[test]
    fn test_star_radius_converted_to_solar_radii() {
        let target = Target::build()
            .unwrap()
            .with("star_radius", Quantity::of(6.957e8, "m"))
            .unwrap();
        let field = target.field("star_radius").unwrap();
        assert_eq!(field.get().as_deref(), Some("1.00"));
        assert!(matches!(target.get("star_radius"), Some(Value::Quantity(_))));
    }
}
