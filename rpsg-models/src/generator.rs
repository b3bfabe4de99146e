//! The `GENERATOR-*` keywords that do not depend on the instrument.
//!
//! Telescope and noise keywords share the `GENERATOR-` prefix but live in
//! their own families.

use crate::Section;
use rpsg_core::field::Field;
use rpsg_core::model::Schema;

/// Radiance units PSG can write spectra in.
pub const RADIANCE_UNITS: &[&str] = &[
    "rel", "rif", "Jy", "mJy", "Wsrm2um", "Wm2um", "Wsrm2cm", "Wm2cm", "Wsrm2Hz", "Wm2Hz", "K",
];

/// Radiative transfer settings.
pub struct Generator;

impl Section for Generator {
    const NAME: &'static str = "generator";

    fn schema() -> Schema {
        Schema::new()
            .field(
                "resolution_kernel",
                Field::boolean("generator-resolutionkernel"),
            )
            .field("gas_model", Field::boolean("generator-gasmodel"))
            .field("continuum_model", Field::boolean("generator-cont-model"))
            .field("continuum_stellar", Field::boolean("generator-cont-stellar"))
            .field("transmittance_show", Field::boolean("generator-trans-show"))
            .field(
                "transmittance_apply",
                Field::boolean("generator-trans-apply"),
            )
            .field("transmittance", Field::char("generator-trans").max_length(20))
            .field(
                "radiance_unit",
                Field::choices("generator-radunits", RADIANCE_UNITS),
            )
            .field("log_radiance", Field::boolean("generator-lograd"))
            .field("gcm_binning", Field::integer("generator-gcm-binning"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpsg_core::codec::RawConfig;
    use rpsg_core::field::Value;
    use rpsg_core::RPSGError;

    #[test]
    fn test_booleans_as_tokens() {
        let generator = Generator::build()
            .unwrap()
            .with("gas_model", true)
            .unwrap()
            .with("continuum_model", false)
            .unwrap()
            .with("radiance_unit", "Jy")
            .unwrap();
        assert_eq!(
            generator.content(),
            "<GENERATOR-CONT-MODEL>N\n<GENERATOR-GASMODEL>Y\n<GENERATOR-RADUNITS>Jy"
        );
    }

    #[test]
    fn test_read_rejects_bad_token() {
        let raw = RawConfig::parse("<GENERATOR-GASMODEL>maybe");
        assert!(matches!(
            Generator::read(&raw),
            Err(RPSGError::Value { .. })
        ));

        let raw = RawConfig::parse("<GENERATOR-GASMODEL>Y\n<GENERATOR-GCM-BINNING>3");
        let generator = Generator::read(&raw).unwrap();
        assert_eq!(generator.get("gas_model"), Some(&Value::Bool(true)));
        assert_eq!(generator.get("gcm_binning"), Some(&Value::Integer(3)));
    }
}
