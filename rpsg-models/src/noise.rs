//! Noise models, selected by `GENERATOR-NOISE`.

use rpsg_core::family::{Polymorphic, Variant};
use rpsg_core::field::Field;
use rpsg_core::model::Schema;
use rpsg_core::units::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoiseKind {
    /// No noise. Describes the instrument's optics and detector well.
    Noiseless,
    /// Receiver temperature (radio).
    ReceiverTemperature,
    /// Constant noise.
    Constant,
    /// Constant noise plus background.
    ConstantWithBackground,
    /// Noise equivalent power.
    PowerEquivalent,
    /// Detectability (D*).
    Detectability,
    /// CCD read noise and dark current.
    Ccd,
}

pub type Noise = Polymorphic<NoiseKind>;

fn shared() -> Schema {
    Schema::new()
        .field(
            "exp_time",
            Field::quantity("generator-noisetime", Unit::from_symbol("s")),
        )
        .field("n_frames", Field::integer("generator-noiseframes"))
        .field("n_pixels", Field::integer("generator-noisepixels"))
}

impl Variant for NoiseKind {
    const FAMILY: &'static str = "noise";
    const DISCRIMINATOR: &'static str = "noise_type";
    const TAG: &'static str = "GENERATOR-NOISE";

    fn variants() -> &'static [Self] {
        &[
            Self::Noiseless,
            Self::ReceiverTemperature,
            Self::Constant,
            Self::ConstantWithBackground,
            Self::PowerEquivalent,
            Self::Detectability,
            Self::Ccd,
        ]
    }

    fn tag(self) -> &'static str {
        match self {
            Self::Noiseless => "NO",
            Self::ReceiverTemperature => "TRX",
            Self::Constant => "RMS",
            Self::ConstantWithBackground => "BKG",
            Self::PowerEquivalent => "NEP",
            Self::Detectability => "D*",
            Self::Ccd => "CCD",
        }
    }

    fn schema(self) -> Schema {
        let electron = || Unit::from_symbol("electron");
        match self {
            Self::Noiseless => shared()
                .field("throughput", Field::float("generator-noiseoeff"))
                // PSG spells this tag without the S
                .field("emissivity", Field::float("generator-noieoemis"))
                .field(
                    "temperature",
                    Field::quantity("generator-noisetemp", Unit::from_symbol("K")),
                )
                .field(
                    "description",
                    Field::char("generator-instrument").max_length(500),
                )
                .field(
                    "pixel_depth",
                    Field::quantity("generator-noisewell", electron()),
                ),
            Self::ReceiverTemperature => shared()
                .field("temperature", Field::float("generator-noise1"))
                .field("g_factor", Field::float("generator-noise2")),
            Self::Constant | Self::ConstantWithBackground => {
                shared().field("sigma", Field::float("generator-noise1"))
            }
            // W Hz^-1/2; the registry has no fractional exponents
            Self::PowerEquivalent => shared().field("sensitivity", Field::float("generator-noise1")),
            // cm Hz^1/2 W^-1
            Self::Detectability => shared()
                .field("sensitivity", Field::float("generator-noise1"))
                .field(
                    "pixel_size",
                    Field::quantity("generator-noise2", Unit::from_symbol("um")),
                ),
            Self::Ccd => shared()
                .field("read_noise", Field::quantity("generator-noise1", electron()))
                .field(
                    "dark_current",
                    Field::quantity(
                        "generator-noise2",
                        Unit::compound(&[("electron", 1), ("s", -1)]),
                    ),
                ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpsg_core::codec::RawConfig;
    use rpsg_core::field::Value;
    use rpsg_core::units::Quantity;
    use rpsg_core::RPSGError;
    use is_close::is_close;

    #[test]
    fn test_detectability_tag() {
        let raw = RawConfig::parse("<GENERATOR-NOISE>D*\n<GENERATOR-NOISE2>15");
        let noise = Noise::from_raw(&raw).unwrap();
        assert_eq!(noise.variant(), NoiseKind::Detectability);
        let pixel = noise.get("pixel_size").and_then(Value::as_quantity).unwrap();
        assert!(is_close!(pixel.value, 15.0));
    }

    #[test]
    fn test_ccd() {
        let ccd = Noise::new(NoiseKind::Ccd)
            .unwrap()
            .with("read_noise", Quantity::of(16.8, "electron"))
            .unwrap()
            .with("dark_current", Quantity::of(100.0, "electron / min"))
            .unwrap()
            .with("exp_time", Quantity::of(1.0, "h"))
            .unwrap();
        let content = ccd.content();
        assert!(content.contains("<GENERATOR-NOISE>CCD"));
        assert!(content.contains("<GENERATOR-NOISE1>16.80"));
        assert!(content.contains("<GENERATOR-NOISE2>1.67"));
        assert!(content.contains("<GENERATOR-NOISETIME>3600.00"));
    }

    #[test]
    fn test_ccd_rejects_wrong_unit() {
        let mut ccd = Noise::new(NoiseKind::Ccd).unwrap();
        assert!(matches!(
            ccd.set("read_noise", Quantity::of(1.0, "s")),
            Err(RPSGError::UnitMismatch { .. })
        ));
    }

    #[test]
    fn test_unknown_noise() {
        let raw = RawConfig::parse("<GENERATOR-NOISE>SHOT");
        assert!(matches!(
            Noise::from_raw(&raw),
            Err(RPSGError::UnknownVariant { .. })
        ));
    }
}
