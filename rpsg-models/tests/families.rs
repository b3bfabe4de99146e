use rpsg_core::codec::RawConfig;
use rpsg_core::family::{resolve, Variant};
use rpsg_core::profile::Profile;
use rpsg_core::records::{Aerosol, Molecule};
use rpsg_core::units::{Quantity, Unit};
use rpsg_core::RPSGError;
use rpsg_models::{Atmosphere, AtmosphereKind, Noise, NoiseKind, Telescope, TelescopeKind};

#[test]
fn test_every_variant_builds_and_reads_back() {
    for &kind in AtmosphereKind::variants() {
        let atmosphere = Atmosphere::new(kind).unwrap();
        let back = Atmosphere::from_raw(&RawConfig::parse(&atmosphere.content())).unwrap();
        assert_eq!(back.variant(), kind);
    }
    for &kind in TelescopeKind::variants() {
        let telescope = Telescope::new(kind).unwrap();
        let back = Telescope::from_raw(&RawConfig::parse(&telescope.content())).unwrap();
        assert_eq!(back.variant(), kind);
    }
    for &kind in NoiseKind::variants() {
        let noise = Noise::new(kind).unwrap();
        let back = Noise::from_raw(&RawConfig::parse(&noise.content())).unwrap();
        assert_eq!(back.variant(), kind);
    }
}

#[test]
fn test_resolve_is_case_insensitive() {
    let raw = RawConfig::parse("<ATMOSPHERE-STRUCTURE>coma");
    assert_eq!(resolve::<AtmosphereKind>(&raw).unwrap(), AtmosphereKind::Coma);

    let atmosphere = Atmosphere::from_raw(&raw).unwrap();
    assert_eq!(atmosphere.content(), "<ATMOSPHERE-STRUCTURE>Coma");
}

#[test]
fn test_unknown_structure() {
    let raw = RawConfig::parse("<ATMOSPHERE-STRUCTURE>Plasma");
    match Atmosphere::from_raw(&raw) {
        Err(RPSGError::UnknownVariant { family, value }) => {
            assert_eq!(family, "atmosphere");
            assert_eq!(value, "Plasma");
        }
        other => panic!("expected an unknown variant, got {other:?}"),
    }
}

#[test]
fn test_missing_discriminator() {
    let raw = RawConfig::parse("<GENERATOR-RANGE1>1");
    assert!(matches!(
        Telescope::from_raw(&raw),
        Err(RPSGError::UnknownVariant { .. })
    ));
}

#[test]
fn test_equilibrium_atmosphere_round_trip() {
    let pressure = Profile::with_unit("Press", vec![1.0, 0.1, 0.01], Unit::from_symbol("bar"));
    let temperature = Profile::with_unit("Temp", vec![288.0, 250.0, 220.0], Unit::from_symbol("K"));
    let water = Profile::new("H2O", vec![1e-2, 1e-3, 1e-5]);

    let atmosphere = Atmosphere::new(AtmosphereKind::Equilibrium)
        .unwrap()
        .with("pressure", Quantity::of(1.0, "bar"))
        .unwrap()
        .with("temperature", Quantity::of(288.0, "K"))
        .unwrap()
        .with("weight", Quantity::of(28.97, "g mol-1"))
        .unwrap()
        .with(
            "molecules",
            vec![
                Molecule::new("H2O", "HIT[1]", Quantity::of(1.0, "%")).unwrap(),
                Molecule::new("CO2", "HIT[2]", Quantity::of(400.0, "ppm")).unwrap(),
            ],
        )
        .unwrap()
        .with(
            "aerosols",
            vec![Aerosol::new(
                "Water",
                "CRISM_Wolff[reff=2.0um]",
                1.0,
                Quantity::of(1.0, "um"),
            )
            .unwrap()],
        )
        .unwrap()
        .with("profile", vec![pressure, temperature, water])
        .unwrap();

    let text = atmosphere.content();
    assert!(text.contains("<ATMOSPHERE-GAS>H2O,CO2"));
    assert!(text.contains("<ATMOSPHERE-UNIT>%,ppmv"));
    assert!(text.contains("<ATMOSPHERE-LAYERS>3"));
    assert!(text.contains("<ATMOSPHERE-LAYERS-MOLECULES>H2O"));

    let back = Atmosphere::from_raw(&RawConfig::parse(&text)).unwrap();
    assert_eq!(back.variant(), AtmosphereKind::Equilibrium);
    assert_eq!(back.content(), text);
}

#[test]
fn test_shared_range_unit() {
    let telescope = Telescope::new(TelescopeKind::Coronagraph)
        .unwrap()
        .with("range1", Quantity::of(0.5, "um"))
        .unwrap()
        .with("range2", Quantity::of(1.0, "um"))
        .unwrap()
        .with("contrast", 1e-10)
        .unwrap();
    let text = telescope.content();
    assert_eq!(text.matches("<GENERATOR-RANGEUNIT>").count(), 1);
    assert!(text.contains("<GENERATOR-TELESCOPE1>"));
}

#[test]
fn test_ranges_must_share_a_unit() {
    let mut telescope = Telescope::new(TelescopeKind::SingleDish)
        .unwrap()
        .with("range1", Quantity::of(1.0, "um"))
        .unwrap();
    assert!(matches!(
        telescope.set("range2", Quantity::of(100.0, "GHz")),
        Err(RPSGError::Value { .. })
    ));
    assert!(telescope.get("range2").is_none());

    telescope.set("range2", Quantity::of(0.1, "mm")).unwrap();
    let text = telescope.content();
    assert_eq!(text.matches("<GENERATOR-RANGEUNIT>").count(), 1);
    let back = Telescope::from_raw(&RawConfig::parse(&text)).unwrap();
    assert_eq!(back.model().field("range1").unwrap().get().as_deref(), Some("1.0000e+00"));
    assert_eq!(back.model().field("range2").unwrap().get().as_deref(), Some("1.0000e+02"));
    assert_eq!(back.content(), text);
}
