use crate::codec::RawConfig;
use crate::errors::RPSGError;
use crate::field::{Field, Value};
use crate::profile::Profile;
use crate::records::{Aerosol, Molecule};
use crate::table::Table;
use crate::units::{Quantity, Unit};
use ndarray::array;

fn raw(pairs: &[(&str, &str)]) -> RawConfig {
    pairs.iter().copied().collect()
}

/// Sets `value`, renders, parses and reads it back.
fn round_trip(mut field: Field, value: impl Into<Value>) -> Option<Value> {
    field.set(value).unwrap();
    let text = field.content().unwrap();
    field.read(&RawConfig::parse(&text)).unwrap()
}

#[test]
fn test_missing_key_gives_default() {
    let age = Field::integer("age").with_default(0);
    assert_eq!(age.read(&RawConfig::new()).unwrap(), Some(Value::Integer(0)));
    let name = Field::char("name");
    assert_eq!(name.read(&RawConfig::new()).unwrap(), None);
}

#[test]
fn test_scalar_reads() {
    let c = Field::char("char").max_length(4);
    assert_eq!(
        c.read(&raw(&[("CHAR", "value")])).unwrap(),
        Some(Value::Char("value".into()))
    );

    let i = Field::integer("int");
    assert_eq!(i.read(&raw(&[("INT", "0")])).unwrap(), Some(Value::Integer(0)));
    assert!(matches!(
        i.read(&raw(&[("INT", "zero")])),
        Err(RPSGError::Value { .. })
    ));

    let f = Field::float("float");
    assert_eq!(f.read(&raw(&[("FLOAT", "0.0")])).unwrap(), Some(Value::Float(0.0)));

    let c = Field::choices("char_choice", &["a", "b"]);
    assert_eq!(
        c.read(&raw(&[("CHAR_CHOICE", "b")])).unwrap(),
        Some(Value::Char("b".into()))
    );
}

#[test]
fn test_table_reads() {
    let t = Table::new(array![1.0, 2.0, 3.0], array![4.0, 5.0, 6.0]).unwrap();

    let read = round_trip(Field::float("float").allow_table(), t.clone()).unwrap();
    let back = read.as_table().unwrap();
    assert_eq!(back.x(), t.x());
    assert_eq!(back.y(), t.y());

    let q = Field::quantity("quant", Unit::from_symbol("m")).allow_table();
    let read = round_trip(q, t.clone()).unwrap();
    assert_eq!(read.as_table().unwrap().y(), t.y());
}

#[test]
fn test_quantity_read() {
    let q = Field::quantity("quant", Unit::from_symbol("m"));
    assert_eq!(
        q.read(&raw(&[("QUANT", "1")])).unwrap(),
        Some(Value::Quantity(Quantity::of(1.0, "m")))
    );
}

#[test]
fn test_coded_quantity_read() {
    let g = Field::gravity();
    let read = g
        .read(&raw(&[("OBJECT-GRAVITY", "5"), ("OBJECT-GRAVITY-UNIT", "rho")]))
        .unwrap();
    assert_eq!(read, Some(Value::Quantity(Quantity::of(5.0, "g cm-3"))));

    // no unit code means the first unit
    let read = g.read(&raw(&[("OBJECT-GRAVITY", "9.8")])).unwrap();
    assert_eq!(read, Some(Value::Quantity(Quantity::of(9.8, "m s-2"))));

    assert!(matches!(
        g.read(&raw(&[("OBJECT-GRAVITY", "5"), ("OBJECT-GRAVITY-UNIT", "lbs")])),
        Err(RPSGError::Value { .. })
    ));
}

#[test]
fn test_coded_quantity_round_trip() {
    let read = round_trip(Field::gravity(), Quantity::of(10.0, "m s-2")).unwrap();
    assert_eq!(read, Value::Quantity(Quantity::of(10.0, "m s-2")));
}

#[test]
fn test_date_read_returns_original_string() {
    let d = Field::date("date");
    assert_eq!(
        d.read(&raw(&[("DATE", "2023-08-10 14:15")])).unwrap(),
        Some(Value::Char("2023-08-10 14:15".into()))
    );
}

#[test]
fn test_boolean_read() {
    let b = Field::boolean("boolean");
    assert_eq!(b.read(&raw(&[("BOOLEAN", "Y")])).unwrap(), Some(Value::Bool(true)));
    assert_eq!(b.read(&raw(&[("BOOLEAN", "N")])).unwrap(), Some(Value::Bool(false)));
    assert!(b.read(&raw(&[("BOOLEAN", "maybe")])).is_err());

    let read = round_trip(Field::boolean("b").with_tokens("gasau", "gas"), false);
    assert_eq!(read, Some(Value::Bool(false)));
}

#[test]
fn test_geometry_offset_read() {
    let g = Field::geometry_offset();
    let read = g
        .read(&raw(&[
            ("GEOMETRY-OFFSET-NS", "1"),
            ("GEOMETRY-OFFSET-EW", "1.4"),
            ("GEOMETRY-OFFSET-UNIT", "diameter"),
        ]))
        .unwrap();
    assert_eq!(read, Some(Value::FloatPair(1.0, 1.4)));

    let read = round_trip(
        Field::geometry_offset(),
        (Quantity::of(2.0, "arcsec"), Quantity::of(-1.0, "arcsec")),
    );
    assert_eq!(
        read,
        Some(Value::QuantityPair(
            Quantity::of(2.0, "arcsec"),
            Quantity::of(-1.0, "arcsec")
        ))
    );
}

#[test]
fn test_multi_quantity_read_unsupported() {
    let m = Field::multi_quantity("field", vec![Unit::from_symbol("s")]);
    assert!(matches!(
        m.read(&raw(&[("FIELD", "1")])),
        Err(RPSGError::ReadUnsupported(_))
    ));
}

#[test]
fn test_geometry_user_param_depends_on_geometry() {
    let g = Field::geometry_user_param();
    assert_eq!(g.read(&raw(&[("GEOMETRY-USER-PARAMETER", "1")])).unwrap(), None);
    assert_eq!(
        g.read(&raw(&[("GEOMETRY-USER-PARAMETER", "1"), ("GEOMETRY", "NADIR")]))
            .unwrap(),
        Some(Value::Quantity(Quantity::of(1.0, "deg")))
    );
    assert_eq!(
        g.read(&raw(&[("GEOMETRY-USER-PARAMETER", "1"), ("GEOMETRY", "Observatory")]))
            .unwrap(),
        None
    );
}

#[test]
fn test_molecules_round_trip() {
    let mols = vec![
        Molecule::new("H2O", "HIT[1]", Quantity::of(1.0, "%")).unwrap(),
        Molecule::new("CO2", "HIT[2]", 1.0).unwrap(),
    ];
    let read = round_trip(Field::molecules(), mols.clone());
    assert_eq!(read, Some(Value::Molecules(mols)));
}

#[test]
fn test_molecules_count_mismatch() {
    let m = Field::molecules();
    let broken = raw(&[
        ("ATMOSPHERE-NGAS", "2"),
        ("ATMOSPHERE-GAS", "H2O"),
        ("ATMOSPHERE-TYPE", "HIT[1]"),
        ("ATMOSPHERE-ABUN", "1"),
        ("ATMOSPHERE-UNIT", "scl"),
    ]);
    assert!(matches!(m.read(&broken), Err(RPSGError::MalformedRecord(_))));
}

#[test]
fn test_aerosols_round_trip() {
    let aeros = vec![
        Aerosol::new("Water", "water_dat", 1.0, 1.0).unwrap(),
        Aerosol::new(
            "WaterIce",
            "waterice_dat",
            Quantity::of(10.0, "ppmv"),
            Quantity::new(3.0, Unit::from_symbol("um").logarithmic()),
        )
        .unwrap(),
    ];
    let read = round_trip(Field::aerosols(), aeros.clone());
    assert_eq!(read, Some(Value::Aerosols(aeros)));
}

#[test]
fn test_profile_read() {
    let profiles = vec![
        Profile::with_unit("Press", array![1.0, 0.1, 0.01], Unit::from_symbol("bar")),
        Profile::with_unit("Temp", array![300.0, 250.0, 200.0], Unit::from_symbol("K")),
        Profile::new("H2O", array![1.0, 0.7, 1.0]),
    ];
    let read = round_trip(Field::profile(), profiles).unwrap();
    let set = read.as_layers().unwrap();
    assert_eq!(set.nlayers(), 3);
    assert_eq!(set.names(), vec!["H2O".to_string()]);
    assert_eq!(set.get_pressure(1), Some(0.1));
    assert_eq!(set.get_temperature(1), Some(250.0));
    assert_eq!(set.get_molecules(1), Some(vec![0.7]));
}

#[test]
fn test_profile_read_missing_layer() {
    let p = Field::profile();
    let broken = raw(&[
        ("ATMOSPHERE-LAYERS-MOLECULES", "H2O"),
        ("ATMOSPHERE-LAYERS", "2"),
        ("ATMOSPHERE-LAYER-1", "1,300,1"),
    ]);
    assert!(matches!(p.read(&broken), Err(RPSGError::MalformedRecord(_))));
}
