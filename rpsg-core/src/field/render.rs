//! Validation and wire encoding for each field kind.

use super::*;
use crate::profile::ProfileSet;
use crate::records::{Aerosol, Molecule};
use crate::units::Quantity;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::PrimitiveDateTime;

type Wire = Vec<(String, String)>;

pub(super) const DATE_INPUT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");
pub(super) const DATE_OUTPUT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]/[month]/[day] [hour]:[minute]");

/// Units an offset may be given in, with the code written for each.
pub(super) fn offset_units() -> Vec<(Unit, &'static str)> {
    ["arcsec", "arcmin", "deg", "km", "diameter"]
        .into_iter()
        .map(|code| (Unit::from_symbol(code), code))
        .collect()
}

impl Field {
    /// Validates `value` for this field and renders its wire lines.
    ///
    /// Returns the value to store, which may be normalized (profiles become
    /// a [`ProfileSet`]).
    pub(super) fn encode(&self, value: Value) -> RPSGResult<(Value, Wire)> {
        let wire = match (&self.kind, &value) {
            (FieldKind::Char { max_length }, Value::Char(s)) => {
                if let Some(max) = max_length {
                    if s.chars().count() > *max {
                        return Err(RPSGError::value_error(
                            &self.tag,
                            format!("{s:?} is longer than {max} characters"),
                        ));
                    }
                }
                self.single(s.clone())
            }
            (FieldKind::Integer, Value::Integer(i)) => self.single(i.to_string()),
            (FieldKind::Float { fmt, .. }, Value::Float(_) | Value::Integer(_)) => {
                let v = value.as_f64().unwrap_or_default();
                self.single(fmt.apply(v))
            }
            (
                FieldKind::Float {
                    fmt,
                    allow_table: true,
                },
                Value::Table(t),
            ) => self.single(t.render(*fmt, None, None)?),
            (FieldKind::Quantity { unit, fmt, .. }, Value::Quantity(q)) => {
                self.single(fmt.apply(q.to_value(unit)?))
            }
            (
                FieldKind::Quantity {
                    unit,
                    fmt,
                    allow_table: true,
                },
                Value::Table(t),
            ) => self.single(t.render(*fmt, t.x_unit(), Some(unit))?),
            (FieldKind::CodedQuantity { units, unit_tag }, Value::Quantity(q)) => {
                self.encode_coded(q, units, unit_tag)?
            }
            (FieldKind::Date, Value::Char(s)) => {
                // Dates read back from PSG come in the output form
                let parsed = PrimitiveDateTime::parse(s.trim(), DATE_INPUT)
                    .or_else(|_| PrimitiveDateTime::parse(s.trim(), DATE_OUTPUT))
                    .map_err(|e| {
                        RPSGError::value_error(
                            &self.tag,
                            format!("{s:?} is not YYYY-MM-DD HH:MM: {e}"),
                        )
                    })?;
                let rendered = parsed
                    .format(DATE_OUTPUT)
                    .map_err(|e| RPSGError::value_error(&self.tag, e.to_string()))?;
                self.single(rendered)
            }
            (FieldKind::CharChoices { options }, Value::Char(s)) => {
                if !options.contains(s) {
                    return Err(RPSGError::value_error(
                        &self.tag,
                        format!("{s:?} is not one of {}", options.join(", ")),
                    ));
                }
                self.single(s.clone())
            }
            (
                FieldKind::Boolean {
                    true_token,
                    false_token,
                },
                Value::Bool(b),
            ) => {
                let token = if *b { true_token } else { false_token };
                self.single(token.clone())
            }
            (FieldKind::GeometryOffset { fmt }, Value::FloatPair(ns, ew)) => {
                offset_lines(*fmt, *ns, *ew, "diameter")
            }
            (FieldKind::GeometryOffset { fmt }, Value::QuantityPair(ns, ew)) => {
                let (unit, code) = offset_unit(ns)?;
                offset_lines(*fmt, ns.to_value(&unit)?, ew.to_value(&unit)?, code)
            }
            (FieldKind::GeometryUserParam { fmt }, Value::Float(_) | Value::Integer(_)) => {
                let v = value.as_f64().unwrap_or_default();
                self.single(fmt.apply(v))
            }
            (FieldKind::GeometryUserParam { fmt }, Value::Quantity(q)) => {
                self.single(fmt.apply(q.to_value(&Unit::from_symbol("deg"))?))
            }
            (FieldKind::MultiQuantity { units, fmt }, Value::Quantity(q)) => {
                let unit = units.iter().find(|u| q.is_compatible(u)).ok_or_else(|| {
                    RPSGError::UnitMismatch {
                        expected: join_units(units.iter()),
                        got: q.unit.to_string(),
                    }
                })?;
                self.single(fmt.apply(q.to_value(unit)?))
            }
            (FieldKind::Molecules { fmt }, Value::Molecules(mols)) => molecule_lines(mols, *fmt),
            (FieldKind::Aerosols { fmt }, Value::Aerosols(aeros)) => aerosol_lines(aeros, *fmt),
            (FieldKind::Profile { fmt }, Value::Profiles(profiles)) => {
                let set = ProfileSet::new(profiles.clone())?;
                let wire = profile_lines(&set, *fmt);
                return Ok((Value::Layers(set), wire));
            }
            (FieldKind::Profile { fmt }, Value::Layers(set)) => profile_lines(set, *fmt),
            _ => {
                return Err(RPSGError::type_error(
                    &self.tag,
                    self.expected(),
                    value.category(),
                ))
            }
        };
        Ok((value, wire))
    }

    fn single(&self, rendered: String) -> Wire {
        vec![(self.tag.clone(), rendered)]
    }

    fn encode_coded(&self, q: &Quantity, units: &[UnitCode], unit_tag: &str) -> RPSGResult<Wire> {
        let choice = units
            .iter()
            .find(|c| q.is_compatible(&c.unit))
            .ok_or_else(|| RPSGError::UnitMismatch {
                expected: join_units(units.iter().map(|c| &c.unit)),
                got: q.unit.to_string(),
            })?;
        let magnitude = q.to_value(&choice.unit)?;
        Ok(vec![
            (self.tag.clone(), choice.fmt.apply(magnitude)),
            (unit_tag.to_string(), choice.code.clone()),
        ])
    }

    /// Describes the values this field accepts, for type errors.
    fn expected(&self) -> String {
        match &self.kind {
            FieldKind::Char { .. } | FieldKind::Date | FieldKind::CharChoices { .. } => {
                "string".to_string()
            }
            FieldKind::Integer => "integer".to_string(),
            FieldKind::Float { allow_table, .. } => {
                if *allow_table {
                    "float or table".to_string()
                } else {
                    "float".to_string()
                }
            }
            FieldKind::Quantity {
                unit, allow_table, ..
            } => {
                if *allow_table {
                    format!("quantity in {unit} or table")
                } else {
                    format!("quantity in {unit}")
                }
            }
            FieldKind::CodedQuantity { .. } | FieldKind::MultiQuantity { .. } => {
                "quantity".to_string()
            }
            FieldKind::Boolean { .. } => "boolean".to_string(),
            FieldKind::GeometryOffset { .. } => "pair of floats or quantities".to_string(),
            FieldKind::GeometryUserParam { .. } => "float or angle".to_string(),
            FieldKind::Molecules { .. } => "molecule list".to_string(),
            FieldKind::Aerosols { .. } => "aerosol list".to_string(),
            FieldKind::Profile { .. } => "profile list".to_string(),
        }
    }
}

fn join_units<'a>(units: impl Iterator<Item = &'a Unit>) -> String {
    units.map(|u| u.to_string()).collect::<Vec<_>>().join(", ")
}

/// Picks the offset unit for a quantity.
///
/// An exact unit match is kept as given; otherwise the first compatible
/// unit is used. Dimensionless offsets are in target diameters.
fn offset_unit(q: &Quantity) -> RPSGResult<(Unit, &'static str)> {
    if q.unit.is_dimensionless() {
        return Ok((Unit::dimensionless(), "diameter"));
    }
    let options = offset_units();
    options
        .iter()
        .find(|(u, _)| *u == q.unit)
        .or_else(|| options.iter().find(|(u, _)| q.is_compatible(u)))
        .cloned()
        .ok_or_else(|| RPSGError::UnitMismatch {
            expected: join_units(options.iter().map(|(u, _)| u)),
            got: q.unit.to_string(),
        })
}

fn offset_lines(fmt: FloatFormat, ns: f64, ew: f64, code: &str) -> Wire {
    vec![
        (GEOMETRY_OFFSET_NS.to_string(), fmt.apply(ns)),
        (GEOMETRY_OFFSET_EW.to_string(), fmt.apply(ew)),
        (GEOMETRY_OFFSET_UNIT.to_string(), code.to_string()),
    ]
}

fn joined<T>(items: &[T], f: impl Fn(&T) -> String) -> String {
    items.iter().map(f).collect::<Vec<_>>().join(",")
}

fn molecule_lines(mols: &[Molecule], fmt: FloatFormat) -> Wire {
    if mols.is_empty() {
        return Wire::new();
    }
    vec![
        (ATMOSPHERE_NGAS.to_string(), mols.len().to_string()),
        (ATMOSPHERE_GAS.to_string(), joined(mols, |m| m.name.clone())),
        (ATMOSPHERE_TYPE.to_string(), joined(mols, |m| m.kind.clone())),
        (ATMOSPHERE_ABUN.to_string(), joined(mols, |m| fmt.apply(m.abn))),
        (
            ATMOSPHERE_UNIT.to_string(),
            joined(mols, |m| m.unit_code.clone()),
        ),
    ]
}

fn aerosol_lines(aeros: &[Aerosol], fmt: FloatFormat) -> Wire {
    if aeros.is_empty() {
        return Wire::new();
    }
    vec![
        (ATMOSPHERE_NAERO.to_string(), aeros.len().to_string()),
        (ATMOSPHERE_AEROS.to_string(), joined(aeros, |a| a.name.clone())),
        (ATMOSPHERE_ATYPE.to_string(), joined(aeros, |a| a.kind.clone())),
        (ATMOSPHERE_AABUN.to_string(), joined(aeros, |a| fmt.apply(a.abn))),
        (
            ATMOSPHERE_AUNIT.to_string(),
            joined(aeros, |a| a.unit_code.clone()),
        ),
        (ATMOSPHERE_ASIZE.to_string(), joined(aeros, |a| fmt.apply(a.size))),
        (
            ATMOSPHERE_ASUNI.to_string(),
            joined(aeros, |a| a.size_unit_code.clone()),
        ),
    ]
}

fn profile_lines(set: &ProfileSet, fmt: FloatFormat) -> Wire {
    let mut wire = vec![
        (ATMOSPHERE_LAYERS_MOLECULES.to_string(), set.names().join(",")),
        (ATMOSPHERE_LAYERS.to_string(), set.nlayers().to_string()),
    ];
    for i in 0..set.nlayers() {
        if let Some(row) = set.render_layer(i, fmt) {
            wire.push((format!("{ATMOSPHERE_LAYER_PREFIX}{}", i + 1), row));
        }
    }
    wire
}
