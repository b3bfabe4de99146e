//! Decoding field values from a parsed configuration.

use super::render::offset_units;
use super::*;
use crate::codec::RawConfig;
use crate::profile::ProfileSet;
use crate::records::{Aerosol, Molecule};
use crate::table::Table;
use crate::units::Quantity;

/// Geometry modes in which the user parameter is an angle.
const ANGULAR_GEOMETRIES: &[&str] = &["nadir", "lookingup"];

impl Field {
    /// Decodes this field's value from `raw`.
    ///
    /// A missing primary tag yields the field's default. Decoding does not
    /// store the value; use [`Field::set`] for that.
    pub fn read(&self, raw: &RawConfig) -> RPSGResult<Option<Value>> {
        if let FieldKind::MultiQuantity { .. } = self.kind {
            return Err(RPSGError::ReadUnsupported(self.tag.clone()));
        }
        let Some(text) = raw.get(&self.tag) else {
            return Ok(self.default.clone());
        };

        let value = match &self.kind {
            FieldKind::Char { .. } | FieldKind::Date | FieldKind::CharChoices { .. } => {
                Value::Char(text.to_string())
            }
            FieldKind::Integer => Value::Integer(self.parse_int(text)?),
            FieldKind::Float { allow_table, .. } => {
                if *allow_table && Table::is_table_text(text) {
                    Value::Table(Table::parse(text)?)
                } else {
                    Value::Float(self.parse_float(text)?)
                }
            }
            FieldKind::Quantity {
                unit, allow_table, ..
            } => {
                if *allow_table && Table::is_table_text(text) {
                    Value::Table(Table::parse(text)?.assume_units(None, Some(unit.clone())))
                } else {
                    Value::Quantity(Quantity::new(self.parse_float(text)?, unit.clone()))
                }
            }
            FieldKind::CodedQuantity { units, unit_tag } => {
                let magnitude = self.parse_float(text)?;
                let choice = match raw.get(unit_tag) {
                    None => units.first(),
                    Some(code) => units.iter().find(|c| c.code == code),
                }
                .ok_or_else(|| {
                    RPSGError::value_error(
                        unit_tag,
                        format!("unknown unit code {:?}", raw.get(unit_tag).unwrap_or("")),
                    )
                })?;
                Value::Quantity(Quantity::new(magnitude, choice.unit.clone()))
            }
            FieldKind::Boolean {
                true_token,
                false_token,
            } => match text {
                t if t == true_token => Value::Bool(true),
                t if t == false_token => Value::Bool(false),
                other => {
                    return Err(RPSGError::value_error(
                        &self.tag,
                        format!("expected {true_token:?} or {false_token:?}, got {other:?}"),
                    ))
                }
            },
            FieldKind::GeometryOffset { .. } => self.read_offset(raw, text)?,
            FieldKind::GeometryUserParam { .. } => {
                let angular = raw.get(GEOMETRY_MODE).is_some_and(|mode| {
                    ANGULAR_GEOMETRIES
                        .iter()
                        .any(|g| g.eq_ignore_ascii_case(mode.trim()))
                });
                if !angular {
                    return Ok(None);
                }
                Value::Quantity(Quantity::new(
                    self.parse_float(text)?,
                    Unit::from_symbol("deg"),
                ))
            }
            FieldKind::MultiQuantity { .. } => {
                return Err(RPSGError::ReadUnsupported(self.tag.clone()))
            }
            FieldKind::Molecules { .. } => Value::Molecules(self.read_molecules(raw, text)?),
            FieldKind::Aerosols { .. } => Value::Aerosols(self.read_aerosols(raw, text)?),
            FieldKind::Profile { .. } => Value::Layers(self.read_profile(raw, text)?),
        };
        Ok(Some(value))
    }

    fn parse_float(&self, text: &str) -> RPSGResult<f64> {
        text.trim()
            .parse()
            .map_err(|_| RPSGError::value_error(&self.tag, format!("{text:?} is not a number")))
    }

    fn parse_int(&self, text: &str) -> RPSGResult<i64> {
        text.trim()
            .parse()
            .map_err(|_| RPSGError::value_error(&self.tag, format!("{text:?} is not an integer")))
    }

    fn read_offset(&self, raw: &RawConfig, ns: &str) -> RPSGResult<Value> {
        let ns = self.parse_float(ns)?;
        let ew = match raw.get(GEOMETRY_OFFSET_EW) {
            Some(text) => self.parse_float(text)?,
            None => 0.0,
        };
        let code = raw.get(GEOMETRY_OFFSET_UNIT).unwrap_or("diameter");
        if code == "diameter" {
            return Ok(Value::FloatPair(ns, ew));
        }
        let (unit, _) = offset_units()
            .into_iter()
            .find(|(_, c)| *c == code)
            .ok_or_else(|| {
                RPSGError::value_error(GEOMETRY_OFFSET_UNIT, format!("unknown unit code {code:?}"))
            })?;
        Ok(Value::QuantityPair(
            Quantity::new(ns, unit.clone()),
            Quantity::new(ew, unit),
        ))
    }

    /// Reads the comma-joined attribute lines of a composition block.
    ///
    /// Every attribute must have exactly `count` entries.
    fn columns(&self, raw: &RawConfig, count: &str, tags: &[&str]) -> RPSGResult<Vec<Vec<String>>> {
        let n = usize::try_from(self.parse_int(count)?)
            .map_err(|_| RPSGError::MalformedRecord(format!("{}: negative count", self.tag)))?;
        tags.iter()
            .map(|tag| {
                if n == 0 {
                    return Ok(Vec::new());
                }
                let line = raw
                    .get(tag)
                    .ok_or_else(|| RPSGError::MalformedRecord(format!("missing <{tag}>")))?;
                let items: Vec<String> = line.split(',').map(|s| s.trim().to_string()).collect();
                if items.len() != n {
                    return Err(RPSGError::MalformedRecord(format!(
                        "<{tag}> has {} entries, expected {n}",
                        items.len()
                    )));
                }
                Ok(items)
            })
            .collect()
    }

    fn read_molecules(&self, raw: &RawConfig, count: &str) -> RPSGResult<Vec<Molecule>> {
        let cols = self.columns(
            raw,
            count,
            &[ATMOSPHERE_GAS, ATMOSPHERE_TYPE, ATMOSPHERE_ABUN, ATMOSPHERE_UNIT],
        )?;
        let [names, kinds, abuns, units] = &cols[..] else {
            return Err(RPSGError::MalformedRecord("molecule block".to_string()));
        };
        (0..names.len())
            .map(|i| {
                Molecule::from_code(
                    &names[i],
                    &kinds[i],
                    self.parse_float(&abuns[i])?,
                    &units[i],
                )
            })
            .collect()
    }

    fn read_aerosols(&self, raw: &RawConfig, count: &str) -> RPSGResult<Vec<Aerosol>> {
        let cols = self.columns(
            raw,
            count,
            &[
                ATMOSPHERE_AEROS,
                ATMOSPHERE_ATYPE,
                ATMOSPHERE_AABUN,
                ATMOSPHERE_AUNIT,
                ATMOSPHERE_ASIZE,
                ATMOSPHERE_ASUNI,
            ],
        )?;
        let [names, kinds, abuns, units, sizes, size_units] = &cols[..] else {
            return Err(RPSGError::MalformedRecord("aerosol block".to_string()));
        };
        (0..names.len())
            .map(|i| {
                Aerosol::from_code(
                    &names[i],
                    &kinds[i],
                    self.parse_float(&abuns[i])?,
                    &units[i],
                    self.parse_float(&sizes[i])?,
                    &size_units[i],
                )
            })
            .collect()
    }

    fn read_profile(&self, raw: &RawConfig, header: &str) -> RPSGResult<ProfileSet> {
        let molecules: Vec<String> = header
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let count = raw
            .get(ATMOSPHERE_LAYERS)
            .ok_or_else(|| RPSGError::MalformedRecord(format!("missing <{ATMOSPHERE_LAYERS}>")))?;
        let n = usize::try_from(self.parse_int(count)?)
            .map_err(|_| RPSGError::MalformedRecord("negative layer count".to_string()))?;
        let rows = (1..=n)
            .map(|i| {
                let tag = format!("{ATMOSPHERE_LAYER_PREFIX}{i}");
                let line = raw
                    .get(&tag)
                    .ok_or_else(|| RPSGError::MalformedRecord(format!("missing <{tag}>")))?;
                line.split(',')
                    .map(|v| self.parse_float(v))
                    .collect::<RPSGResult<Vec<f64>>>()
            })
            .collect::<RPSGResult<Vec<_>>>()?;
        ProfileSet::from_layers(molecules, rows)
    }
}
