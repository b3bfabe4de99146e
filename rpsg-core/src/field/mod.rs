//! Typed configuration fields.
//!
//! A [`Field`] owns one validated [`Value`] and the `<TAG>value` lines it
//! renders to. Lines are produced when the value is assigned, so an invalid
//! value is rejected by [`Field::set`] and rendering can never fail later.
//!
//! ```
//! use rpsg_core::field::Field;
//! use rpsg_core::units::Quantity;
//!
//! let mut gravity = Field::gravity();
//! gravity.set(Quantity::of(10.0, "m s-2")).unwrap();
//! assert_eq!(gravity.get().as_deref(), Some("10.0000"));
//! assert_eq!(
//!     gravity.content().unwrap(),
//!     "<OBJECT-GRAVITY>10.0000\n<OBJECT-GRAVITY-UNIT>g"
//! );
//! ```

mod read;
mod render;
mod value;

pub use value::Value;

use crate::codec::{join, render_line};
use crate::errors::{RPSGError, RPSGResult};
use crate::format::FloatFormat;
use crate::units::Unit;
use serde::{Deserialize, Serialize};

pub const GEOMETRY_OFFSET_NS: &str = "GEOMETRY-OFFSET-NS";
pub const GEOMETRY_OFFSET_EW: &str = "GEOMETRY-OFFSET-EW";
pub const GEOMETRY_OFFSET_UNIT: &str = "GEOMETRY-OFFSET-UNIT";
pub const GEOMETRY_USER_PARAMETER: &str = "GEOMETRY-USER-PARAMETER";
/// Sibling tag that decides how the user parameter is read.
pub const GEOMETRY_MODE: &str = "GEOMETRY";

pub const ATMOSPHERE_NGAS: &str = "ATMOSPHERE-NGAS";
pub const ATMOSPHERE_GAS: &str = "ATMOSPHERE-GAS";
pub const ATMOSPHERE_TYPE: &str = "ATMOSPHERE-TYPE";
pub const ATMOSPHERE_ABUN: &str = "ATMOSPHERE-ABUN";
pub const ATMOSPHERE_UNIT: &str = "ATMOSPHERE-UNIT";

pub const ATMOSPHERE_NAERO: &str = "ATMOSPHERE-NAERO";
pub const ATMOSPHERE_AEROS: &str = "ATMOSPHERE-AEROS";
pub const ATMOSPHERE_ATYPE: &str = "ATMOSPHERE-ATYPE";
pub const ATMOSPHERE_AABUN: &str = "ATMOSPHERE-AABUN";
pub const ATMOSPHERE_AUNIT: &str = "ATMOSPHERE-AUNIT";
pub const ATMOSPHERE_ASIZE: &str = "ATMOSPHERE-ASIZE";
pub const ATMOSPHERE_ASUNI: &str = "ATMOSPHERE-ASUNI";

pub const ATMOSPHERE_LAYERS_MOLECULES: &str = "ATMOSPHERE-LAYERS-MOLECULES";
pub const ATMOSPHERE_LAYERS: &str = "ATMOSPHERE-LAYERS";
pub const ATMOSPHERE_LAYER_PREFIX: &str = "ATMOSPHERE-LAYER-";

/// One allowed unit of a coded quantity: the unit, the code written for it,
/// and the format its magnitude is written with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitCode {
    pub unit: Unit,
    pub code: String,
    pub fmt: FloatFormat,
}

impl UnitCode {
    pub fn new(unit: Unit, code: impl Into<String>, fmt: FloatFormat) -> Self {
        Self {
            unit,
            code: code.into(),
            fmt,
        }
    }
}

/// The validation and encoding rules of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldKind {
    Char {
        max_length: Option<usize>,
    },
    Integer,
    Float {
        fmt: FloatFormat,
        allow_table: bool,
    },
    Quantity {
        unit: Unit,
        fmt: FloatFormat,
        allow_table: bool,
    },
    /// A quantity written in the first compatible unit of `units`, with that
    /// unit's code under `unit_tag`.
    CodedQuantity {
        units: Vec<UnitCode>,
        unit_tag: String,
    },
    Date,
    CharChoices {
        options: Vec<String>,
    },
    Boolean {
        true_token: String,
        false_token: String,
    },
    GeometryOffset {
        fmt: FloatFormat,
    },
    GeometryUserParam {
        fmt: FloatFormat,
    },
    /// A quantity in one of several unit classes, written in that class's unit.
    MultiQuantity {
        units: Vec<Unit>,
        fmt: FloatFormat,
    },
    Molecules {
        fmt: FloatFormat,
    },
    Aerosols {
        fmt: FloatFormat,
    },
    Profile {
        fmt: FloatFormat,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    tag: String,
    kind: FieldKind,
    nullable: bool,
    default: Option<Value>,
    value: Option<Value>,
    /// Rendered `(tag, value)` pairs for the current value.
    wire: Vec<(String, String)>,
}

impl Field {
    pub fn new(tag: &str, kind: FieldKind) -> Self {
        Self {
            tag: tag.to_ascii_uppercase(),
            kind,
            nullable: true,
            default: None,
            value: None,
            wire: Vec::new(),
        }
    }

    pub fn char(tag: &str) -> Self {
        Self::new(tag, FieldKind::Char { max_length: None })
    }

    pub fn integer(tag: &str) -> Self {
        Self::new(tag, FieldKind::Integer)
    }

    pub fn float(tag: &str) -> Self {
        Self::new(
            tag,
            FieldKind::Float {
                fmt: FloatFormat::default(),
                allow_table: false,
            },
        )
    }

    pub fn quantity(tag: &str, unit: Unit) -> Self {
        Self::new(
            tag,
            FieldKind::Quantity {
                unit,
                fmt: FloatFormat::default(),
                allow_table: false,
            },
        )
    }

    /// A quantity written with a unit code under a second tag.
    pub fn coded_quantity(value_tag: &str, unit_tag: &str, units: Vec<UnitCode>) -> Self {
        Self::new(
            value_tag,
            FieldKind::CodedQuantity {
                units,
                unit_tag: unit_tag.to_ascii_uppercase(),
            },
        )
    }

    /// `OBJECT-GRAVITY`: surface gravity, density or mass.
    pub fn gravity() -> Self {
        Self::coded_quantity(
            "object-gravity",
            "object-gravity-unit",
            vec![
                UnitCode::new(
                    Unit::compound(&[("m", 1), ("s", -2)]),
                    "g",
                    FloatFormat::Fixed(4),
                ),
                UnitCode::new(
                    Unit::compound(&[("g", 1), ("cm", -3)]),
                    "rho",
                    FloatFormat::Fixed(4),
                ),
                UnitCode::new(Unit::from_symbol("kg"), "kg", FloatFormat::Scientific(4)),
            ],
        )
    }

    /// A date given as `YYYY-MM-DD HH:MM`.
    pub fn date(tag: &str) -> Self {
        Self::new(tag, FieldKind::Date)
    }

    pub fn choices(tag: &str, options: &[&str]) -> Self {
        Self::new(
            tag,
            FieldKind::CharChoices {
                options: options.iter().map(|s| s.to_string()).collect(),
            },
        )
    }

    /// A boolean written as `Y`/`N`.
    pub fn boolean(tag: &str) -> Self {
        Self::new(
            tag,
            FieldKind::Boolean {
                true_token: "Y".to_string(),
                false_token: "N".to_string(),
            },
        )
    }

    pub fn geometry_offset() -> Self {
        Self::new(
            GEOMETRY_OFFSET_NS,
            FieldKind::GeometryOffset {
                fmt: FloatFormat::Fixed(4),
            },
        )
    }

    pub fn geometry_user_param() -> Self {
        Self::new(
            GEOMETRY_USER_PARAMETER,
            FieldKind::GeometryUserParam {
                fmt: FloatFormat::default(),
            },
        )
    }

    pub fn multi_quantity(tag: &str, units: Vec<Unit>) -> Self {
        Self::new(
            tag,
            FieldKind::MultiQuantity {
                units,
                fmt: FloatFormat::default(),
            },
        )
    }

    pub fn molecules() -> Self {
        Self::new(
            ATMOSPHERE_NGAS,
            FieldKind::Molecules {
                fmt: FloatFormat::Scientific(2),
            },
        )
    }

    pub fn aerosols() -> Self {
        Self::new(
            ATMOSPHERE_NAERO,
            FieldKind::Aerosols {
                fmt: FloatFormat::Scientific(2),
            },
        )
    }

    pub fn profile() -> Self {
        Self::new(
            ATMOSPHERE_LAYERS_MOLECULES,
            FieldKind::Profile {
                fmt: FloatFormat::Scientific(6),
            },
        )
    }

    /// Rejects null assignments.
    ///
    /// A required field must also be given a default, or [`Field::reset`]
    /// (and so `Model::new`) fails.
    pub fn required(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Limits the length of a string field.
    pub fn max_length(mut self, n: usize) -> Self {
        if let FieldKind::Char { max_length } = &mut self.kind {
            *max_length = Some(n);
        }
        self
    }

    /// Accepts a [`Table`](crate::table::Table) in place of a scalar.
    pub fn allow_table(mut self) -> Self {
        if let FieldKind::Float { allow_table, .. } | FieldKind::Quantity { allow_table, .. } =
            &mut self.kind
        {
            *allow_table = true;
        }
        self
    }

    /// Replaces the number format of kinds that have a single format.
    pub fn with_format(mut self, new: FloatFormat) -> Self {
        match &mut self.kind {
            FieldKind::Float { fmt, .. }
            | FieldKind::Quantity { fmt, .. }
            | FieldKind::GeometryOffset { fmt }
            | FieldKind::GeometryUserParam { fmt }
            | FieldKind::MultiQuantity { fmt, .. }
            | FieldKind::Molecules { fmt }
            | FieldKind::Aerosols { fmt }
            | FieldKind::Profile { fmt } => *fmt = new,
            _ => {}
        }
        self
    }

    /// Replaces the tokens a boolean is written as.
    pub fn with_tokens(mut self, on: &str, off: &str) -> Self {
        if let FieldKind::Boolean {
            true_token,
            false_token,
        } = &mut self.kind
        {
            *true_token = on.to_string();
            *false_token = off.to_string();
        }
        self
    }

    /// The primary tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    /// Validates and stores a value.
    ///
    /// The stored value is left unchanged if validation fails.
    pub fn set(&mut self, value: impl Into<Value>) -> RPSGResult<()> {
        let (value, wire) = self.encode(value.into())?;
        self.value = Some(value);
        self.wire = wire;
        Ok(())
    }

    pub fn set_null(&mut self) -> RPSGResult<()> {
        if !self.nullable {
            return Err(RPSGError::value_error(&self.tag, "field may not be null"));
        }
        self.value = None;
        self.wire.clear();
        Ok(())
    }

    /// Applies the default value, if any.
    pub fn reset(&mut self) -> RPSGResult<()> {
        match self.default.clone() {
            Some(default) => self.set(default),
            None if !self.nullable => Err(RPSGError::value_error(
                &self.tag,
                "required field has no default",
            )),
            None => {
                self.value = None;
                self.wire.clear();
                Ok(())
            }
        }
    }

    /// The rendered value under the primary tag.
    pub fn get(&self) -> Option<String> {
        self.wire
            .iter()
            .find(|(tag, _)| *tag == self.tag)
            .or_else(|| self.wire.first())
            .map(|(_, v)| v.clone())
    }

    /// The rendered `(tag, value)` pairs.
    pub fn lines(&self) -> &[(String, String)] {
        &self.wire
    }

    /// The `<TAG>value` lines for the current value, or `None` if there is
    /// nothing to write.
    pub fn content(&self) -> Option<String> {
        if self.wire.is_empty() {
            return None;
        }
        Some(join(self.wire.iter().map(|(t, v)| render_line(t, v))))
    }

    /// Every tag this field may write.
    pub fn tags(&self) -> Vec<String> {
        let fixed: &[&str] = match &self.kind {
            FieldKind::CodedQuantity { unit_tag, .. } => {
                return vec![self.tag.clone(), unit_tag.clone()]
            }
            FieldKind::GeometryOffset { .. } => {
                &[GEOMETRY_OFFSET_NS, GEOMETRY_OFFSET_EW, GEOMETRY_OFFSET_UNIT]
            }
            FieldKind::Molecules { .. } => &[
                ATMOSPHERE_NGAS,
                ATMOSPHERE_GAS,
                ATMOSPHERE_TYPE,
                ATMOSPHERE_ABUN,
                ATMOSPHERE_UNIT,
            ],
            FieldKind::Aerosols { .. } => &[
                ATMOSPHERE_NAERO,
                ATMOSPHERE_AEROS,
                ATMOSPHERE_ATYPE,
                ATMOSPHERE_AABUN,
                ATMOSPHERE_AUNIT,
                ATMOSPHERE_ASIZE,
                ATMOSPHERE_ASUNI,
            ],
            FieldKind::Profile { .. } => &[ATMOSPHERE_LAYERS_MOLECULES, ATMOSPHERE_LAYERS],
            _ => return vec![self.tag.clone()],
        };
        fixed.iter().map(|t| t.to_string()).collect()
    }
}

#[cfg(test)]
mod tests;
