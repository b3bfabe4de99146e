use crate::profile::{Profile, ProfileSet};
use crate::records::{Aerosol, Molecule};
use crate::table::Table;
use crate::units::Quantity;
use serde::{Deserialize, Serialize};

/// A typed value held by a [`Field`](super::Field).
///
/// Which variants a field accepts depends on its kind. Assigning a variant the
/// field does not accept is a type error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Char(String),
    Integer(i64),
    Float(f64),
    Quantity(Quantity),
    Table(Table),
    Bool(bool),
    /// A pair of plain numbers, e.g. an offset in target diameters.
    FloatPair(f64, f64),
    QuantityPair(Quantity, Quantity),
    Molecules(Vec<Molecule>),
    Aerosols(Vec<Aerosol>),
    /// Unvalidated profiles. Stored as [`Value::Layers`] once accepted.
    Profiles(Vec<Profile>),
    Layers(ProfileSet),
}

impl Value {
    /// Human-readable name of the variant, used in type errors.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Char(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Quantity(_) => "quantity",
            Self::Table(_) => "table",
            Self::Bool(_) => "boolean",
            Self::FloatPair(..) => "pair of floats",
            Self::QuantityPair(..) => "pair of quantities",
            Self::Molecules(_) => "molecule list",
            Self::Aerosols(_) => "aerosol list",
            Self::Profiles(_) => "profile list",
            Self::Layers(_) => "profile set",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Char(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_quantity(&self) -> Option<&Quantity> {
        match self {
            Self::Quantity(q) => Some(q),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_layers(&self) -> Option<&ProfileSet> {
        match self {
            Self::Layers(p) => Some(p),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Char(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Char(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Quantity> for Value {
    fn from(value: Quantity) -> Self {
        Self::Quantity(value)
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Self::Table(value)
    }
}

impl From<(f64, f64)> for Value {
    fn from((a, b): (f64, f64)) -> Self {
        Self::FloatPair(a, b)
    }
}

impl From<(Quantity, Quantity)> for Value {
    fn from((a, b): (Quantity, Quantity)) -> Self {
        Self::QuantityPair(a, b)
    }
}

impl From<Vec<Molecule>> for Value {
    fn from(value: Vec<Molecule>) -> Self {
        Self::Molecules(value)
    }
}

impl From<Vec<Aerosol>> for Value {
    fn from(value: Vec<Aerosol>) -> Self {
        Self::Aerosols(value)
    }
}

impl From<Vec<Profile>> for Value {
    fn from(value: Vec<Profile>) -> Self {
        Self::Profiles(value)
    }
}

impl From<ProfileSet> for Value {
    fn from(value: ProfileSet) -> Self {
        Self::Layers(value)
    }
}
