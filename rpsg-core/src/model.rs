//! Schemas and models.
//!
//! A [`Schema`] is an immutable template: named fields with their kinds,
//! defaults and nullability. A [`Model`] is one configuration built from a
//! schema. Each model owns a fresh copy of the schema's fields, so models
//! never share mutable state.
//!
//! ```
//! use rpsg_core::field::Field;
//! use rpsg_core::model::{Model, Schema};
//!
//! let schema = Schema::new()
//!     .field("name", Field::char("name").max_length(30))
//!     .field("age", Field::integer("age").with_default(0));
//!
//! let person = Model::new(&schema).unwrap().with("name", "Ted").unwrap();
//! assert_eq!(person.content(), "<AGE>0\n<NAME>Ted");
//! ```

use crate::codec::{join, render_line, RawConfig};
use crate::errors::{RPSGError, RPSGResult};
use crate::field::{Field, Value};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Named field templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    fields: BTreeMap<String, Field>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing any field of the same name.
    ///
    /// Returns self for method chaining.
    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Adds every field of `other`, replacing fields of the same name.
    pub fn extend(mut self, other: Schema) -> Self {
        self.fields.extend(other.fields);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Every tag any field of this schema may write.
    pub fn tags(&self) -> Vec<String> {
        self.fields.values().flat_map(Field::tags).collect()
    }

    /// True if `raw` holds any tag this schema reads.
    pub fn matches(&self, raw: &RawConfig) -> bool {
        self.tags().iter().any(|t| raw.contains(t))
    }
}

/// A configuration block built from a [`Schema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    fields: BTreeMap<String, Field>,
}

impl Model {
    /// Builds a model with every field at its default.
    pub fn new(schema: &Schema) -> RPSGResult<Self> {
        let mut fields = schema.fields.clone();
        for field in fields.values_mut() {
            field.reset()?;
        }
        Ok(Self { fields })
    }

    /// Builds a model from parsed text, re-validating every value read.
    ///
    /// Fields whose tags are absent keep their defaults. Write-only fields are
    /// skipped.
    pub fn from_raw(schema: &Schema, raw: &RawConfig) -> RPSGResult<Self> {
        let mut model = Self::new(schema)?;
        for field in model.fields.values_mut() {
            match field.read(raw) {
                Ok(Some(value)) => field.set(value)?,
                Ok(None) => {}
                Err(RPSGError::ReadUnsupported(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(model)
    }

    /// Validates and stores a value for field `name`.
    ///
    /// Fields that share a tag must agree on what they write under it, so a
    /// value is rejected if it would write a different line under a tag
    /// another field already holds. The stored value is left unchanged on
    /// error.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> RPSGResult<()> {
        let mut candidate = self
            .fields
            .get(name)
            .cloned()
            .ok_or_else(|| RPSGError::UnknownField(name.to_string()))?;
        candidate.set(value)?;
        self.check_shared_tags(name, &candidate)?;
        self.fields.insert(name.to_string(), candidate);
        Ok(())
    }

    fn check_shared_tags(&self, name: &str, candidate: &Field) -> RPSGResult<()> {
        for (tag, value) in candidate.lines() {
            let clash = self
                .fields
                .iter()
                .filter(|(other, _)| other.as_str() != name)
                .find_map(|(other, field)| {
                    field
                        .lines()
                        .iter()
                        .find(|(t, v)| t == tag && v != value)
                        .map(|(_, v)| (other, v))
                });
            if let Some((other, held)) = clash {
                return Err(RPSGError::value_error(
                    tag,
                    format!("'{name}' would write {value} but '{other}' already writes {held}"),
                ));
            }
        }
        Ok(())
    }

    /// Builder form of [`Model::set`].
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> RPSGResult<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    pub fn set_null(&mut self, name: &str) -> RPSGResult<()> {
        self.field_mut(name)?.set_null()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn field_mut(&mut self, name: &str) -> RPSGResult<&mut Field> {
        self.fields
            .get_mut(name)
            .ok_or_else(|| RPSGError::UnknownField(name.to_string()))
    }

    /// The stored value of field `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).and_then(Field::value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// True if no field has a value.
    pub fn is_empty(&self) -> bool {
        self.fields.values().all(Field::is_null)
    }

    /// Every rendered `(tag, value)` pair, ordered by each field's primary
    /// tag. Multi-line fields stay contiguous. A line repeated verbatim by
    /// two fields sharing a tag is written once.
    pub fn lines(&self) -> Vec<(String, String)> {
        let mut fields: Vec<&Field> = self.fields.values().filter(|f| !f.is_null()).collect();
        fields.sort_by(|a, b| a.tag().cmp(b.tag()));

        let mut seen = HashSet::new();
        fields
            .into_iter()
            .flat_map(|f| f.lines().iter().cloned())
            .filter(|line| seen.insert(line.clone()))
            .collect()
    }

    /// The model serialized as `<TAG>value` lines.
    pub fn content(&self) -> String {
        join(self.lines().iter().map(|(t, v)| render_line(t, v)))
    }
}
