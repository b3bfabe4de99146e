//! Polymorphic model families.
//!
//! Some configuration blocks come in mutually exclusive variants that share a
//! discriminator tag: `ATMOSPHERE-STRUCTURE` selects between no atmosphere, an
//! equilibrium atmosphere and a coma. A family is a closed enum implementing
//! [`Variant`]; [`resolve`] maps the discriminator's raw value to a variant and
//! [`Polymorphic`] is a model pinned to one variant.

use crate::codec::RawConfig;
use crate::errors::{RPSGError, RPSGResult};
use crate::field::{Field, Value};
use crate::model::{Model, Schema};
use log::debug;
use std::fmt::Debug;

/// A closed set of model variants selected by a discriminator tag.
pub trait Variant: Copy + Eq + Debug + 'static {
    /// Family name used in errors and logs.
    const FAMILY: &'static str;
    /// Name of the discriminator field in every variant's model.
    const DISCRIMINATOR: &'static str;
    /// Tag the discriminator is written under.
    const TAG: &'static str;

    fn variants() -> &'static [Self];

    /// The discriminator value written for this variant.
    fn tag(self) -> &'static str;

    /// The variant's fields, excluding the discriminator.
    fn schema(self) -> Schema;

    /// The full schema: the variant's fields plus its pinned discriminator.
    fn full_schema(self) -> Schema {
        let tags: Vec<&str> = Self::variants().iter().map(|v| v.tag()).collect();
        self.schema().field(
            Self::DISCRIMINATOR,
            Field::choices(Self::TAG, &tags)
                .required()
                .with_default(self.tag()),
        )
    }
}

/// Picks the variant named by the discriminator tag in `raw`.
///
/// Matching ignores ASCII case. A missing or unrecognized value is an
/// [`RPSGError::UnknownVariant`].
pub fn resolve<V: Variant>(raw: &RawConfig) -> RPSGResult<V> {
    let value = raw.get(V::TAG).ok_or_else(|| RPSGError::UnknownVariant {
        family: V::FAMILY.to_string(),
        value: String::new(),
    })?;
    let variant = V::variants()
        .iter()
        .copied()
        .find(|v| v.tag().eq_ignore_ascii_case(value.trim()))
        .ok_or_else(|| RPSGError::UnknownVariant {
            family: V::FAMILY.to_string(),
            value: value.to_string(),
        })?;
    debug!("Resolved {} variant {variant:?} from {value:?}", V::FAMILY);
    Ok(variant)
}

/// A model of one variant of a family.
#[derive(Debug, Clone, PartialEq)]
pub struct Polymorphic<V: Variant> {
    variant: V,
    model: Model,
}

impl<V: Variant> Polymorphic<V> {
    /// Builds a model of `variant` with its discriminator set.
    pub fn new(variant: V) -> RPSGResult<Self> {
        Ok(Self {
            variant,
            model: Model::new(&variant.full_schema())?,
        })
    }

    /// Resolves the variant from `raw` and reads its fields.
    pub fn from_raw(raw: &RawConfig) -> RPSGResult<Self> {
        let variant = resolve::<V>(raw)?;
        // The raw value may differ in case from the canonical tag
        let mut raw = raw.clone();
        raw.insert(V::TAG, variant.tag());
        let model = Model::from_raw(&variant.full_schema(), &raw)?;
        Ok(Self { variant, model })
    }

    pub fn variant(&self) -> V {
        self.variant
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Sets a field. The discriminator can only be set to this variant's tag.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> RPSGResult<()> {
        let value = value.into();
        if name == V::DISCRIMINATOR && value.as_str() != Some(self.variant.tag()) {
            return Err(RPSGError::value_error(
                V::TAG,
                format!("discriminator is pinned to {:?}", self.variant.tag()),
            ));
        }
        self.model.set(name, value)
    }

    /// Builder form of [`Polymorphic::set`].
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> RPSGResult<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    pub fn set_null(&mut self, name: &str) -> RPSGResult<()> {
        self.model.set_null(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.model.get(name)
    }

    pub fn content(&self) -> String {
        self.model.content()
    }
}
