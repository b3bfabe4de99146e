//! A complete PSG configuration.

use log::{debug, warn};
use rpsg_core::codec::{join, RawConfig};
use rpsg_core::family::{Polymorphic, Variant};
use rpsg_core::field::ATMOSPHERE_LAYER_PREFIX;
use rpsg_core::model::Model;
use rpsg_core::RPSGResult;
use rpsg_models::{
    Atmosphere, AtmosphereKind, Generator, Geometry, Noise, NoiseKind, Section, Target, Telescope,
    TelescopeKind,
};
use std::collections::HashSet;

/// The sections of a PSG configuration. Absent sections are not written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub target: Option<Model>,
    pub geometry: Option<Model>,
    pub atmosphere: Option<Atmosphere>,
    pub generator: Option<Model>,
    pub telescope: Option<Telescope>,
    pub noise: Option<Noise>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: Model) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_geometry(mut self, geometry: Model) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_atmosphere(mut self, atmosphere: Atmosphere) -> Self {
        self.atmosphere = Some(atmosphere);
        self
    }

    pub fn with_generator(mut self, generator: Model) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_telescope(mut self, telescope: Telescope) -> Self {
        self.telescope = Some(telescope);
        self
    }

    pub fn with_noise(mut self, noise: Noise) -> Self {
        self.noise = Some(noise);
        self
    }

    /// Parses configuration text.
    ///
    /// Each section is built when any of its tags is present. Families also
    /// need their discriminator; without it their tags are ignored. Tags no
    /// section reads are dropped.
    pub fn from_text(text: &str) -> RPSGResult<Self> {
        Self::from_raw(&RawConfig::parse(text))
    }

    pub fn from_raw(raw: &RawConfig) -> RPSGResult<Self> {
        warn_unrecognised(raw);
        Ok(Self {
            target: read_section::<Target>(raw)?,
            geometry: read_section::<Geometry>(raw)?,
            atmosphere: read_family(raw)?,
            generator: read_section::<Generator>(raw)?,
            telescope: read_family(raw)?,
            noise: read_family(raw)?,
        })
    }

    /// The configuration as `<TAG>value` lines, one section after another.
    pub fn content(&self) -> String {
        let sections = [
            self.target.as_ref().map(Model::content),
            self.geometry.as_ref().map(Model::content),
            self.atmosphere.as_ref().map(Polymorphic::content),
            self.generator.as_ref().map(Model::content),
            self.telescope.as_ref().map(Polymorphic::content),
            self.noise.as_ref().map(Polymorphic::content),
        ];
        join(sections.into_iter().flatten().filter(|s| !s.is_empty()))
    }
}

fn read_section<S: Section>(raw: &RawConfig) -> RPSGResult<Option<Model>> {
    if !S::present_in(raw) {
        return Ok(None);
    }
    S::read(raw).map(Some)
}

fn read_family<V: Variant>(raw: &RawConfig) -> RPSGResult<Option<Polymorphic<V>>> {
    if raw.contains(V::TAG) {
        return Polymorphic::from_raw(raw).map(Some);
    }
    if V::variants().iter().any(|v| v.schema().matches(raw)) {
        warn!("Ignoring {} tags: {} is not set", V::FAMILY, V::TAG);
    }
    Ok(None)
}

fn family_tags<V: Variant>() -> impl Iterator<Item = String> {
    V::variants().iter().flat_map(|v| v.full_schema().tags())
}

/// Logs tags that no section reads.
fn warn_unrecognised(raw: &RawConfig) {
    let known: HashSet<String> = Target::schema()
        .tags()
        .into_iter()
        .chain(Geometry::schema().tags())
        .chain(Generator::schema().tags())
        .chain(family_tags::<AtmosphereKind>())
        .chain(family_tags::<TelescopeKind>())
        .chain(family_tags::<NoiseKind>())
        .collect();
    let unknown: Vec<&str> = raw
        .iter()
        .map(|(tag, _)| tag)
        .filter(|tag| !known.contains(*tag) && !tag.starts_with(ATMOSPHERE_LAYER_PREFIX))
        .collect();
    if unknown.is_empty() {
        debug!("All {} tags recognised", raw.len());
    } else {
        warn!("Dropping {} unrecognised tags: {}", unknown.len(), unknown.join(", "));
    }
}
