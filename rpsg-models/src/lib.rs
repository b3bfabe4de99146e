//! PSG parameter models.
//!
//! Each section of a PSG configuration is described by a schema over the
//! fields in `rpsg-core`. Sections with a single shape implement [`Section`];
//! sections whose shape depends on a discriminator tag are families of
//! [`Variant`](rpsg_core::family::Variant)s wrapped in
//! [`Polymorphic`](rpsg_core::family::Polymorphic).

pub mod atmosphere;
pub mod generator;
pub mod geometry;
pub mod noise;
pub mod target;
pub mod telescope;

use log::debug;
use rpsg_core::codec::RawConfig;
use rpsg_core::model::{Model, Schema};
use rpsg_core::RPSGResult;

pub use atmosphere::{Atmosphere, AtmosphereKind};
pub use generator::Generator;
pub use geometry::Geometry;
pub use noise::{Noise, NoiseKind};
pub use target::Target;
pub use telescope::{Telescope, TelescopeKind};

/// A configuration section with a fixed schema.
pub trait Section {
    /// Name used in logs.
    const NAME: &'static str;

    fn schema() -> Schema;

    /// A model of this section with every field at its default.
    fn build() -> RPSGResult<Model> {
        Model::new(&Self::schema())
    }

    /// Reads this section from parsed text.
    fn read(raw: &RawConfig) -> RPSGResult<Model> {
        debug!("Reading {} section", Self::NAME);
        Model::from_raw(&Self::schema(), raw)
    }

    /// True if `raw` holds any tag of this section.
    fn present_in(raw: &RawConfig) -> bool {
        Self::schema().matches(raw)
    }
}

/// Stellar spectral classes accepted by PSG. The empty string means none.
pub(crate) const STELLAR_TYPES: &[&str] = &["O", "B", "A", "F", "G", "K", "M", ""];
