//! Typed configuration engine for the Planetary Spectrum Generator.
//!
//! Fields validate scientific values and render them as `<TAG>value` lines.
//! Models group fields under a schema, and families pick the variant a block
//! of text describes from its discriminator tag.

pub mod codec;
pub mod family;
pub mod field;
pub mod format;
pub mod model;
pub mod profile;
pub mod records;
pub mod table;
pub mod units;

pub mod errors;

pub use errors::{RPSGError, RPSGResult};
