//! Unit parsing, normalization, and conversion for PSG configuration values.
//!
//! PSG fields carry physical quantities: gravities, pressures, beam sizes,
//! spectral ranges, abundances. This module provides just enough of a unit
//! system to validate those values and convert them into the unit a field
//! writes on the wire.
//!
//! # Quick Start
//!
//! ```
//! use rpsg_core::units::Unit;
//!
//! let a = Unit::parse("m s-2").unwrap();
//! let b = Unit::parse("m/s^2").unwrap();
//! assert_eq!(a, b);
//!
//! let rho = Unit::parse("g cm-3").unwrap();
//! assert!(!a.is_compatible(&rho));
//!
//! let factor = Unit::parse("bar").unwrap()
//!     .conversion_factor(&Unit::parse("Pa").unwrap())
//!     .unwrap();
//! assert!((factor - 1e5).abs() < 1e-6);
//! ```
//!
//! # Supported Syntax
//!
//! | Notation | Meaning |
//! |----------|---------|
//! | `m^2`, `m2` | Square metres |
//! | `m s-2`, `m/s^2`, `m*s^-2` | Metres per second squared |
//! | `g cm-3` | Grams per cubic centimetre |
//! | `%` | Percent (`pct`) |
//! | `log(um)` | Base-10 logarithm of a length in microns |
//!
//! # Module Structure
//!
//! - [`dimension`]: Physical dimension types, including PSG pseudo dimensions
//! - [`registry`]: Known units with conversion factors
//! - [`parser`]: Unit string parsing with normalization
//! - [`conversion`]: High-level [`Unit`] type and conversion API
//! - [`quantity`]: [`Quantity`], a value with a unit

pub mod conversion;
pub mod dimension;
pub mod parser;
pub mod quantity;
pub mod registry;

pub use conversion::{conversion_factor, ConversionError, Unit, UnitKind};
pub use dimension::Dimension;
pub use parser::{ParseError, ParsedUnit};
pub use quantity::Quantity;
pub use registry::{UnitInfo, UnitRegistry, UNIT_REGISTRY};
