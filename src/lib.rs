//! Typed configurations for the Planetary Spectrum Generator (PSG).
//!
//! [`Config`] assembles the sections defined in `rpsg-models` into the text
//! PSG reads, and reads that text back. [`ApiRequest`] turns a configuration
//! into the form fields of an API call and [`Response`] splits a reply into
//! its result files. Sending the request is left to the caller.
//!
//! ```
//! use rpsg::rpsg_core::units::Quantity;
//! use rpsg::rpsg_models::{Section, Target};
//! use rpsg::Config;
//!
//! let target = Target::build()
//!     .unwrap()
//!     .with("object", "Planet")
//!     .unwrap()
//!     .with("diameter", Quantity::of(12742.0, "km"))
//!     .unwrap();
//! let config = Config::new().with_target(target);
//! assert_eq!(
//!     config.content(),
//!     "<OBJECT>Planet\n<OBJECT-DIAMETER>12742.00"
//! );
//! ```

pub mod config;
pub mod request;
pub mod response;
pub mod settings;

pub use config::Config;
pub use request::{ApiRequest, OutputType};
pub use response::{split_results, Response};
pub use settings::Settings;

pub use rpsg_core;
pub use rpsg_models;
