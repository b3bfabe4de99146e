//! Fixed and scientific float formatting using Python-style format specs.
//!
//! PSG reads numbers written as `1.00` or `1.00e+06`. Rust's `{:e}` writes
//! `1.00e6`, so scientific output is rebuilt with a signed exponent of at
//! least two digits.

use crate::errors::{RPSGError, RPSGResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloatFormat {
    /// `.Nf`
    Fixed(usize),
    /// `.Ne`
    Scientific(usize),
}

impl FloatFormat {
    /// Parses a spec such as `.2f` or `.4e`.
    ///
    /// ```
    /// use rpsg_core::format::FloatFormat;
    ///
    /// let fmt = FloatFormat::parse(".2e").unwrap();
    /// assert_eq!(fmt.apply(1e6), "1.00e+06");
    /// assert_eq!(FloatFormat::parse(".1f").unwrap().apply(4.0), "4.0");
    /// ```
    pub fn parse(spec: &str) -> RPSGResult<Self> {
        let invalid = || RPSGError::value_error("format", format!("invalid format spec {spec:?}"));
        let body = spec.strip_prefix('.').ok_or_else(invalid)?;
        let kind = body.chars().last().ok_or_else(invalid)?;
        let precision: usize = body[..body.len() - kind.len_utf8()]
            .parse()
            .map_err(|_| invalid())?;
        match kind {
            'f' => Ok(Self::Fixed(precision)),
            'e' => Ok(Self::Scientific(precision)),
            _ => Err(invalid()),
        }
    }

    pub fn apply(&self, value: f64) -> String {
        match *self {
            Self::Fixed(p) => format!("{value:.p$}"),
            Self::Scientific(p) => {
                let raw = format!("{value:.p$e}");
                match raw.split_once('e') {
                    Some((mantissa, exp)) => {
                        let (sign, digits) = match exp.strip_prefix('-') {
                            Some(d) => ('-', d),
                            None => ('+', exp),
                        };
                        format!("{mantissa}e{sign}{digits:0>2}")
                    }
                    // inf and NaN have no exponent
                    None => raw,
                }
            }
        }
    }
}

impl Default for FloatFormat {
    fn default() -> Self {
        Self::Fixed(2)
    }
}

impl FromStr for FloatFormat {
    type Err = RPSGError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FloatFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(p) => write!(f, ".{p}f"),
            Self::Scientific(p) => write!(f, ".{p}e"),
        }
    }
}
