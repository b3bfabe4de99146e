//! Unit string parser with normalization.
//!
//! Accepts the unit notations found in PSG configurations and in user code:
//! astropy-style exponents (`m s-2`, `cm-1`), caret exponents (`m^2`), bare
//! trailing digits (`m2`), `*` or whitespace for products, `/` for quotients,
//! parentheses, and `%`.
//!
//! A string is first split into tokens, then reduced to symbol exponents:
//!
//! ```text
//! quotient = product ('/' product)*
//! product  = power ('*'? power)*
//! power    = (symbol | '1' | '(' quotient ')') exponent?
//! ```

use super::dimension::Dimension;
use super::registry::UNIT_REGISTRY;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Error type for unit parsing failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty unit string")]
    EmptyUnit,
    #[error("unknown unit: '{0}'")]
    UnknownUnit(String),
    #[error("invalid exponent: '{0}'")]
    InvalidExponent(String),
    #[error("parse failed: {0}")]
    ParseFailed(String),
}

/// A parsed unit expression.
///
/// Represents a unit as a product of registered symbols with integer exponents.
/// For example, `g cm-3` is represented as `{cm: -3, g: 1}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedUnit {
    /// Map from symbol to exponent. A BTreeMap keeps the ordering deterministic.
    components: BTreeMap<String, i32>,
}

impl ParsedUnit {
    /// Creates a new empty (dimensionless) parsed unit.
    #[must_use]
    pub fn dimensionless() -> Self {
        Self {
            components: BTreeMap::new(),
        }
    }

    /// Creates a parsed unit from components, dropping zero exponents.
    #[must_use]
    pub fn from_components(components: BTreeMap<String, i32>) -> Self {
        let components = components
            .into_iter()
            .filter(|(_, exp)| *exp != 0)
            .collect();
        Self { components }
    }

    /// Parses a unit string into a `ParsedUnit`.
    ///
    /// ```
    /// use rpsg_core::units::ParsedUnit;
    ///
    /// let a = ParsedUnit::parse("m s-2").unwrap();
    /// let b = ParsedUnit::parse("m / s^2").unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseError::EmptyUnit);
        }
        if input == "1" || input.eq_ignore_ascii_case("dimensionless") {
            return Ok(Self::dimensionless());
        }

        let tokens = tokenize(input)?;
        let mut reader = TokenReader { tokens, pos: 0 };
        let components = reader.quotient()?;
        match reader.tokens.get(reader.pos) {
            None => Ok(Self::from_components(components)),
            Some(token) => Err(ParseError::ParseFailed(format!(
                "unexpected {token} in '{input}'"
            ))),
        }
    }

    /// Returns the components of this unit.
    #[must_use]
    pub fn components(&self) -> &BTreeMap<String, i32> {
        &self.components
    }

    /// Returns true if this unit has no components (explicit dimensionless).
    ///
    /// A unit like "ppmv" has components but is physically dimensionless;
    /// use [`ParsedUnit::dimension`] for the physical check.
    #[must_use]
    pub fn has_no_components(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns true if this unit is physically dimensionless.
    pub fn is_dimensionless(&self) -> Result<bool, ParseError> {
        Ok(self.dimension()?.is_dimensionless())
    }

    /// Computes the overall dimension of this unit.
    pub fn dimension(&self) -> Result<Dimension, ParseError> {
        self.components
            .iter()
            .try_fold(Dimension::dimensionless(), |acc, (symbol, &exp)| {
                let info = UNIT_REGISTRY
                    .lookup(symbol)
                    .ok_or_else(|| ParseError::UnknownUnit(symbol.clone()))?;
                let exp = i8::try_from(exp)
                    .map_err(|_| ParseError::InvalidExponent(exp.to_string()))?;
                Ok(acc + info.dimension.pow(exp))
            })
    }

    /// Computes the factor converting a value in this unit to coherent base units.
    pub fn to_si_factor(&self) -> Result<f64, ParseError> {
        self.components.iter().try_fold(1.0, |acc, (symbol, &exp)| {
            let info = UNIT_REGISTRY
                .lookup(symbol)
                .ok_or_else(|| ParseError::UnknownUnit(symbol.clone()))?;
            Ok(acc * info.to_si_factor.powi(exp))
        })
    }

    /// Returns a normalized string representation of this unit.
    ///
    /// Positive exponents first (alphabetically), then `/`, then the
    /// negative exponents.
    #[must_use]
    pub fn normalized(&self) -> String {
        let format_part = |parts: Vec<(&str, i32)>| -> String {
            parts
                .into_iter()
                .map(|(s, e)| {
                    if e == 1 {
                        s.to_string()
                    } else {
                        format!("{s}^{e}")
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        };

        let numerator = format_part(
            self.components
                .iter()
                .filter(|(_, &e)| e > 0)
                .map(|(s, &e)| (s.as_str(), e))
                .collect(),
        );
        let denominator = format_part(
            self.components
                .iter()
                .filter(|(_, &e)| e < 0)
                .map(|(s, &e)| (s.as_str(), -e))
                .collect(),
        );

        match (numerator.is_empty(), denominator.is_empty()) {
            (true, true) => "1".to_string(),
            (false, true) => numerator,
            (true, false) => format!("1 / {denominator}"),
            (false, false) => format!("{numerator} / {denominator}"),
        }
    }
}

impl fmt::Display for ParsedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized())
    }
}

type Components = BTreeMap<String, i32>;

/// A lexical piece of a unit string. Whitespace separates tokens and is
/// otherwise an implicit product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Symbol(&'a str),
    Exponent(i32),
    Times,
    Over,
    Open,
    Close,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Symbol(s) => write!(f, "symbol '{s}'"),
            Token::Exponent(e) => write!(f, "exponent {e}"),
            Token::Times => write!(f, "'*'"),
            Token::Over => write!(f, "'/'"),
            Token::Open => write!(f, "'('"),
            Token::Close => write!(f, "')'"),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        match c {
            b' ' | b'\t' => i += 1,
            b'*' => {
                tokens.push(Token::Times);
                i += 1;
            }
            b'/' => {
                tokens.push(Token::Over);
                i += 1;
            }
            b'(' => {
                tokens.push(Token::Open);
                i += 1;
            }
            b')' => {
                tokens.push(Token::Close);
                i += 1;
            }
            b'%' => {
                tokens.push(Token::Symbol("pct"));
                i += 1;
            }
            b'^' => {
                i += 1;
                while bytes.get(i) == Some(&b' ') {
                    i += 1;
                }
                if !matches!(bytes.get(i), Some(b'-' | b'0'..=b'9')) {
                    return Err(ParseError::ParseFailed("expected exponent after ^".into()));
                }
            }
            b'-' | b'0'..=b'9' => {
                let end = scan(bytes, i + 1, |b| b.is_ascii_digit());
                let text = &input[i..end];
                let exp = text
                    .parse()
                    .map_err(|_| ParseError::InvalidExponent(text.to_string()))?;
                tokens.push(Token::Exponent(exp));
                i = end;
            }
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                let end = scan(bytes, i, |b| b.is_ascii_alphanumeric() || b == b'_');
                let word = &input[i..end];
                // "m2" is m squared unless the whole word is a registered symbol
                let letters = word.trim_end_matches(|c: char| c.is_ascii_digit());
                if letters.len() < word.len() && UNIT_REGISTRY.lookup(word).is_none() {
                    tokens.push(Token::Symbol(letters));
                    let digits = &word[letters.len()..];
                    let exp = digits
                        .parse()
                        .map_err(|_| ParseError::InvalidExponent(digits.to_string()))?;
                    tokens.push(Token::Exponent(exp));
                } else {
                    tokens.push(Token::Symbol(word));
                }
                i = end;
            }
            _ => {
                let found = input[i..].chars().next().unwrap_or_default();
                return Err(ParseError::ParseFailed(format!(
                    "unexpected character '{found}' in '{input}'"
                )));
            }
        }
    }
    Ok(tokens)
}

fn scan(bytes: &[u8], from: usize, keep: impl Fn(u8) -> bool) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| !keep(b))
        .map_or(bytes.len(), |n| from + n)
}

fn accumulate(into: &mut Components, from: Components, sign: i32) {
    for (symbol, exp) in from {
        *into.entry(symbol).or_insert(0) += sign * exp;
    }
}

struct TokenReader<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> TokenReader<'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn quotient(&mut self) -> Result<Components, ParseError> {
        let mut acc = self.product()?;
        while self.peek() == Some(Token::Over) {
            self.pos += 1;
            let divisor = self.product()?;
            accumulate(&mut acc, divisor, -1);
        }
        Ok(acc)
    }

    fn product(&mut self) -> Result<Components, ParseError> {
        let mut acc = self.power()?;
        loop {
            match self.peek() {
                Some(Token::Times) => self.pos += 1,
                Some(Token::Symbol(_) | Token::Open) => {}
                _ => return Ok(acc),
            }
            let factor = self.power()?;
            accumulate(&mut acc, factor, 1);
        }
    }

    fn power(&mut self) -> Result<Components, ParseError> {
        let token = self.peek();
        self.pos += 1;
        let base = match token {
            Some(Token::Symbol(symbol)) => Components::from([(symbol.to_string(), 1)]),
            // The numerator of "1 / s"
            Some(Token::Exponent(1)) => Components::new(),
            Some(Token::Open) => {
                let inner = self.quotient()?;
                if self.peek() != Some(Token::Close) {
                    return Err(ParseError::ParseFailed("missing closing parenthesis".into()));
                }
                self.pos += 1;
                inner
            }
            Some(other) => {
                return Err(ParseError::ParseFailed(format!(
                    "expected unit symbol, found {other}"
                )))
            }
            None => return Err(ParseError::ParseFailed("expected unit symbol".into())),
        };
        let exp = match self.peek() {
            Some(Token::Exponent(e)) => {
                self.pos += 1;
                e
            }
            _ => 1,
        };
        Ok(base.into_iter().map(|(s, e)| (s, e * exp)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_unit() {
        let unit = ParsedUnit::parse("km").unwrap();
        assert_eq!(unit.components().get("km"), Some(&1));
    }

    #[test]
    fn test_parse_astropy_style_exponents() {
        let unit = ParsedUnit::parse("m s-2").unwrap();
        assert_eq!(unit.components().get("m"), Some(&1));
        assert_eq!(unit.components().get("s"), Some(&-2));

        let density = ParsedUnit::parse("g cm-3").unwrap();
        assert_eq!(density.components().get("cm"), Some(&-3));
    }

    #[test]
    fn test_parse_marker_exponents() {
        let a = ParsedUnit::parse("m^2").unwrap();
        let b = ParsedUnit::parse("m ^ 2").unwrap();
        let c = ParsedUnit::parse("m2").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_parse_division_notations() {
        let a = ParsedUnit::parse("km/s").unwrap();
        let b = ParsedUnit::parse("km s^-1").unwrap();
        let c = ParsedUnit::parse("km*s-1").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_parse_wavenumber() {
        let unit = ParsedUnit::parse("cm-1").unwrap();
        assert_eq!(unit.components().get("cm"), Some(&-1));
        assert_eq!(unit.dimension().unwrap(), -Dimension::LENGTH);
    }

    #[test]
    fn test_parse_percent() {
        let unit = ParsedUnit::parse("%").unwrap();
        assert_eq!(unit.components().get("pct"), Some(&1));
        assert!(unit.is_dimensionless().unwrap());
    }

    #[test]
    fn test_parse_underscored_symbols() {
        let unit = ParsedUnit::parse("M_earth").unwrap();
        assert_eq!(unit.dimension().unwrap(), Dimension::MASS);
    }

    #[test]
    fn test_parse_parentheses() {
        let unit = ParsedUnit::parse("W / (m^2 um)").unwrap();
        assert_eq!(unit.components().get("W"), Some(&1));
        assert_eq!(unit.components().get("m"), Some(&-2));
        assert_eq!(unit.components().get("um"), Some(&-1));
    }

    #[test]
    fn test_normalized_form_parses_back() {
        for text in ["m / s^2", "1 / s", "W / m^2 um"] {
            let unit = ParsedUnit::parse(text).unwrap();
            assert_eq!(ParsedUnit::parse(&unit.normalized()).unwrap(), unit);
        }
    }

    #[test]
    fn test_normalized_output() {
        let unit = ParsedUnit::parse("s-2 m").unwrap();
        assert_eq!(unit.normalized(), "m / s^2");
        assert_eq!(ParsedUnit::parse("Hz").unwrap().normalized(), "Hz");
        assert_eq!(ParsedUnit::parse("s-1").unwrap().normalized(), "1 / s");
    }

    #[test]
    fn test_dimensionless() {
        let unit = ParsedUnit::parse("1").unwrap();
        assert!(unit.has_no_components());
        assert!(unit.is_dimensionless().unwrap());
    }

    #[test]
    fn test_to_si_factor() {
        let unit = ParsedUnit::parse("g cm-3").unwrap();
        let factor = unit.to_si_factor().unwrap();
        assert!((factor - 1e3).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_symbol_fails_on_dimension() {
        let unit = ParsedUnit::parse("furlong").unwrap();
        assert!(matches!(unit.dimension(), Err(ParseError::UnknownUnit(_))));
    }

    #[test]
    fn test_empty_unit_error() {
        assert!(matches!(ParsedUnit::parse(""), Err(ParseError::EmptyUnit)));
        assert!(matches!(ParsedUnit::parse("   "), Err(ParseError::EmptyUnit)));
    }

    #[test]
    fn test_trailing_garbage_error() {
        assert!(ParsedUnit::parse("m)").is_err());
        assert!(ParsedUnit::parse("m^").is_err());
        assert!(ParsedUnit::parse("(m").is_err());
        assert!(ParsedUnit::parse("m s-").is_err());
        assert!(ParsedUnit::parse("m & s").is_err());
    }
}
