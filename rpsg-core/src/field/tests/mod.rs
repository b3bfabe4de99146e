//! Tests for the field types.
//!
//! Write-side tests check validation and the rendered lines, read-side tests
//! check decoding from a parsed configuration.

#[cfg(test)]
mod read_side;
