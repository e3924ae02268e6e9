// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coordinate text decoding
//!
//! A `gml:pos` holds three space-separated numbers in the source CRS. The
//! upstream data this tool was written for prefixes the first component with
//! two extra characters (the leading easting-zone digit pair of a
//! zone-prefixed coordinate) that must be stripped before parsing. The strip
//! length is a run parameter, not a universal rule, and the decoder reports
//! whether the stripped characters were digits so callers can surface the
//! assumption.

use crate::error::{Error, Result};

/// Input-format assumptions for position text.
#[derive(Debug, Clone, Copy)]
pub struct CoordFormat {
    /// Characters to strip from the first coordinate before parsing
    pub strip_len: usize,
}

impl Default for CoordFormat {
    fn default() -> Self {
        // The reference dataset carries a 2-character easting prefix.
        Self { strip_len: 2 }
    }
}

/// One decoded 3D vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// True when the stripped prefix contained digit characters, i.e. the
    /// strip may have discarded numeric data.
    pub prefix_was_numeric: bool,
}

impl CoordFormat {
    /// Decode a position's text content into a vertex.
    pub fn decode(&self, text: &str) -> Result<DecodedPosition> {
        let mut parts = text.split_whitespace();
        let first = parts
            .next()
            .ok_or_else(|| Error::InvalidPosition(format!("empty position text: {text:?}")))?;
        let second = parts.next().ok_or_else(|| {
            Error::InvalidPosition(format!("expected 3 coordinates, got 1: {text:?}"))
        })?;
        let third = parts.next().ok_or_else(|| {
            Error::InvalidPosition(format!("expected 3 coordinates, got 2: {text:?}"))
        })?;

        let (prefix, stripped) = split_prefix(first, self.strip_len)
            .ok_or_else(|| {
                Error::InvalidPosition(format!(
                    "first coordinate {first:?} shorter than the {}-character prefix",
                    self.strip_len
                ))
            })?;

        Ok(DecodedPosition {
            x: parse_component(stripped)?,
            y: parse_component(second)?,
            z: parse_component(third)?,
            prefix_was_numeric: prefix.chars().any(|c| c.is_ascii_digit()),
        })
    }
}

/// Split off the first `len` characters; `None` when nothing would remain.
fn split_prefix(s: &str, len: usize) -> Option<(&str, &str)> {
    if len == 0 {
        return Some(("", s));
    }
    let byte_pos = s.char_indices().nth(len).map(|(i, _)| i)?;
    Some(s.split_at(byte_pos))
}

fn parse_component(s: &str) -> Result<f64> {
    fast_float::parse(s)
        .map_err(|_| Error::InvalidPosition(format!("not a number: {s:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_strips_two_char_prefix() {
        let fmt = CoordFormat::default();
        let pos = fmt.decode("32565000.5 5934000.25 12.5").unwrap();
        assert_eq!(pos.x, 565000.5);
        assert_eq!(pos.y, 5934000.25);
        assert_eq!(pos.z, 12.5);
        assert!(pos.prefix_was_numeric);
    }

    #[test]
    fn test_decode_non_numeric_prefix_not_flagged() {
        let fmt = CoordFormat::default();
        let pos = fmt.decode("E-100.0 200.0 3.0").unwrap();
        assert_eq!(pos.x, 100.0);
        assert!(!pos.prefix_was_numeric);
    }

    #[test]
    fn test_decode_no_strip() {
        let fmt = CoordFormat { strip_len: 0 };
        let pos = fmt.decode("1.5 2.5 3.5").unwrap();
        assert_eq!((pos.x, pos.y, pos.z), (1.5, 2.5, 3.5));
        assert!(!pos.prefix_was_numeric);
    }

    #[test]
    fn test_decode_too_few_components() {
        let fmt = CoordFormat { strip_len: 0 };
        assert!(fmt.decode("1.0 2.0").is_err());
        assert!(fmt.decode("").is_err());
    }

    #[test]
    fn test_decode_first_component_too_short() {
        let fmt = CoordFormat::default();
        // Stripping 2 chars from "1" leaves nothing to parse.
        assert!(fmt.decode("1 2.0 3.0").is_err());
    }

    #[test]
    fn test_decode_garbage_component() {
        let fmt = CoordFormat { strip_len: 0 };
        assert!(fmt.decode("1.0 abc 3.0").is_err());
    }
}
