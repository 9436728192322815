//! Sprite tokens: `0x`-prefixed uppercase hexadecimal
//!
//! Tokens are used both as the unit of the persisted collection and as the
//! shareable link fragment. Decoding is total: anything unreadable becomes
//! [`Sprite::EMPTY`]. [`parse_token`] is the strict form for reporting bad
//! user input.

use std::str::FromStr;

use thiserror::Error;

use crate::bitgrid::{Sprite, CELL_MASK};

/// Prefix written in front of every encoded token
pub const TOKEN_PREFIX: &str = "0x";

const RADIX: u32 = 16;

/// Strict token parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Nothing to parse
    #[error("empty sprite token")]
    Empty,
    /// Not a base-16 numeral
    #[error("'{0}' is not a hexadecimal sprite token")]
    NotHex(String),
    /// Parsed, but has bits outside the 5x5 grid
    #[error("'{token}' sets bits outside the 5x5 grid (max 0x{max:X})")]
    OutOfRange { token: String, max: u32 },
}

/// Encode a sprite as `0x` followed by uppercase hex digits.
///
/// # Examples
///
/// ```
/// use sprite5::bitgrid::Sprite;
/// use sprite5::codec::encode;
///
/// assert_eq!(encode(Sprite::from_bits_truncate(0x1F)), "0x1F");
/// assert_eq!(encode(Sprite::EMPTY), "0x0");
/// ```
pub fn encode(sprite: Sprite) -> String {
    format!("{}{:X}", TOKEN_PREFIX, sprite.bits())
}

/// Decode a token, falling back to the empty sprite on any failure.
///
/// Accepts the prefixed form (`0x1F`, `0X1f`) as well as the bare numeral
/// (`1F`). Bits outside the grid are dropped.
///
/// # Examples
///
/// ```
/// use sprite5::codec::decode;
///
/// assert_eq!(decode("0x1F").bits(), 31);
/// assert_eq!(decode("1f").bits(), 31);
/// assert!(decode("not-a-number").is_empty());
/// ```
pub fn decode(token: &str) -> Sprite {
    match parse_hex(token) {
        Some(bits) => Sprite::from_bits_truncate(bits),
        None => Sprite::EMPTY,
    }
}

/// Decode an optional token; a missing token is the empty sprite.
pub fn decode_opt(token: Option<&str>) -> Sprite {
    token.map(decode).unwrap_or(Sprite::EMPTY)
}

/// Parse a token strictly, reporting why it was rejected.
pub fn parse_token(token: &str) -> Result<Sprite, CodecError> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err(CodecError::Empty);
    }
    let bits = parse_hex(trimmed).ok_or_else(|| CodecError::NotHex(trimmed.to_string()))?;
    if bits & !CELL_MASK != 0 {
        return Err(CodecError::OutOfRange {
            token: trimmed.to_string(),
            max: CELL_MASK,
        });
    }
    Ok(Sprite::from_bits_truncate(bits))
}

fn parse_hex(token: &str) -> Option<u32> {
    let trimmed = token.trim();
    let digits = trimmed
        .strip_prefix(TOKEN_PREFIX)
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, RADIX).ok()
}

impl std::fmt::Display for Sprite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:X}", TOKEN_PREFIX, self.bits())
    }
}

impl FromStr for Sprite {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_token(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitgrid::CELL_COUNT;

    #[test]
    fn test_encode_uppercase_with_prefix() {
        assert_eq!(encode(Sprite::from_bits_truncate(0xABCDE)), "0xABCDE");
        assert_eq!(encode(Sprite::from_bits_truncate(CELL_MASK)), "0x1FFFFFF");
    }

    #[test]
    fn test_display_matches_encode() {
        let sprite = Sprite::from_bits_truncate(17974417);
        assert_eq!(sprite.to_string(), encode(sprite));
    }

    #[test]
    fn test_round_trip_sampled_range() {
        // Every 7919th value plus both ends of the range
        let mut values: Vec<u32> = (0..(1u32 << CELL_COUNT)).step_by(7919).collect();
        values.push(CELL_MASK);
        values.push(1);
        for bits in values {
            let sprite = Sprite::from_bits_truncate(bits);
            assert_eq!(decode(&encode(sprite)), sprite, "round trip failed for {:#X}", bits);
        }
    }

    #[test]
    fn test_decode_accepts_bare_and_prefixed() {
        assert_eq!(decode("112A2A1").bits(), 0x112A2A1);
        assert_eq!(decode("0x112A2A1").bits(), 0x112A2A1);
        assert_eq!(decode("0X112a2a1").bits(), 0x112A2A1);
        assert_eq!(decode("  0x1F \n").bits(), 0x1F);
    }

    #[test]
    fn test_decode_failures_are_empty() {
        assert!(decode("").is_empty());
        assert!(decode("not-a-number").is_empty());
        assert!(decode("0x").is_empty());
        assert!(decode("0xZZ").is_empty());
        assert!(decode("-1").is_empty());
        assert!(decode_opt(None).is_empty());
    }

    #[test]
    fn test_decode_overflow_is_empty() {
        assert!(decode("0x1FFFFFFFFF").is_empty());
    }

    #[test]
    fn test_decode_masks_bits_outside_grid() {
        assert_eq!(decode("0x7FFDD7F1").bits(), 0x7FFDD7F1 & CELL_MASK);
    }

    #[test]
    fn test_parse_token_errors() {
        assert_eq!(parse_token(""), Err(CodecError::Empty));
        assert!(matches!(parse_token("hello"), Err(CodecError::NotHex(_))));
        assert!(matches!(parse_token("0x2000000"), Err(CodecError::OutOfRange { .. })));
        assert_eq!(parse_token("0x1F"), Ok(Sprite::from_bits_truncate(31)));
    }

    #[test]
    fn test_from_str() {
        let sprite: Sprite = "0x4".parse().unwrap();
        assert_eq!(sprite.bits(), 4);
    }
}
