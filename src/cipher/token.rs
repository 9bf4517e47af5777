//! Base-77 token codec.
//!
//! A [`Coordinate`] is packed into a u64 and written as a base-77 numeral
//! using [`ALPHABET`] as digit glyphs, most significant digit first.
//!
//! Only nine digits are budgeted (place values `77^8` down to `77^0`), so
//! packed values at or above [`MAX_PACKED`] are rejected rather than
//! truncated. In practice this limits page ids to 0..=4 and keeps the other
//! fields within modest bounds for page 4.
//!
//! ```text
//! Coordinate { page 0, char 5, level 3, node 12 }
//!   pack   → 0x0000_0005_0003_000C = 21475033100
//!   base77 → "h~&B&5"
//! ```

use super::{CipherError, Coordinate};

/// Digit glyphs, position = digit value.
pub const ALPHABET: &[u8; 77] =
    b"abcdefghi=jklmnopqrst!uvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0987654321@#$%^&*~.+_-,";

/// Numeric base of the token numeral.
pub const BASE: u64 = ALPHABET.len() as u64;

/// Maximum number of digits in a token.
pub const MAX_DIGITS: usize = 9;

/// Smallest packed value that cannot be encoded (`77^8`).
pub const MAX_PACKED: u64 = BASE.pow(MAX_DIGITS as u32 - 1);

/// Reverse lookup: glyph byte → digit value, `NO_DIGIT` for foreign bytes.
const DIGITS: [u8; 256] = build_digit_table();

const NO_DIGIT: u8 = u8::MAX;

#[allow(clippy::cast_possible_truncation)] // ALPHABET has 77 entries
const fn build_digit_table() -> [u8; 256] {
    let mut table = [NO_DIGIT; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Digit value of a glyph.
///
/// Bytes outside the alphabet count as digit 0.
#[inline]
pub const fn digit_of(glyph: u8) -> u64 {
    match DIGITS[glyph as usize] {
        NO_DIGIT => 0,
        d => d as u64,
    }
}

/// Whether every byte of `token` belongs to the alphabet.
pub fn is_well_formed(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| DIGITS[b as usize] != NO_DIGIT)
}

/// Encode a packed value as a token.
///
/// Zero encodes as the single glyph `a`; no other value has leading zeros.
pub fn encode_value(mut value: u64) -> Result<String, CipherError> {
    if value >= MAX_PACKED {
        return Err(CipherError::Range {
            value: u128::from(value),
        });
    }
    if value == 0 {
        return Ok(char::from(ALPHABET[0]).to_string());
    }

    let mut digits = [0u8; MAX_DIGITS];
    let mut len = 0;
    while value > 0 {
        #[allow(clippy::cast_possible_truncation)] // remainder < 77
        let d = (value % BASE) as usize;
        digits[len] = ALPHABET[d];
        value /= BASE;
        len += 1;
    }

    Ok(digits[..len].iter().rev().map(|&b| char::from(b)).collect())
}

/// Decode a token into its packed value.
///
/// Values at or above [`MAX_PACKED`] (including arithmetic overflow from
/// over-long tokens) are rejected.
pub fn decode_value(token: &str) -> Result<u64, CipherError> {
    let mut acc: u128 = 0;
    for glyph in token.bytes() {
        acc = acc
            .checked_mul(u128::from(BASE))
            .and_then(|v| v.checked_add(u128::from(digit_of(glyph))))
            .unwrap_or(u128::MAX);
    }

    match u64::try_from(acc) {
        Ok(value) if value < MAX_PACKED => Ok(value),
        _ => Err(CipherError::Range { value: acc }),
    }
}

/// Encode a coordinate as a token.
#[inline]
pub fn encode(coord: &Coordinate) -> Result<String, CipherError> {
    encode_value(coord.pack())
}

/// Decode a token into a coordinate.
#[inline]
pub fn decode(token: &str) -> Result<Coordinate, CipherError> {
    decode_value(token).map(Coordinate::unpack)
}

// ============================================================================
// tests
// ============================================================================
