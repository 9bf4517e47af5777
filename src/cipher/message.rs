//! Whole-message encoding and decoding.
//!
//! # Wire Format
//!
//! One token per plaintext byte, in byte order, joined with `/`:
//!
//! ```text
//! "hi!"  →  T(h) "/" T(i) "/" T(!)
//! ```
//!
//! A byte that could not be allocated is written as an empty token, so the
//! delimiters around it stay in place (`"T(h)//T(!)"`). Decoding turns empty
//! tokens, lookup misses and out-of-range tokens into the placeholder byte.

use rayon::prelude::*;

use super::{Allocator, CipherError, Corpus, Resolution, resolve, token};
use crate::debug;

/// Token delimiter on the wire.
pub const DELIMITER: &str = "/";

/// Byte substituted for tokens that cannot be resolved.
pub const DEFAULT_PLACEHOLDER: u8 = b'#';

/// Knobs shared by encoding and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageOptions {
    /// Byte written for unresolved tokens.
    pub placeholder: u8,
    /// Fail on the first unallocatable byte or out-of-range token instead of
    /// degrading to markers and placeholders.
    pub strict: bool,
    /// Resolve tokens on the rayon pool.
    pub parallel: bool,
}

impl Default for MessageOptions {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER,
            strict: false,
            parallel: false,
        }
    }
}

// ============================================================================
// Encode
// ============================================================================

/// Result of encoding a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoded {
    /// Delimited token string.
    pub text: String,
    /// Offsets of bytes that got the failure marker.
    pub unallocated: Vec<usize>,
}

impl Encoded {
    pub fn is_complete(&self) -> bool {
        self.unallocated.is_empty()
    }
}

/// Encode `message` against `corpus`.
///
/// Bytes are allocated strictly in order. Coordinates that fall outside the
/// token range abort encoding with [`CipherError::Range`].
pub fn encode_message(
    message: &[u8],
    corpus: &Corpus,
    options: &MessageOptions,
) -> Result<Encoded, CipherError> {
    let mut allocator = Allocator::new(corpus);
    let mut tokens = Vec::with_capacity(message.len());
    let mut unallocated = Vec::new();

    for (offset, &byte) in message.iter().enumerate() {
        match allocator.next(byte) {
            Some(coord) => {
                let tok = token::encode(&coord)?;
                debug!("encode"; "0x{:02x} → {} ({})", byte, tok, coord);
                tokens.push(tok);
            }
            None if options.strict => {
                return Err(CipherError::AllocationExhausted { byte, offset });
            }
            None => {
                unallocated.push(offset);
                tokens.push(String::new());
            }
        }
    }

    Ok(Encoded {
        text: tokens.join(DELIMITER),
        unallocated,
    })
}

// ============================================================================
// Decode
// ============================================================================

/// Result of decoding a token string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    pub bytes: Vec<u8>,
    /// Empty tokens (failure markers).
    pub markers: usize,
    /// Tokens that decoded but matched nothing in the corpus.
    pub misses: usize,
    /// Tokens outside the base-77 range.
    pub invalid: usize,
}

impl Decoded {
    /// Number of placeholder bytes in the output.
    pub const fn unresolved(&self) -> usize {
        self.markers + self.misses + self.invalid
    }
}

enum Outcome {
    Byte(u8),
    Marker,
    Miss,
    Invalid(CipherError),
}

fn decode_token(tok: &str, corpus: &Corpus) -> Outcome {
    let tok = tok.trim();
    if tok.is_empty() {
        return Outcome::Marker;
    }
    if !token::is_well_formed(tok) {
        debug!("decode"; "token {:?} has symbols outside the alphabet", tok);
    }

    match resolve(tok, corpus) {
        Ok(Resolution::Byte(b)) => Outcome::Byte(b),
        Ok(Resolution::Miss) => Outcome::Miss,
        Err(err) => Outcome::Invalid(err),
    }
}

/// Decode a delimited token string against `corpus`.
///
/// Surrounding whitespace is ignored and an empty string decodes to nothing.
pub fn decode_message(
    text: &str,
    corpus: &Corpus,
    options: &MessageOptions,
) -> Result<Decoded, CipherError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Decoded::default());
    }

    let tokens: Vec<&str> = text.split(DELIMITER).collect();
    let outcomes: Vec<Outcome> = if options.parallel {
        tokens.par_iter().map(|tok| decode_token(tok, corpus)).collect()
    } else {
        tokens.iter().map(|tok| decode_token(tok, corpus)).collect()
    };

    let mut decoded = Decoded {
        bytes: Vec::with_capacity(outcomes.len()),
        ..Decoded::default()
    };
    for outcome in outcomes {
        let byte = match outcome {
            Outcome::Byte(b) => b,
            Outcome::Marker => {
                decoded.markers += 1;
                options.placeholder
            }
            Outcome::Miss => {
                decoded.misses += 1;
                options.placeholder
            }
            Outcome::Invalid(err) if options.strict => return Err(err),
            Outcome::Invalid(err) => {
                debug!("decode"; "{}", err);
                decoded.invalid += 1;
                options.placeholder
            }
        };
        decoded.bytes.push(byte);
    }

    Ok(decoded)
}

// ============================================================================
// tests
// ============================================================================
