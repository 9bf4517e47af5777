//! Cipher error types.

use thiserror::Error;

/// A page could not be obtained.
#[derive(Debug, Error)]
#[error("failed to fetch `{source_name}`: {reason}")]
pub struct FetchError {
    /// Source as given by the user (URL or path).
    pub source_name: String,
    pub reason: String,
}

impl FetchError {
    pub fn new(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

/// Errors raised by the cipher engine.
#[derive(Debug, Error)]
pub enum CipherError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Packed coordinate does not fit in nine base-77 digits.
    #[error("value {value} is outside the base-77 token range")]
    Range { value: u128 },

    /// No unused position is left for a byte (strict mode only).
    #[error("no unused position left for byte 0x{byte:02x} at offset {offset}")]
    AllocationExhausted { byte: u8, offset: usize },

    #[error("too many pages: {0} (at most 65536 are addressable)")]
    TooManyPages(usize),
}
