//! Decode direction: token → byte.

use super::{CipherError, Corpus, token};

/// Outcome of resolving one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Byte(u8),
    /// No such reference, or the offset is past the end of its text.
    Miss,
}

impl Resolution {
    /// The resolved byte, or `placeholder` on a miss.
    #[inline]
    #[cfg(test)]
    pub const fn or(self, placeholder: u8) -> u8 {
        match self {
            Self::Byte(b) => b,
            Self::Miss => placeholder,
        }
    }
}

/// Resolve a token against the corpus.
///
/// Fails only when the token is outside the base-77 range; lookup misses are
/// reported as [`Resolution::Miss`].
pub fn resolve(tok: &str, corpus: &Corpus) -> Result<Resolution, CipherError> {
    let coord = token::decode(tok)?;
    let resolution = corpus
        .get(&coord.key())
        .and_then(|reference| reference.byte_at(coord.char_index))
        .map_or(Resolution::Miss, Resolution::Byte);
    Ok(resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::{Coordinate, Reference};

    fn corpus() -> Corpus {
        Corpus::build([
            (0, vec![Reference::new("hello", 2, 0, 0)]),
            (1, vec![Reference::new("world", 2, 0, 1)]),
        ])
    }

    fn tok(page: u16, char_index: u16, level: u16, index: u16) -> String {
        token::encode(&Coordinate::new(page, char_index, level, index)).unwrap()
    }

    #[test]
    fn test_resolve_hit() {
        let corpus = corpus();
        assert_eq!(resolve(&tok(0, 1, 2, 0), &corpus).unwrap(), Resolution::Byte(b'e'));
        assert_eq!(resolve(&tok(1, 4, 2, 0), &corpus).unwrap(), Resolution::Byte(b'd'));
    }

    #[test]
    fn test_resolve_unknown_reference() {
        let corpus = corpus();
        assert_eq!(resolve(&tok(0, 0, 3, 0), &corpus).unwrap(), Resolution::Miss);
        assert_eq!(resolve(&tok(2, 0, 2, 0), &corpus).unwrap(), Resolution::Miss);
    }

    #[test]
    fn test_resolve_offset_past_end() {
        let corpus = corpus();
        // "hello" has 5 bytes; offset 5 is one past the end
        assert_eq!(resolve(&tok(0, 5, 2, 0), &corpus).unwrap(), Resolution::Miss);
        assert_eq!(Resolution::Miss.or(b'#'), b'#');
    }

    #[test]
    fn test_resolve_out_of_range() {
        assert!(matches!(
            resolve("baaaaaaaa", &corpus()),
            Err(CipherError::Range { .. })
        ));
    }
}
