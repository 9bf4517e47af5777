//! Encode direction: bind each plaintext byte to an unused coordinate.
//!
//! Allocation walks the corpus in order and lets each reference hand out
//! all of its occurrences of a byte, left to right, before moving on to the
//! next reference containing that byte:
//!
//! ```text
//! corpus: [ "abcabc" ]            byte 'a'
//!   1st → char 0      2nd → char 3      3rd → none (exhausted)
//! ```
//!
//! Allocation is order dependent: every call sees the history of all
//! previous calls for the same message.

use rustc_hash::FxHashMap;

use super::{Coordinate, Corpus, RefKey};

/// Append-only record of every allocation made for one message.
#[derive(Debug, Default, Clone)]
pub struct History {
    entries: Vec<(Coordinate, u8)>,
    /// Last allocated offset per `(reference, byte)`.
    ///
    /// Equivalent to scanning `entries` from newest to oldest, since offsets
    /// for one `(reference, byte)` only ever grow.
    last: FxHashMap<(RefKey, u8), u16>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset at which the next search for `byte` in `key` must start.
    pub fn resume_at(&self, key: RefKey, byte: u8) -> usize {
        self.last
            .get(&(key, byte))
            .map_or(0, |&char_index| usize::from(char_index) + 1)
    }

    pub fn record(&mut self, coord: Coordinate, byte: u8) {
        self.last.insert((coord.key(), byte), coord.char_index);
        self.entries.push((coord, byte));
    }

    /// Allocations in the order they were made.
    #[cfg(test)]
    pub fn entries(&self) -> &[(Coordinate, u8)] {
        &self.entries
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sequential allocator over one corpus.
pub struct Allocator<'a> {
    corpus: &'a Corpus,
    history: History,
}

impl<'a> Allocator<'a> {
    pub fn new(corpus: &'a Corpus) -> Self {
        Self {
            corpus,
            history: History::new(),
        }
    }

    /// Next unused coordinate for `byte`, or `None` once every addressable
    /// occurrence has been used.
    pub fn next(&mut self, byte: u8) -> Option<Coordinate> {
        next_coordinate(byte, &mut self.history, self.corpus)
    }

    #[cfg(test)]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[cfg(test)]
    pub fn into_history(self) -> History {
        self.history
    }
}

/// Pick a coordinate for `byte` and record it in `history`.
///
/// Occurrences beyond offset `u16::MAX` cannot be addressed and are skipped.
pub fn next_coordinate(byte: u8, history: &mut History, corpus: &Corpus) -> Option<Coordinate> {
    let candidates = corpus.iter().filter(|r| r.text.contains(&byte));

    for reference in candidates {
        let start = history.resume_at(reference.key(), byte);
        if start >= reference.text.len() {
            continue;
        }

        let Some(found) = reference.text[start..].iter().position(|&b| b == byte) else {
            continue;
        };
        let Ok(char_index) = u16::try_from(start + found) else {
            continue;
        };

        let coord = Coordinate::within(reference, char_index);
        history.record(coord, byte);
        return Some(coord);
    }

    None
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::Reference;

    fn corpus_of(texts: &[&str]) -> Corpus {
        let refs = texts
            .iter()
            .enumerate()
            .map(|(i, t)| Reference::new(*t, 1, i as u16, 0))
            .collect();
        Corpus::build([(0, refs)])
    }

    /// Reference implementation: newest-to-oldest scan of the history.
    fn scan_resume_at(history: &History, key: RefKey, byte: u8) -> usize {
        history
            .entries()
            .iter()
            .rev()
            .find(|(coord, b)| coord.key() == key && *b == byte)
            .map_or(0, |(coord, _)| usize::from(coord.char_index) + 1)
    }

    #[test]
    fn test_non_repetition_within_reference() {
        let corpus = corpus_of(&["abcabc"]);
        let mut alloc = Allocator::new(&corpus);
        assert_eq!(alloc.next(b'a').map(|c| c.char_index), Some(0));
        assert_eq!(alloc.next(b'a').map(|c| c.char_index), Some(3));
        assert_eq!(alloc.next(b'a'), None);
        assert_eq!(alloc.history().len(), 2);
    }

    #[test]
    fn test_reference_exhausted_before_next() {
        let corpus = corpus_of(&["xaxa", "a"]);
        let mut alloc = Allocator::new(&corpus);
        let picks: Vec<_> = std::iter::from_fn(|| alloc.next(b'a'))
            .map(|c| (c.index_in_page, c.char_index))
            .collect();
        assert_eq!(picks, [(0, 1), (0, 3), (1, 0)]);
    }

    #[test]
    fn test_bytes_are_tracked_independently() {
        let corpus = corpus_of(&["ab"]);
        let mut alloc = Allocator::new(&corpus);
        assert_eq!(alloc.next(b'a').map(|c| c.char_index), Some(0));
        assert_eq!(alloc.next(b'b').map(|c| c.char_index), Some(1));
        assert_eq!(alloc.next(b'a'), None);
        assert_eq!(alloc.next(b'b'), None);
    }

    #[test]
    fn test_missing_byte() {
        let corpus = corpus_of(&["hello"]);
        let mut alloc = Allocator::new(&corpus);
        assert_eq!(alloc.next(b'z'), None);
        assert!(alloc.history().is_empty());
    }

    #[test]
    fn test_same_identity_on_other_page_is_separate() {
        let corpus = Corpus::build([
            (0, vec![Reference::new("q", 2, 0, 0)]),
            (1, vec![Reference::new("q", 2, 0, 1)]),
        ]);
        let mut alloc = Allocator::new(&corpus);
        assert_eq!(alloc.next(b'q'), Some(Coordinate::new(0, 0, 2, 0)));
        assert_eq!(alloc.next(b'q'), Some(Coordinate::new(1, 0, 2, 0)));
        assert_eq!(alloc.next(b'q'), None);
    }

    #[test]
    fn test_offsets_beyond_u16_are_skipped() {
        let mut text = vec![b'x'; 70_000];
        text[100] = b'y';
        text[66_000] = b'y';
        let corpus = Corpus::build([(0, vec![Reference::new(text, 0, 0, 0)])]);
        let mut alloc = Allocator::new(&corpus);
        assert_eq!(alloc.next(b'y').map(|c| c.char_index), Some(100));
        assert_eq!(alloc.next(b'y'), None);
    }

    #[test]
    fn test_history_map_matches_linear_scan() {
        let corpus = corpus_of(&["banana", "bandana", "cabana"]);
        let mut history = History::new();
        for &byte in b"aaaaaannnbbbaaaaaaa" {
            for reference in &corpus {
                assert_eq!(
                    history.resume_at(reference.key(), byte),
                    scan_resume_at(&history, reference.key(), byte)
                );
            }
            next_coordinate(byte, &mut history, &corpus);
        }
    }

    #[test]
    fn test_no_coordinate_is_reused() {
        let corpus = corpus_of(&["the quick brown fox", "jumps over the lazy dog"]);
        let mut alloc = Allocator::new(&corpus);
        let message = b"the fox jumps over";
        for &byte in message {
            alloc.next(byte);
        }
        let history = alloc.into_history();
        let mut coords: Vec<_> = history.entries().iter().map(|(c, _)| c.pack()).collect();
        let total = coords.len();
        coords.sort_unstable();
        coords.dedup();
        assert_eq!(coords.len(), total);
        assert_eq!(total, message.len());
    }
}
