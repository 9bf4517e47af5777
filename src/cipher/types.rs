//! Core value types shared by the cipher modules.

use std::fmt;

/// Identity of a text node: `(page, level, index_in_page)`.
///
/// Unique within a corpus for every reference produced by the indexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefKey {
    pub page_id: u16,
    pub level: u16,
    pub index_in_page: u16,
}

/// One addressable text node of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Literal text content (entities already unescaped).
    pub text: Vec<u8>,
    /// Nesting depth at which the text node appeared.
    pub level: u16,
    /// 0-based order among accepted text nodes of the page.
    pub index_in_page: u16,
    /// Page the node came from.
    pub page_id: u16,
}

impl Reference {
    pub fn new(text: impl Into<Vec<u8>>, level: u16, index_in_page: u16, page_id: u16) -> Self {
        Self {
            text: text.into(),
            level,
            index_in_page,
            page_id,
        }
    }

    #[inline]
    pub const fn key(&self) -> RefKey {
        RefKey {
            page_id: self.page_id,
            level: self.level,
            index_in_page: self.index_in_page,
        }
    }

    /// Byte at `char_index`, if inside the text.
    #[inline]
    pub fn byte_at(&self, char_index: u16) -> Option<u8> {
        self.text.get(usize::from(char_index)).copied()
    }
}

/// Position of one character: a reference identity plus an offset into its text.
///
/// Plain value type, compared field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinate {
    pub page_id: u16,
    pub char_index: u16,
    pub level: u16,
    pub index_in_page: u16,
}

impl Coordinate {
    pub const fn new(page_id: u16, char_index: u16, level: u16, index_in_page: u16) -> Self {
        Self {
            page_id,
            char_index,
            level,
            index_in_page,
        }
    }

    /// Coordinate of `char_index` inside `reference`.
    pub const fn within(reference: &Reference, char_index: u16) -> Self {
        Self::new(
            reference.page_id,
            char_index,
            reference.level,
            reference.index_in_page,
        )
    }

    #[inline]
    pub const fn key(&self) -> RefKey {
        RefKey {
            page_id: self.page_id,
            level: self.level,
            index_in_page: self.index_in_page,
        }
    }

    /// Pack into a u64, big-endian field order:
    /// `page_id` (48..64), `char_index` (32..48), `level` (16..32), `index_in_page` (0..16).
    pub const fn pack(&self) -> u64 {
        ((self.page_id as u64) << 48)
            | ((self.char_index as u64) << 32)
            | ((self.level as u64) << 16)
            | (self.index_in_page as u64)
    }

    /// Inverse of [`Coordinate::pack`].
    #[allow(clippy::cast_possible_truncation)] // each field is masked to 16 bits
    pub const fn unpack(value: u64) -> Self {
        Self {
            page_id: (value >> 48) as u16,
            char_index: (value >> 32) as u16,
            level: (value >> 16) as u16,
            index_in_page: value as u16,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "page {} node {}@{} char {}",
            self.page_id, self.index_in_page, self.level, self.char_index
        )
    }
}
