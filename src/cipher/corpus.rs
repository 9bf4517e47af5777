//! The keytext: all references of all pages, in page order.

use rustc_hash::FxHashMap;

use super::{RefKey, Reference};

/// Ordered, immutable collection of references across pages.
///
/// Lookups go through a composite-key index that records the *first*
/// reference for every `(page, level, index_in_page)`, so results match a
/// front-to-back linear scan.
#[derive(Debug, Default)]
pub struct Corpus {
    references: Vec<Reference>,
    index: FxHashMap<RefKey, usize>,
    pages: usize,
}

impl Corpus {
    /// Concatenate pages in the given order, keeping reference order within
    /// each page.
    pub fn build<I>(pages: I) -> Self
    where
        I: IntoIterator<Item = (u16, Vec<Reference>)>,
    {
        let mut corpus = Self::default();
        for (page_id, refs) in pages {
            corpus.pages += 1;
            for reference in refs {
                debug_assert_eq!(reference.page_id, page_id);
                corpus.push(reference);
            }
        }
        corpus
    }

    fn push(&mut self, reference: Reference) {
        let pos = self.references.len();
        self.index.entry(reference.key()).or_insert(pos);
        self.references.push(reference);
    }

    /// First reference with the given identity.
    #[cfg(test)]
    pub fn lookup(&self, page_id: u16, level: u16, index_in_page: u16) -> Option<&Reference> {
        self.get(&RefKey {
            page_id,
            level,
            index_in_page,
        })
    }

    #[inline]
    pub fn get(&self, key: &RefKey) -> Option<&Reference> {
        self.index.get(key).map(|&pos| &self.references[pos])
    }

    /// References in corpus order.
    #[inline]
    #[cfg(test)]
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Reference> {
        self.references.iter()
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Number of pages the corpus was built from (including empty ones).
    pub const fn page_count(&self) -> usize {
        self.pages
    }

    /// Total bytes of text across all references.
    pub fn text_len(&self) -> usize {
        self.references.iter().map(|r| r.text.len()).sum()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Reference;
    type IntoIter = std::slice::Iter<'a, Reference>;

    fn into_iter(self) -> Self::IntoIter {
        self.references.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page_id: u16, texts: &[(&str, u16)]) -> (u16, Vec<Reference>) {
        let refs = texts
            .iter()
            .enumerate()
            .map(|(i, (text, level))| Reference::new(*text, *level, i as u16, page_id))
            .collect();
        (page_id, refs)
    }

    #[test]
    fn test_build_preserves_order() {
        let corpus = Corpus::build([page(0, &[("a", 1), ("b", 2)]), page(1, &[("c", 1)])]);
        let texts: Vec<&str> = corpus
            .iter()
            .map(|r| std::str::from_utf8(&r.text).unwrap())
            .collect();
        assert_eq!(texts, ["a", "b", "c"]);
        assert_eq!(corpus.page_count(), 2);
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.text_len(), 3);
    }

    #[test]
    fn test_lookup_hit_and_miss() {
        let corpus = Corpus::build([page(0, &[("alpha", 3), ("beta", 4)])]);
        assert_eq!(corpus.lookup(0, 4, 1).unwrap().text, b"beta");
        assert!(corpus.lookup(0, 3, 1).is_none());
        assert!(corpus.lookup(1, 3, 0).is_none());
    }

    #[test]
    fn test_pages_never_collide() {
        let corpus = Corpus::build([page(0, &[("first", 2)]), page(1, &[("second", 2)])]);
        assert_eq!(corpus.lookup(0, 2, 0).unwrap().text, b"first");
        assert_eq!(corpus.lookup(1, 2, 0).unwrap().text, b"second");
    }

    #[test]
    fn test_lookup_returns_first_match() {
        // Duplicate identities cannot come from the indexer, but lookup must
        // still behave like a front-to-back scan.
        let refs = vec![Reference::new("one", 1, 0, 0), Reference::new("two", 1, 0, 0)];
        let corpus = Corpus::build([(0, refs)]);
        assert_eq!(corpus.lookup(0, 1, 0).unwrap().text, b"one");
        let linear = corpus
            .iter()
            .find(|r| r.page_id == 0 && r.level == 1 && r.index_in_page == 0);
        assert_eq!(corpus.lookup(0, 1, 0), linear);
    }

    #[test]
    fn test_empty_pages_are_counted() {
        let corpus = Corpus::build([(0, Vec::new()), page(1, &[("x", 0)])]);
        assert_eq!(corpus.page_count(), 2);
        assert!(!corpus.is_empty());
        assert!(Corpus::default().is_empty());
    }
}
