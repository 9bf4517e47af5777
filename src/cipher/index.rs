//! Document indexing: markup → ordered text node references.
//!
//! Markup is read as a stream of open, close, and text events. Every text
//! event outside `script`/`style` becomes a [`Reference`] carrying the
//! current nesting depth and a per-page sequence number.
//!
//! Malformed markup is not an error. A bare `&` stays text, as does a `<`
//! that does not open a tag (`1 < 2`). Indexing stops at the first token the
//! reader cannot recover from and keeps what it has gathered.
//!
//! # Depth
//!
//! Depth counts open tags minus close tags, exactly as they appear. Void
//! elements written without a slash (`<br>`) therefore raise the depth of
//! everything after them, while `<br/>` leaves it alone.

use quick_xml::{
    Reader,
    events::{BytesRef, Event},
};

use super::Reference;
use crate::debug;
use crate::utils::html;

/// Index one document.
///
/// Never fails; see the module docs for how malformed input is handled.
pub fn index_document(content: &[u8], page_id: u16) -> Vec<Reference> {
    let mut indexer = PageIndexer::new(page_id);
    // Offset of the current reader's input within `content`.
    let mut base = 0usize;
    let mut reader = create_html_reader(content);

    loop {
        if indexer.is_full() {
            debug!("index"; "page {} reached {} text nodes, stopping", page_id, MAX_NODES);
            break;
        }

        match reader.read_event() {
            Ok(Event::Start(elem)) if !html::is_tag_name_start(elem.name().as_ref()) => {
                // `<` + content + `>`
                let lt = base + position(&reader) - elem.len() - 2;
                indexer.push_text(b"<");
                base = lt + 1;
                reader = create_html_reader(&content[base..]);
            }
            Ok(Event::Empty(elem)) if !html::is_tag_name_start(elem.name().as_ref()) => {
                // `<` + content + `/>`
                let lt = base + position(&reader) - elem.len() - 3;
                indexer.push_text(b"<");
                base = lt + 1;
                reader = create_html_reader(&content[base..]);
            }
            Ok(Event::Start(elem)) => {
                let tag = html::normalize_tag(elem.name().as_ref());
                let raw = html::is_raw_text_element(&tag);
                indexer.open(tag);

                if raw {
                    let body = base + position(&reader);
                    let rest = content.get(body..).unwrap_or_default();
                    let Some((text_len, close_len)) = find_raw_text_end(rest, elem.name().as_ref())
                    else {
                        debug!("index"; "page {}: unterminated raw text at byte {}", page_id, body);
                        break;
                    };
                    indexer.text(&rest[..text_len]);
                    indexer.close_top();

                    // Resume markup parsing after the close tag.
                    base = body + text_len + close_len;
                    reader = create_html_reader(&content[base..]);
                }
            }
            // `</ 2>` and `</>` are not close tags
            Ok(Event::End(elem)) if !html::is_tag_name_start(elem.name().as_ref()) => {
                indexer.flush();
            }
            Ok(Event::End(elem)) => {
                indexer.close(&html::normalize_tag(elem.name().as_ref()));
            }
            Ok(Event::Text(text)) => indexer.push_text(&text),
            Ok(Event::CData(data)) => indexer.push_text(&data),
            Ok(Event::GeneralRef(entity)) => indexer.push_entity(&entity),
            Ok(Event::Eof) => break,
            // Self-closing tags, comments, doctype, declarations, PIs
            Ok(_) => indexer.flush(),
            Err(err) => {
                debug!(
                    "index";
                    "page {}: markup error at byte {}: {}",
                    page_id,
                    base as u64 + reader.error_position(),
                    err
                );
                break;
            }
        }
    }

    indexer.finish()
}

/// Create a lenient reader: HTML routinely leaves elements unclosed, closes
/// them out of order, and writes a bare `&` in text.
fn create_html_reader(content: &[u8]) -> Reader<&[u8]> {
    let mut reader = Reader::from_reader(content);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.allow_dangling_amp = true;
    reader
}

#[allow(clippy::cast_possible_truncation)] // bounded by the input length
fn position(reader: &Reader<&[u8]>) -> usize {
    reader.buffer_position() as usize
}

/// Locate the close tag of a raw text element in `rest`.
///
/// Returns `(text_len, close_len)`: the raw text is `rest[..text_len]` and
/// the close tag spans the following `close_len` bytes. Matching is
/// ASCII case-insensitive, so `<SCRIPT>` may be closed by `</script>`.
fn find_raw_text_end(rest: &[u8], tag: &[u8]) -> Option<(usize, usize)> {
    let mut from = 0;
    while let Some(found) = rest[from..].windows(2).position(|w| w == b"</") {
        let start = from + found;
        let name_end = start + 2 + tag.len();
        let name_matches = rest
            .get(start + 2..name_end)
            .is_some_and(|name| name.eq_ignore_ascii_case(tag));
        let boundary = rest
            .get(name_end)
            .is_some_and(|&b| b == b'>' || b == b'/' || b.is_ascii_whitespace());

        if name_matches && boundary {
            let gt = rest[name_end..].iter().position(|&b| b == b'>')?;
            return Some((start, name_end + gt + 1 - start));
        }
        from = start + 2;
    }
    None
}

/// Highest number of text nodes addressable in one page.
const MAX_NODES: u32 = u16::MAX as u32 + 1;

// ============================================================================
// PageIndexer
// ============================================================================

/// Event-driven state machine that turns markup events into references.
///
/// Suppression is tracked with a stack of open element names: text is
/// discarded while any open element is a raw text element, so nested or
/// sibling `script`/`style` elements are handled correctly.
struct PageIndexer {
    page_id: u16,
    depth: u16,
    open: Vec<String>,
    /// Adjacent text pieces (text, CDATA, entities) forming one text node.
    pending: Option<Vec<u8>>,
    /// Accepted text nodes so far.
    count: u32,
    references: Vec<Reference>,
}

impl PageIndexer {
    fn new(page_id: u16) -> Self {
        Self {
            page_id,
            depth: 0,
            open: Vec::new(),
            pending: None,
            count: 0,
            references: Vec::new(),
        }
    }

    fn is_suppressed(&self) -> bool {
        self.open.iter().any(|tag| html::is_raw_text_element(tag))
    }

    fn is_full(&self) -> bool {
        self.count >= MAX_NODES
    }

    fn open(&mut self, tag: String) {
        self.flush();
        self.depth = self.depth.saturating_add(1);
        self.open.push(tag);
    }

    /// Close the nearest open element named `tag`, along with anything opened
    /// after it. Unmatched close tags only lower the depth.
    fn close(&mut self, tag: &str) {
        self.flush();
        self.depth = self.depth.saturating_sub(1);
        if let Some(pos) = self.open.iter().rposition(|open| open == tag) {
            self.open.truncate(pos);
        }
    }

    /// Close the element opened last.
    fn close_top(&mut self) {
        self.flush();
        self.depth = self.depth.saturating_sub(1);
        self.open.pop();
    }

    fn push_text(&mut self, bytes: &[u8]) {
        self.pending.get_or_insert_with(Vec::new).extend_from_slice(bytes);
    }

    fn push_entity(&mut self, entity: &BytesRef<'_>) {
        html::push_entity(self.pending.get_or_insert_with(Vec::new), entity);
    }

    /// A complete text node.
    fn text(&mut self, bytes: &[u8]) {
        self.push_text(bytes);
        self.flush();
    }

    fn flush(&mut self) {
        let Some(text) = self.pending.take() else {
            return;
        };
        if text.is_empty() || self.is_suppressed() || self.is_full() {
            return;
        }

        #[allow(clippy::cast_possible_truncation)] // is_full() bounds count to u16
        let index_in_page = self.count as u16;
        self.references
            .push(Reference::new(text, self.depth, index_in_page, self.page_id));
        self.count += 1;
    }

    fn finish(mut self) -> Vec<Reference> {
        self.flush();
        self.references
    }
}

// ============================================================================
// tests
// ============================================================================
