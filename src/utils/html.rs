//! HTML utility functions.
//!
//! Provides the small pieces of HTML knowledge the indexer needs:
//! - `push_entity()` - Append a reference's text (or its literal form) to a buffer
//! - `is_raw_text_element()` - Raw text elements (script, style)
//! - `is_tag_name_start()` - Whether `<` really opens a tag
//! - `normalize_tag()` - Case-folded tag names

use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::BytesRef;

// =============================================================================
// Character References
// =============================================================================

/// Append the text of a character reference to `buf`.
///
/// Numeric references (`&#65;`, `&#x41;`) and every HTML5 named entity are
/// resolved. Anything else is kept literally as `&name;`.
pub fn push_entity(buf: &mut Vec<u8>, entity: &BytesRef<'_>) {
    if let Ok(Some(c)) = entity.resolve_char_ref() {
        let mut utf8 = [0u8; 4];
        buf.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
        return;
    }

    let named = std::str::from_utf8(entity).ok().and_then(resolve_html5_entity);
    match named {
        Some(text) => buf.extend_from_slice(text.as_bytes()),
        None => {
            buf.push(b'&');
            buf.extend_from_slice(entity);
            buf.push(b';');
        }
    }
}

// =============================================================================
// Element Classification
// =============================================================================

/// Check if tag is a raw text element (content is not markup).
///
/// Per HTML spec: script and style content is "raw text". Text inside these
/// elements never becomes part of the keytext.
#[inline]
pub fn is_raw_text_element(tag: &str) -> bool {
    matches!(tag, "script" | "style")
}

/// A tag name must start with an ASCII letter. Otherwise the `<` in front
/// of it is ordinary text, as in `1 < 2`.
#[inline]
pub fn is_tag_name_start(name: &[u8]) -> bool {
    name.first().is_some_and(u8::is_ascii_alphabetic)
}

/// Lower-case a raw tag name. Non-UTF-8 bytes are replaced.
#[inline]
pub fn normalize_tag(name: &[u8]) -> String {
    String::from_utf8_lossy(name).to_ascii_lowercase()
}

// =============================================================================
// tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(entities: &[&str]) -> String {
        let mut buf = Vec::new();
        for name in entities {
            push_entity(&mut buf, &BytesRef::new(*name));
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_named_entities() {
        assert_eq!(resolved(&["lt", "amp", "gt", "quot", "apos"]), "<&>\"'");
        assert_eq!(resolved(&["nbsp"]), "\u{00A0}");
        assert_eq!(resolved(&["copy", "mdash", "rsquo", "eacute"]), "\u{a9}\u{2014}\u{2019}\u{e9}");
    }

    #[test]
    fn test_numeric_entities() {
        assert_eq!(resolved(&["#65", "#x42", "#233"]), "ABé");
    }

    #[test]
    fn test_unknown_entities_stay_literal() {
        assert_eq!(resolved(&["bogus"]), "&bogus;");
        assert_eq!(resolved(&["#xZZ"]), "&#xZZ;");
        assert_eq!(resolved(&["#1114112"]), "&#1114112;");

        let mut buf = b"a ".to_vec();
        push_entity(&mut buf, &BytesRef::new("amp"));
        push_entity(&mut buf, &BytesRef::new("nope"));
        assert_eq!(buf, b"a &&nope;");
    }

    #[test]
    fn test_raw_text_elements() {
        assert!(is_raw_text_element("script"));
        assert!(is_raw_text_element("style"));
        assert!(!is_raw_text_element("p"));
        assert!(!is_raw_text_element("textarea"));
    }

    #[test]
    fn test_tag_name_start() {
        assert!(is_tag_name_start(b"p"));
        assert!(is_tag_name_start(b"H1"));
        assert!(!is_tag_name_start(b""));
        assert!(!is_tag_name_start(b"2"));
        assert!(!is_tag_name_start(b"="));
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag(b"SCRIPT"), "script");
        assert_eq!(normalize_tag(b"Div"), "div");
    }
}
