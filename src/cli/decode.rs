//! `decode` command.

use std::io::{self, Write};

use anyhow::{Context, Result};

use super::CodecArgs;
use super::common::{load_keytext, read_message};
use crate::cipher::{Corpus, Decoded, MessageOptions, decode_message};
use crate::config::CipherConfig;
use crate::log;

pub fn run(args: &CodecArgs, config: &CipherConfig) -> Result<()> {
    let tokens = token_text(read_message(args, "decode")?);
    let corpus = load_keytext(&args.source, config)?;
    let decoded = decode(&tokens, &corpus, &config.message_options())?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(&decoded.bytes)
        .and_then(|()| writeln!(stdout))
        .context("Failed to write message")?;
    Ok(())
}

/// Token glyphs are ASCII. Any other byte stays one glyph wide, as a `?`
/// that is outside the alphabet.
fn token_text(bytes: Vec<u8>) -> String {
    bytes
        .into_iter()
        .map(|b| if b.is_ascii() { char::from(b) } else { '?' })
        .collect()
}

/// Decode and summarize tokens that fell back to the placeholder.
fn decode(tokens: &str, corpus: &Corpus, options: &MessageOptions) -> Result<Decoded> {
    let decoded = decode_message(tokens, corpus, options).context("Failed to decode tokens")?;

    if decoded.unresolved() > 0 {
        log!(
            "decode";
            "{} unresolved token(s) replaced with '{}': {} marker(s), {} miss(es), {} invalid",
            decoded.unresolved(),
            char::from(options.placeholder),
            decoded.markers,
            decoded.misses,
            decoded.invalid
        );
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::{Coordinate, encode_message, index_document, token};

    fn corpus() -> Corpus {
        Corpus::build([(0, index_document(b"<p>keytext</p>", 0))])
    }

    #[test]
    fn test_decode_round_trip() {
        let corpus = corpus();
        let options = MessageOptions::default();
        let encoded = encode_message(b"key", &corpus, &options).unwrap();
        assert_eq!(decode(&encoded.text, &corpus, &options).unwrap().bytes, b"key");
    }

    #[test]
    fn test_decode_counts_unresolved() {
        let corpus = corpus();
        let miss = token::encode(&Coordinate::new(0, 0, 7, 7)).unwrap();
        let text = format!("{miss}//baaaaaaaa");
        let decoded = decode(&text, &corpus, &MessageOptions::default()).unwrap();
        assert_eq!(decoded.bytes, b"###");
        assert_eq!((decoded.misses, decoded.markers, decoded.invalid), (1, 1, 1));
    }

    #[test]
    fn test_token_text_keeps_byte_width() {
        assert_eq!(token_text(b"h~&B&5/a".to_vec()), "h~&B&5/a");
        assert_eq!(token_text(b"b\xffa/\xe9".to_vec()), "b?a/?");

        // A leading foreign byte is a zero digit: `?ke=` is `ke=`, the `k`
        // of "keytext" (level 1, node 0, char 0)
        let tokens = token_text(b"\xffke=".to_vec());
        let decoded = decode(&tokens, &corpus(), &MessageOptions::default()).unwrap();
        assert_eq!(decoded.bytes, b"k");
    }

    #[test]
    fn test_decode_strict_error_has_context() {
        let options = MessageOptions {
            strict: true,
            ..MessageOptions::default()
        };
        let err = decode("baaaaaaaa", &corpus(), &options).unwrap_err();
        assert_eq!(err.to_string(), "Failed to decode tokens");
    }
}
