//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::{CodecArgs, SourceArgs};
use crate::cipher::Corpus;
use crate::config::CipherConfig;
use crate::fetch::{self, Source, parse_source_list};
use crate::{debug, log};

/// Read a source list file.
pub fn read_source_list(path: &Path) -> Result<Vec<Source>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read source list `{}`", path.display()))?;
    parse_source_list(&content)
        .with_context(|| format!("Invalid entry in source list `{}`", path.display()))
}

/// Final, ordered source list for a run.
///
/// List-file entries come first, then `--source` entries; `[sources] urls`
/// from the config is used only when both are empty.
pub fn collect_sources(args: &SourceArgs, config: &CipherConfig) -> Result<Vec<Source>> {
    let mut sources = match &args.urls {
        Some(path) => read_source_list(path)?,
        None => Vec::new(),
    };
    for raw in &args.sources {
        sources.push(Source::parse(raw).context("Invalid --source")?);
    }

    if sources.is_empty() {
        sources = config.sources()?;
    }
    if sources.is_empty() {
        bail!("no keytext sources given (use --urls, --source or [sources] urls)");
    }

    debug_sources(&sources);
    Ok(sources)
}

fn debug_sources(sources: &[Source]) {
    crate::debug_do! {
        for (page, source) in sources.iter().enumerate() {
            debug!("fetch"; "page {}: {}", page, source);
        }
    }
}

/// Fetch and index the keytext for a run.
pub fn load_keytext(args: &SourceArgs, config: &CipherConfig) -> Result<Corpus> {
    let sources = collect_sources(args, config)?;
    let corpus = fetch::load_corpus(&sources, &config.fetch_options())
        .context("Failed to load keytext")?;
    if corpus.is_empty() {
        log!("warning"; "keytext pages contain no usable text");
    }
    Ok(corpus)
}

/// The message to process, from `--message` or stdin.
///
/// `verb` names the operation in the error for an empty message.
pub fn read_message(args: &CodecArgs, verb: &str) -> Result<Vec<u8>> {
    if args.stdin && args.message.is_some() {
        bail!("cannot specify a message flag and reading from input");
    }

    let message = if args.stdin {
        read_message_from(io::stdin().lock()).context("Failed to read message from stdin")?
    } else {
        args.message.clone().unwrap_or_default().into_bytes()
    };

    if message.is_empty() {
        bail!("you must specify a message to {verb}");
    }
    Ok(message)
}

/// Read a message line by line.
///
/// Input is taken as raw bytes, so it need not be UTF-8. Lines are trimmed
/// of ASCII whitespace. A single blank line between content lines becomes a
/// line break; two consecutive blank lines (or end of input) end the
/// message. Leading blank lines are skipped.
pub fn read_message_from(reader: impl BufRead) -> io::Result<Vec<u8>> {
    let mut message = Vec::new();
    let mut blank_run = 0;

    for line in reader.split(b'\n') {
        let line = line?;
        let line = line.trim_ascii();

        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                break;
            }
            continue;
        }

        if blank_run > 0 && !message.is_empty() {
            message.push(b'\n');
        }
        blank_run = 0;
        message.extend_from_slice(line);
    }

    Ok(message)
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn read(input: &[u8]) -> Vec<u8> {
        read_message_from(Cursor::new(input)).unwrap()
    }

    #[test]
    fn test_read_message_lines_are_joined() {
        assert_eq!(read(b"  hello \nworld\n"), b"helloworld");
    }

    #[test]
    fn test_read_message_single_blank_is_newline() {
        assert_eq!(read(b"first\n\nsecond\n"), b"first\nsecond");
    }

    #[test]
    fn test_read_message_double_blank_ends() {
        assert_eq!(read(b"first\n\n\nignored\n"), b"first");
    }

    #[test]
    fn test_read_message_without_trailing_newline() {
        assert_eq!(read(b"last line"), b"last line");
        assert_eq!(read(b""), b"");
    }

    #[test]
    fn test_read_message_leading_blank_skipped() {
        assert_eq!(read(b"\n  text\n"), b"text");
    }

    #[test]
    fn test_read_message_crlf() {
        assert_eq!(read(b"one\r\n\r\ntwo\r\n"), b"one\ntwo");
    }

    #[test]
    fn test_read_message_non_utf8() {
        assert_eq!(read(b"caf\xe9 au lait\n"), b"caf\xe9 au lait");
        assert_eq!(read(b"\xff\xfe\n\n\x80\n"), b"\xff\xfe\n\x80");
    }

    #[test]
    fn test_read_message_empty_errors() {
        let args = CodecArgs {
            message: Some(String::new()),
            ..CodecArgs::default()
        };
        let err = read_message(&args, "encode").unwrap_err();
        assert_eq!(err.to_string(), "you must specify a message to encode");

        let err = read_message(&CodecArgs::default(), "decode").unwrap_err();
        assert!(err.to_string().ends_with("decode"));
    }

    #[test]
    fn test_read_message_from_flag() {
        let args = CodecArgs {
            message: Some("hi there".into()),
            ..CodecArgs::default()
        };
        assert_eq!(read_message(&args, "encode").unwrap(), b"hi there");
    }

    #[test]
    fn test_read_message_conflict() {
        let args = CodecArgs {
            message: Some("x".into()),
            stdin: true,
            ..CodecArgs::default()
        };
        assert!(read_message(&args, "encode").is_err());
    }

    #[test]
    fn test_collect_sources_order() {
        let dir = TempDir::new().unwrap();
        let list = dir.path().join("urls.txt");
        fs::write(&list, "# pages\nhttps://example.com/one\n\nlocal.html\n").unwrap();

        let args = SourceArgs {
            urls: Some(list),
            sources: vec!["extra.html".into()],
            parallel: None,
        };
        let mut config = CipherConfig::default();
        config.sources.urls = vec!["from-config.html".into()];

        let sources = collect_sources(&args, &config).unwrap();
        let names: Vec<String> = sources.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["https://example.com/one", "local.html", "extra.html"]);
    }

    #[test]
    fn test_collect_sources_falls_back_to_config() {
        let mut config = CipherConfig::default();
        config.sources.urls = vec!["https://example.com/cfg".into()];
        let sources = collect_sources(&SourceArgs::default(), &config).unwrap();
        assert_eq!(sources.len(), 1);
        assert!(sources[0].is_remote());
    }

    #[test]
    fn test_collect_sources_none() {
        assert!(collect_sources(&SourceArgs::default(), &CipherConfig::default()).is_err());
    }

    #[test]
    fn test_missing_source_list() {
        let dir = TempDir::new().unwrap();
        let err = read_source_list(&dir.path().join("nope.txt")).unwrap_err();
        assert!(err.to_string().contains("nope.txt"));
    }
}
