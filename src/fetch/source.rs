//! Keytext sources: where a page's bytes come from.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

use crate::cipher::FetchError;

/// One keytext page location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// `http://` or `https://` URL.
    Remote(Url),
    /// Local file, given as a path or a `file://` URL.
    Local(PathBuf),
}

impl Source {
    /// Classify a user-supplied source string.
    ///
    /// # Examples
    /// ```ignore
    /// Source::parse("https://example.com/a")  -> Remote
    /// Source::parse("file:///tmp/page.html")  -> Local("/tmp/page.html")
    /// Source::parse("pages/page.html")        -> Local("pages/page.html")
    /// ```
    pub fn parse(raw: &str) -> Result<Self, FetchError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(FetchError::new(raw, "empty source"));
        }

        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Self::Remote(url)),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(Self::Local)
                .map_err(|()| FetchError::new(raw, "invalid file URL")),
            // Single letters are Windows drive prefixes (`C:\...`), not schemes
            Ok(url) if url.scheme().len() > 1 => {
                Err(FetchError::new(raw, format!("unsupported scheme `{}`", url.scheme())))
            }
            _ => Ok(Self::Local(PathBuf::from(raw))),
        }
    }

    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// Resolve relative local paths against `base`.
    pub fn relative_to(self, base: &Path) -> Self {
        match self {
            Self::Local(path) if path.is_relative() => Self::Local(base.join(path)),
            other => other,
        }
    }

    /// Read a local source.
    pub(super) fn read_local(path: &Path) -> Result<Vec<u8>, FetchError> {
        fs::read(path).map_err(|err| FetchError::new(path.display().to_string(), err))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Parse a source list: one source per line, blank lines and `#` comments
/// skipped.
pub fn parse_source_list(content: &str) -> Result<Vec<Source>, FetchError> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(Source::parse)
        .collect()
}

// ============================================================================
// tests
// ============================================================================
