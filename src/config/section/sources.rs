//! `[sources]` section configuration.
//!
//! Default keytext pages, used only when no sources are given on the
//! command line.
//!
//! # Example
//!
//! ```toml
//! [sources]
//! urls = [
//!     "https://example.com/articles/one.html",
//!     "pages/local-copy.html",              # relative to pagecipher.toml
//! ]
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Keytext page locations, in page order.
    pub urls: Vec<String>,
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_sources_config() {
        let config = test_parse_config("[sources]\nurls = [\"https://a.example\", \"b.html\"]");
        assert_eq!(config.sources.urls, ["https://a.example", "b.html"]);
    }

    #[test]
    fn test_sources_default_empty() {
        assert!(test_parse_config("").sources.urls.is_empty());
    }
}
