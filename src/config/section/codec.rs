//! `[codec]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [codec]
//! placeholder = "#"   # Written for tokens that cannot be resolved
//! strict = false      # Fail instead of degrading to markers/placeholders
//! ```

use serde::{Deserialize, Serialize};

use crate::cipher::MessageOptions;
use crate::cipher::message::DEFAULT_PLACEHOLDER;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Exactly one ASCII character.
    pub placeholder: String,
    pub strict: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            placeholder: char::from(DEFAULT_PLACEHOLDER).to_string(),
            strict: false,
        }
    }
}

impl CodecConfig {
    /// The placeholder as a byte, if it is a single ASCII character.
    pub fn placeholder_byte(&self) -> Option<u8> {
        match self.placeholder.as_bytes() {
            [b] if b.is_ascii() => Some(*b),
            _ => None,
        }
    }

    pub fn validate(&self, errors: &mut Vec<String>) {
        if self.placeholder_byte().is_none() {
            errors.push(format!(
                "[codec.placeholder] must be a single ASCII character, got {:?}",
                self.placeholder
            ));
        }
    }

    pub fn options(&self, parallel: bool) -> MessageOptions {
        MessageOptions {
            placeholder: self.placeholder_byte().unwrap_or(DEFAULT_PLACEHOLDER),
            strict: self.strict,
            parallel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_codec_config() {
        let config = test_parse_config("[codec]\nplaceholder = \"?\"\nstrict = true");
        let options = config.codec.options(false);
        assert_eq!(options.placeholder, b'?');
        assert!(options.strict);
    }

    #[test]
    fn test_codec_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.codec.placeholder, "#");
        assert!(!config.codec.strict);
    }

    #[test]
    fn test_placeholder_validation() {
        for bad in ["", "ab", "é"] {
            let config = CodecConfig {
                placeholder: bad.into(),
                strict: false,
            };
            let mut errors = Vec::new();
            config.validate(&mut errors);
            assert_eq!(errors.len(), 1, "{bad:?} should be rejected");
        }
    }
}
