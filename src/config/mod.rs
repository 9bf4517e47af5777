//! Configuration management for `pagecipher.toml`.
//!
//! The config file is optional. When `--config` is not given, the default
//! name is searched upward from the current directory; when nothing is
//! found, built-in defaults apply.
//!
//! # Sections
//!
//! | Section      | Purpose                                  |
//! |--------------|------------------------------------------|
//! | `[sources]`  | Default keytext pages                    |
//! | `[fetch]`    | Request timeout, user agent, parallelism |
//! | `[codec]`    | Placeholder byte, strict mode            |
//! | `[log]`      | Verbose output                           |
//!
//! Command-line flags always win over file values.

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{CodecConfig, FetchConfig, LogConfig, SourcesConfig};

use util::find_config_file;

use crate::cipher::MessageOptions;
use crate::cli::{Cli, Commands};
use crate::fetch::{FetchOptions, Source};
use crate::log;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file name searched for when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "pagecipher.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing pagecipher.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CipherConfig {
    /// Path of the loaded config file, if any (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub codec: CodecConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl CipherConfig {
    /// Load configuration and apply command-line overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match Self::resolve_config_path(cli, &cwd)? {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.config_path = Some(path);
                config
            }
            None => Self::default(),
        };

        config.apply_command_options(cli);
        config.validate()?;
        crate::logger::set_verbose(config.log.verbose);

        if let Some(path) = &config.config_path {
            crate::debug!("config"; "loaded {}", path.display());
        }
        Ok(config)
    }

    /// Locate the config file.
    ///
    /// An explicit `--config` must exist; the default name is optional.
    fn resolve_config_path(cli: &Cli, cwd: &Path) -> Result<Option<PathBuf>> {
        match &cli.config {
            Some(name) => find_config_file(name, cwd)
                .map(Some)
                .ok_or_else(|| {
                    ConfigError::Io(
                        name.clone(),
                        std::io::Error::from(std::io::ErrorKind::NotFound),
                    )
                })
                .map_err(Into::into),
            None => Ok(find_config_file(Path::new(DEFAULT_CONFIG), cwd)),
        }
    }

    /// Parse configuration from TOML string
    #[cfg(test)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        log!("warning"; "unknown fields in {}, ignoring:", path.display());
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Directory that relative config entries are resolved against.
    pub fn root(&self) -> Option<&Path> {
        self.config_path.as_deref().and_then(Path::parent)
    }

    /// `[sources] urls`, parsed, with relative paths resolved against the
    /// config file's directory.
    pub fn sources(&self) -> Result<Vec<Source>> {
        self.sources
            .urls
            .iter()
            .map(|raw| {
                let source = Source::parse(raw).context("invalid entry in [sources] urls")?;
                Ok(match self.root() {
                    Some(root) => source.relative_to(root),
                    None => source,
                })
            })
            .collect()
    }

    pub fn fetch_options(&self) -> FetchOptions {
        self.fetch.options()
    }

    pub fn message_options(&self) -> MessageOptions {
        self.codec.options(self.fetch.parallel)
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        if let Some(args) = cli.codec_args() {
            Self::update_option(&mut self.fetch.parallel, args.source.parallel.as_ref());
            Self::update_option(&mut self.codec.strict, args.strict.as_ref());
            self.log.verbose |= args.verbose;
        }
        if let Commands::Decode {
            placeholder: Some(placeholder),
            ..
        } = &cli.command
        {
            self.codec.placeholder = placeholder.to_string();
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration, reporting all problems at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        self.fetch.validate(&mut errors);
        self.codec.validate(&mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> CipherConfig {
    let (parsed, ignored) = CipherConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
