//! `[fetch]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [fetch]
//! timeout_secs = 30               # Per-request timeout
//! user_agent = "pagecipher/0.1.0" # User-Agent header for remote pages
//! parallel = true                 # Fetch pages concurrently
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fetch::FetchOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds. Must be non-zero.
    pub timeout_secs: u64,

    pub user_agent: String,

    /// Fetch and index pages on the rayon pool.
    pub parallel: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let defaults = FetchOptions::default();
        Self {
            timeout_secs: defaults.timeout.as_secs(),
            user_agent: defaults.user_agent,
            parallel: defaults.parallel,
        }
    }
}

impl FetchConfig {
    pub fn validate(&self, errors: &mut Vec<String>) {
        if self.timeout_secs == 0 {
            errors.push("[fetch.timeout_secs] must be greater than 0".into());
        }
        if self.user_agent.trim().is_empty() {
            errors.push("[fetch.user_agent] must not be empty".into());
        }
    }

    pub fn options(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
            parallel: self.parallel,
        }
    }
}
