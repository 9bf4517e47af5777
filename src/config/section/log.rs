//! `[log]` section configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Show `debug!` output (same as `--verbose`).
    pub verbose: bool,
}
