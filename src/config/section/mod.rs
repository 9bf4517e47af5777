//! Configuration section definitions.
//!
//! Each module corresponds to a section in `pagecipher.toml`:
//!
//! | Module    | TOML Section | Purpose                              |
//! |-----------|--------------|--------------------------------------|
//! | `codec`   | `[codec]`    | Placeholder byte, strict mode        |
//! | `fetch`   | `[fetch]`    | Timeout, user agent, parallelism     |
//! | `log`     | `[log]`      | Verbose output                       |
//! | `sources` | `[sources]`  | Default keytext pages                |

mod codec;
mod fetch;
mod log;
mod sources;

pub use codec::CodecConfig;
pub use fetch::FetchConfig;
pub use log::LogConfig;
pub use sources::SourcesConfig;
