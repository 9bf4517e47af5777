//! Command-line interface module.

mod args;
pub mod common;
pub mod decode;
pub mod encode;

pub use args::{Cli, CodecArgs, Commands, SourceArgs};
