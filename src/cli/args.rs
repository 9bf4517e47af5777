//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Book cipher that hides messages as character positions in web pages
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: pagecipher.toml, searched upward)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Encode a message into tokens pointing into the keytext pages
    #[command(visible_alias = "e")]
    Encode {
        #[command(flatten)]
        args: CodecArgs,
    },

    /// Decode tokens back into the message
    #[command(visible_alias = "d")]
    Decode {
        #[command(flatten)]
        args: CodecArgs,

        /// Character written for tokens that cannot be resolved (default: #)
        #[arg(long)]
        placeholder: Option<char>,
    },

    /// Print the version
    Version,
}

/// Where the keytext pages come from.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// File listing keytext sources, one per line (`#` starts a comment)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub urls: Option<PathBuf>,

    /// Keytext source (URL or file path); repeatable, appended after --urls
    #[arg(short, long = "source", value_name = "SOURCE", value_hint = clap::ValueHint::AnyPath)]
    pub sources: Vec<String>,

    /// Fetch pages (and resolve tokens) in parallel
    #[arg(short = 'j', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub parallel: Option<bool>,
}

/// Shared arguments for Encode and Decode
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CodecArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Message (or token string) to process
    #[arg(short, long)]
    pub message: Option<String>,

    /// Read the message from stdin
    #[arg(short = 'i', long = "in", conflicts_with = "message")]
    pub stdin: bool,

    /// Fail instead of writing failure markers or placeholders
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub strict: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Cli {
    /// Arguments of the encode/decode subcommand, if any.
    pub fn codec_args(&self) -> Option<&CodecArgs> {
        match &self.command {
            Commands::Encode { args } | Commands::Decode { args, .. } => Some(args),
            Commands::Version => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_encode() {
        let cli = Cli::try_parse_from([
            "pagecipher", "e", "-u", "urls.txt", "-s", "a.html", "-s", "b.html", "-m", "hi", "-j",
        ])
        .unwrap();
        let args = cli.codec_args().unwrap();
        assert_eq!(args.source.urls, Some(PathBuf::from("urls.txt")));
        assert_eq!(args.source.sources, ["a.html", "b.html"]);
        assert_eq!(args.source.parallel, Some(true));
        assert_eq!(args.message.as_deref(), Some("hi"));
        assert!(matches!(cli.command, Commands::Encode { .. }));
    }

    #[test]
    fn test_parse_decode_options() {
        let cli = Cli::try_parse_from([
            "pagecipher", "decode", "--in", "--strict", "--placeholder", "?", "-j", "false",
            "-C", "alt.toml",
        ])
        .unwrap();
        let Commands::Decode { args, placeholder } = &cli.command else {
            panic!("expected decode");
        };
        assert!(args.stdin);
        assert_eq!(args.strict, Some(true));
        assert_eq!(args.source.parallel, Some(false));
        assert_eq!(*placeholder, Some('?'));
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }

    #[test]
    fn test_message_and_stdin_conflict() {
        let result = Cli::try_parse_from(["pagecipher", "encode", "-m", "hi", "--in"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_version_subcommand() {
        let cli = Cli::try_parse_from(["pagecipher", "version"]).unwrap();
        assert!(cli.codec_args().is_none());
    }
}
