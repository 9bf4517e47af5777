//! pagecipher - a book cipher over public web pages.

mod cipher;
mod cli;
mod config;
mod fetch;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::CipherConfig;

fn main() {
    if let Err(err) = run() {
        log!("error"; "{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    if let Commands::Version = cli.command {
        println!("pagecipher v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = CipherConfig::load(&cli)?;

    match &cli.command {
        Commands::Encode { args } => cli::encode::run(args, &config),
        Commands::Decode { args, .. } => cli::decode::run(args, &config),
        Commands::Version => Ok(()),
    }
}
