//! `encode` command.

use std::io::{self, Write};

use anyhow::{Context, Result};

use super::CodecArgs;
use super::common::{load_keytext, read_message};
use crate::cipher::{Corpus, Encoded, MessageOptions, encode_message};
use crate::config::CipherConfig;
use crate::log;

pub fn run(args: &CodecArgs, config: &CipherConfig) -> Result<()> {
    let message = read_message(args, "encode")?;
    let corpus = load_keytext(&args.source, config)?;
    let encoded = encode(&message, &corpus, &config.message_options())?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", encoded.text).context("Failed to write tokens")?;
    Ok(())
}

/// Encode and report bytes that got the failure marker.
fn encode(message: &[u8], corpus: &Corpus, options: &MessageOptions) -> Result<Encoded> {
    let encoded = encode_message(message, corpus, options).context("Failed to encode message")?;

    for &offset in &encoded.unallocated {
        log!("warning"; "no unused position for byte 0x{:02x} at offset {}", message[offset], offset);
    }
    if !encoded.is_complete() {
        log!(
            "encode";
            "{} of {} bytes could not be encoded; add more keytext pages",
            encoded.unallocated.len(),
            message.len()
        );
    }
    Ok(encoded)
}
