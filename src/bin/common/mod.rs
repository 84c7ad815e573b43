// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::io::{Read as _, Write as _};
use std::path::Path;

use anyhow::Context as _;
use bytestream_codecs::{CodecRegistry, RegistryConfig};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Build the registry from a config file, or with every built-in codec.
pub fn load_registry(config: Option<&Path>) -> Result<CodecRegistry> {
    let config = match config {
        Some(path) => RegistryConfig::load(path)?,
        None => RegistryConfig::default(),
    };
    Ok(config.build_registry()?)
}

/// Read all bytes from a file, or from stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut data = Vec::new();
            std::io::stdin()
                .read_to_end(&mut data)
                .context("Failed to read stdin")?;
            Ok(data)
        }
    }
}

/// Write bytes to a file, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(data).context("Failed to write stdout")?;
            stdout.flush().context("Failed to write stdout")?;
            Ok(())
        }
    }
}

/// Parse hex text, ignoring surrounding and embedded whitespace.
pub fn decode_hex(text: &[u8]) -> Result<Vec<u8>> {
    let digits: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    hex::decode(digits).context("Input is not valid hex")
}

/// Lowercase hex text with a trailing newline.
pub fn encode_hex(data: &[u8]) -> Vec<u8> {
    let mut text = hex::encode(data).into_bytes();
    text.push(b'\n');
    text
}
