// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Transcode command - decode with one codec, encode with another.

use std::path::PathBuf;

use anyhow::{anyhow, Context as _};
use clap::Args;

use crate::common::{self, Result};
use bytestream_codecs::{CodecOptions, CodecRegistry, Indent};

/// Decode input with one codec and encode it with another.
#[derive(Args, Clone, Debug)]
pub struct TranscodeCmd {
    /// Source codec name or MIME type
    #[arg(long, value_name = "NAME|MIME")]
    from: String,

    /// Target codec name or MIME type
    #[arg(long, value_name = "NAME|MIME")]
    to: String,

    /// Input file (reads stdin when omitted)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file (writes stdout when omitted)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Indent textual output by N spaces
    #[arg(long, value_name = "N")]
    indent: Option<usize>,

    /// Input is hex text
    #[arg(long)]
    hex_in: bool,

    /// Write output as hex text
    #[arg(long)]
    hex_out: bool,
}

impl TranscodeCmd {
    pub fn run(self, registry: &CodecRegistry) -> Result<()> {
        let source = registry
            .get_codec(&self.from)
            .ok_or_else(|| anyhow!("Unknown codec: {}", self.from))?;
        let target = registry
            .get_codec(&self.to)
            .ok_or_else(|| anyhow!("Unknown codec: {}", self.to))?;

        let raw = common::read_input(self.input.as_deref())?;
        let data = if self.hex_in {
            common::decode_hex(&raw)?
        } else {
            raw
        };

        let value = source
            .decode(&data, &CodecOptions::new())
            .with_context(|| format!("Failed to decode input as {}", source.name()))?
            .ok_or_else(|| anyhow!("Input is not valid {}", source.display_name()))?;

        let mut options = CodecOptions::new();
        if let Some(n) = self.indent {
            options = options.with_indent(Indent::Spaces(n));
        }

        let mut encoded = target
            .encode(&value, &options)
            .with_context(|| format!("Failed to encode value as {}", target.name()))?;
        if self.hex_out {
            encoded = common::encode_hex(&encoded);
        }

        common::write_output(self.output.as_deref(), &encoded)
    }
}
