// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! List command - show registered codecs.

use clap::Args;

use crate::common::Result;
use bytestream_codecs::CodecRegistry;

/// List registered codecs.
#[derive(Args, Clone, Debug)]
pub struct ListCmd {
    /// Print only codec names, one per line
    #[arg(short, long)]
    quiet: bool,
}

impl ListCmd {
    pub fn run(self, registry: &CodecRegistry) -> Result<()> {
        if registry.is_empty() {
            if !self.quiet {
                println!("No codecs registered");
            }
            return Ok(());
        }

        for name in registry.names() {
            let Some(codec) = registry.get_codec(name) else {
                continue;
            };

            println!("{name}");
            if !self.quiet {
                println!("  Name:       {}", codec.display_name());
                println!("  MIME types: {}", codec.mime_types().join(", "));
            }
        }

        let mut aliases: Vec<_> = registry
            .mime_types()
            .iter()
            .filter(|(mime_type, name)| {
                registry
                    .get_codec(name)
                    .is_some_and(|codec| !codec.mime_types().contains(&mime_type.as_str()))
            })
            .collect();
        aliases.sort();

        if !self.quiet && !aliases.is_empty() {
            println!();
            println!("MIME aliases:");
            for (mime_type, name) in aliases {
                println!("  {mime_type} -> {name}");
            }
        }

        Ok(())
    }
}
