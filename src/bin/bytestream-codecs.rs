// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # bytestream-codecs CLI
//!
//! Command-line front end for the codec registry.
//!
//! ## Usage
//!
//! ```sh
//! # List registered codecs
//! bytestream-codecs list
//!
//! # Convert JSON to MessagePack, printed as hex
//! echo '{"foo":"bar"}' | bytestream-codecs transcode --from json --to msgpack --hex-out
//!
//! # Convert MessagePack to indented JSON, selecting codecs by MIME type
//! bytestream-codecs transcode --from application/msgpack --to application/json \
//!     --indent 2 input.msgpack -o output.json
//! ```

mod cmd;
mod common;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use cmd::{ListCmd, TranscodeCmd};
use common::Result;

/// bytestream-codecs - Object serialization toolkit
///
/// Convert values between JSON and MessagePack through a codec registry.
#[derive(Parser, Clone)]
#[command(name = "bytestream-codecs")]
#[command(about = "Object serialization toolkit for JSON and MessagePack", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Registry configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// List registered codecs and their MIME types
    List(ListCmd),

    /// Decode input with one codec and encode it with another
    Transcode(TranscodeCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let registry = common::load_registry(cli.config.as_deref())?;

    match cli.command {
        Commands::List(cmd) => cmd.run(&registry),
        Commands::Transcode(cmd) => cmd.run(&registry),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
