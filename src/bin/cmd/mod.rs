// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod list;
mod transcode;

pub use list::ListCmd;
pub use transcode::TranscodeCmd;
