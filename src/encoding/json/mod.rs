// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON codec module.
//!
//! Provides the textual codec.

pub mod codec;

pub use codec::{JsonCodec, JSON_CODEC_NAME};
