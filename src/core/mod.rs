// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout bytestream-codecs.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Error taxonomy shared by all codecs
//! - [`CodecValue`] - Unified value representation
//! - [`CodecOptions`] - Typed per-call options and value hooks

pub mod error;
pub mod options;
pub mod value;

pub use error::{CodecError, Result};
pub use options::{CodecOptions, Indent, ValueHook, MAX_INDENT};
pub use value::{CodecValue, ValueMap};
