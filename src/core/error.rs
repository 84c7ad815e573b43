// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for bytestream-codecs.
//!
//! Errors fall into four groups:
//! - Dispatch (unknown codec name)
//! - Malformed input (binary decoding only; textual decoding reports `None`)
//! - Unsupported values at encode time
//! - Configuration loading and validation

use thiserror::Error;

/// Errors that can occur during codec dispatch, encoding, and decoding.
#[derive(Debug, Clone, Error)]
pub enum CodecError {
    /// No codec is registered under the requested name.
    #[error("Unknown codec: '{name}'")]
    UnknownCodec {
        /// Name that failed to resolve
        name: String,
    },

    /// Input bytes do not form a valid encoding.
    #[error("{codec} malformed input: {message}")]
    MalformedInput {
        /// Codec context (e.g., "msgpack")
        codec: String,
        /// Error message
        message: String,
    },

    /// A type tag that the format does not define.
    #[error("Invalid type tag 0x{tag:02x} at position {position}")]
    InvalidTag {
        /// Offending tag byte
        tag: u8,
        /// Position of the tag in the buffer
        position: usize,
    },

    /// Buffer too short for requested read
    #[error(
        "Buffer too short: requested {requested} bytes at position {cursor_pos}, but only {available} bytes available"
    )]
    BufferTooShort {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when error occurred
        cursor_pos: u64,
    },

    /// Array, map, or payload length exceeded data bounds
    #[error("Length {length} exceeds buffer at position {position} (buffer length: {buffer_len})")]
    LengthExceeded {
        /// Length that was read
        length: usize,
        /// Position in buffer
        position: usize,
        /// Buffer length
        buffer_len: usize,
    },

    /// Value cannot be represented by the target format.
    #[error("{codec} cannot encode {type_name}: {reason}")]
    UnsupportedValue {
        /// Codec context (e.g., "json")
        codec: String,
        /// Type name of the rejected value
        type_name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Registry configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },
}

impl CodecError {
    /// Create an "unknown codec" error.
    pub fn unknown_codec(name: impl Into<String>) -> Self {
        CodecError::UnknownCodec { name: name.into() }
    }

    /// Create a malformed input error.
    pub fn malformed(codec: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::MalformedInput {
            codec: codec.into(),
            message: message.into(),
        }
    }

    /// Create an invalid tag error.
    pub fn invalid_tag(tag: u8, position: usize) -> Self {
        CodecError::InvalidTag { tag, position }
    }

    /// Create a buffer too short error.
    pub fn buffer_too_short(requested: usize, available: usize, cursor_pos: u64) -> Self {
        CodecError::BufferTooShort {
            requested,
            available,
            cursor_pos,
        }
    }

    /// Create a length exceeded error.
    pub fn length_exceeded(length: usize, position: usize, buffer_len: usize) -> Self {
        CodecError::LengthExceeded {
            length,
            position,
            buffer_len,
        }
    }

    /// Create an unsupported value error.
    pub fn unsupported_value(
        codec: impl Into<String>,
        type_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CodecError::UnsupportedValue {
            codec: codec.into(),
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        CodecError::Config {
            message: message.into(),
        }
    }

    /// Whether this error reports bytes that could not be decoded.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            CodecError::MalformedInput { .. }
                | CodecError::InvalidTag { .. }
                | CodecError::BufferTooShort { .. }
                | CodecError::LengthExceeded { .. }
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::UnknownCodec { name } => vec![("name", name.clone())],
            CodecError::MalformedInput { codec, message } => {
                vec![("codec", codec.clone()), ("message", message.clone())]
            }
            CodecError::InvalidTag { tag, position } => vec![
                ("tag", format!("0x{tag:02x}")),
                ("position", position.to_string()),
            ],
            CodecError::BufferTooShort {
                requested,
                available,
                cursor_pos,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("cursor", cursor_pos.to_string()),
            ],
            CodecError::LengthExceeded {
                length,
                position,
                buffer_len,
            } => vec![
                ("length", length.to_string()),
                ("position", position.to_string()),
                ("buffer_len", buffer_len.to_string()),
            ],
            CodecError::UnsupportedValue {
                codec,
                type_name,
                reason,
            } => vec![
                ("codec", codec.clone()),
                ("type", type_name.clone()),
                ("reason", reason.clone()),
            ],
            CodecError::Config { message } => vec![("message", message.clone())],
        }
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Config {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CodecError {
    fn from(err: toml::de::Error) -> Self {
        CodecError::Config {
            message: err.to_string(),
        }
    }
}

/// Result type for bytestream-codecs operations.
pub type Result<T> = std::result::Result<T, CodecError>;
