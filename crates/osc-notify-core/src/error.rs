//! Error types for osc-notify-core

use thiserror::Error;

/// Result type alias using the library's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of a failed invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Framing problems: missing separator, missing sentinel, empty text.
    Structural,
    /// Base64 or text-safety failures in the payload.
    Encoding,
    /// Accumulated title or body would not fit the fixed buffer.
    Capacity,
    /// The parser was already invalidated by an earlier failure.
    ParserInvalid,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::Encoding => "encoding",
            Self::Capacity => "capacity",
            Self::ParserInvalid => "parser_invalid",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which accumulation buffer rejected an append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferSlot {
    Title,
    Body,
}

impl std::fmt::Display for BufferSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Title => f.write_str("title"),
            Self::Body => f.write_str("body"),
        }
    }
}

/// Main error type for osc-notify-core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No `;` separates metadata from payload
    #[error("missing ';' between metadata and payload")]
    MissingSeparator,

    /// The invocation carried no bytes at all
    #[error("empty invocation")]
    EmptyInvocation,

    /// The byte sink could not place its terminating sentinel
    #[error("byte sink is missing its sentinel terminator")]
    MissingSentinel,

    /// The payload was flagged as base64 but did not decode
    #[error("invalid base64 payload: {0}")]
    Base64(String),

    /// The payload is not valid UTF-8
    #[error("payload is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },

    /// The payload contains a control character outside the safe set
    #[error("payload contains unsafe control character U+{codepoint:04X}")]
    UnsafeText { codepoint: u32 },

    /// Appending would reach or exceed the buffer capacity
    #[error("{slot} buffer overflow: {len} + {additional} bytes reaches capacity {capacity}")]
    CapacityExceeded {
        slot: BufferSlot,
        len: usize,
        additional: usize,
        capacity: usize,
    },

    /// The parser was invalidated earlier and must be reset
    #[error("parser is invalid; reset required")]
    ParserInvalid,
}

impl Error {
    /// Classify this error for callers that only care about the category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingSeparator | Self::EmptyInvocation | Self::MissingSentinel => {
                ErrorKind::Structural
            }
            Self::Base64(_) | Self::InvalidUtf8 { .. } | Self::UnsafeText { .. } => {
                ErrorKind::Encoding
            }
            Self::CapacityExceeded { .. } => ErrorKind::Capacity,
            Self::ParserInvalid => ErrorKind::ParserInvalid,
        }
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Self::Base64(err.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::InvalidUtf8 {
            valid_up_to: err.valid_up_to(),
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file {0}: {1}")]
    ReadFailed(String, String),

    #[error("Failed to parse config: {0}")]
    ParseFailed(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
