use std::str::Utf8Error;

use thiserror::Error;

/// Errors from kclient-codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// If we tried to read past the end of the underlying buffer, including
    /// running out of input before a varint's terminating byte.
    #[error("would overrun end of input")]
    Underflow,

    /// If a varint had more continuation bytes, or more significant bits, than
    /// its declared width allows.
    #[error("malformed varint (exceeds {0} bits)")]
    MalformedVarint(u32),

    /// If a caller tried to write a value that doesn't fit the varint width.
    #[error("value {value} out of range for {bits}-bit varint")]
    OutOfRange {
        /// The offending value.
        value: i64,

        /// Declared width of the varint.
        bits: u32,
    },

    /// If a length prefix was negative but not the null marker.
    #[error("invalid length prefix {0}")]
    InvalidLength(i64),

    /// If a string field wasn't valid UTF-8.
    #[error("invalid utf-8 in string field: {0}")]
    InvalidUtf8(#[from] Utf8Error),

    /// If we decoded a tag byte that isn't valid for the type.
    #[error("invalid variant for {0}")]
    InvalidVariant(&'static str),

    /// If there was extra data in a buffer than we didn't consume reading a
    /// message.
    #[error("extra unnecessary input leftover")]
    ExtraInput,
}
