//! Wire codec for the Kafka-style broker protocol.
//!
//! The interesting part is the signed varint: integers are zigzag-mapped and
//! then written as LEB128 groups, exactly as the broker expects them.  Fields
//! are appended to an [`Encoder`] and read back out of a [`Decoder`] cursor.
//!
//! ```rust,ignore
//! use kclient_codec::{Decoder, Encoder};
//!
//! let mut enc = Encoder::new();
//! enc.write_signed_varint32(-65).write_signed_varint64(i64::MAX);
//!
//! let mut dec = Decoder::new(enc.into_bytes());
//! assert_eq!(dec.read_signed_varint32().unwrap(), -65);
//! assert_eq!(dec.read_signed_varint64().unwrap(), i64::MAX);
//! assert!(dec.is_exhausted());
//! ```

mod decoder;
pub use decoder::Decoder;

mod encoder;
pub use encoder::Encoder;

mod errors;
pub use errors::CodecError;

mod types;
pub use types::{Codec, UVarInt, VarInt, VarLong};

mod util;
pub use util::{decode_buf_exact, encode_to_vec};

pub mod varint;
pub use varint::{size_of_unsigned_varint32, size_of_varint32, size_of_varint64};

#[cfg(test)]
mod tests;
