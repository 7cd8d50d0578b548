//! High-level util functions.

use crate::{Codec, CodecError, Decoder, Encoder};

/// Decodes a value from a buffer, throwing an error if there's leftover bytes.
pub fn decode_buf_exact<T: Codec>(buf: &[u8]) -> Result<T, CodecError> {
    let mut dec = Decoder::new(buf);
    let v = T::decode(&mut dec)?;
    if dec.remaining() > 0 {
        return Err(CodecError::ExtraInput);
    }
    Ok(v)
}

/// Encodes the value into a newly allocated vec.
pub fn encode_to_vec<T: Codec>(v: &T) -> Result<Vec<u8>, CodecError> {
    let mut enc = Encoder::new();
    v.encode(&mut enc)?;
    Ok(enc.into_bytes())
}
