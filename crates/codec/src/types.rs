use crate::{CodecError, Decoder, Encoder};

/// Generic codec trait for protocol field types that go between bytes.
pub trait Codec: Sized {
    /// Decodes self from a decoder.
    fn decode<B: AsRef<[u8]>>(dec: &mut Decoder<B>) -> Result<Self, CodecError>;

    /// Encodes self into an encoder.
    fn encode(&self, enc: &mut Encoder) -> Result<(), CodecError>;
}

/// Impl for byte arrays.
impl<const N: usize> Codec for [u8; N] {
    fn decode<B: AsRef<[u8]>>(dec: &mut Decoder<B>) -> Result<Self, CodecError> {
        dec.read_arr::<N>()
    }

    fn encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.write_buf(self);
        Ok(())
    }
}

impl Codec for bool {
    fn decode<B: AsRef<[u8]>>(dec: &mut Decoder<B>) -> Result<Self, CodecError> {
        let b = dec.read_arr::<1>()?;
        match b[0] {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(CodecError::InvalidVariant("bool")),
        }
    }

    fn encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.write_buf(&[u8::from(*self)]);
        Ok(())
    }
}

/// Simple macro to wrap the fixed size int types, which go on the wire
/// big-endian.
macro_rules! impl_int_codec {
    ( $ity:ident $bytes:literal ) => {
        impl Codec for $ity {
            fn decode<B: AsRef<[u8]>>(dec: &mut Decoder<B>) -> Result<Self, CodecError> {
                let arr: [u8; $bytes] = dec.read_arr()?;
                Ok(<$ity>::from_be_bytes(arr))
            }

            fn encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
                enc.write_buf(&self.to_be_bytes());
                Ok(())
            }
        }
    };
}

impl_int_codec!(u8 1);
impl_int_codec!(i8 1);
impl_int_codec!(u16 2);
impl_int_codec!(i16 2);
impl_int_codec!(u32 4);
impl_int_codec!(i32 4);
impl_int_codec!(u64 8);
impl_int_codec!(i64 8);

/// Signed 32-bit zigzag varint field.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VarInt(pub i32);

/// Signed 64-bit zigzag varint field.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VarLong(pub i64);

/// Unsigned 32-bit varint field, as used by compact lengths.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct UVarInt(pub u32);

impl Codec for VarInt {
    fn decode<B: AsRef<[u8]>>(dec: &mut Decoder<B>) -> Result<Self, CodecError> {
        dec.read_signed_varint32().map(Self)
    }

    fn encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.write_signed_varint32(self.0);
        Ok(())
    }
}

impl Codec for VarLong {
    fn decode<B: AsRef<[u8]>>(dec: &mut Decoder<B>) -> Result<Self, CodecError> {
        dec.read_signed_varint64().map(Self)
    }

    fn encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.write_signed_varint64(self.0);
        Ok(())
    }
}

impl Codec for UVarInt {
    fn decode<B: AsRef<[u8]>>(dec: &mut Decoder<B>) -> Result<Self, CodecError> {
        dec.read_unsigned_varint32().map(Self)
    }

    fn encode(&self, enc: &mut Encoder) -> Result<(), CodecError> {
        enc.write_unsigned_varint32(self.0);
        Ok(())
    }
}

impl From<i32> for VarInt {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

impl From<i64> for VarLong {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

impl From<u32> for UVarInt {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
