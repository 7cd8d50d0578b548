//! Append-only encoder into a growable buffer.

use crate::errors::CodecError;
use crate::types::Codec;
use crate::varint::{put_unsigned, zigzag_encode32, zigzag_encode64};

/// Encoder accumulating protocol fields into an owned byte buffer.
///
/// Writers return `&mut Self` so calls chain:
///
/// ```rust,ignore
/// use kclient_codec::Encoder;
///
/// let mut enc = Encoder::new();
/// enc.write_signed_varint32(1).write_signed_varint64(-1);
/// assert_eq!(enc.as_bytes(), &[0x02, 0x01]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    /// Constructs a new empty encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs an encoder with room for `cap` bytes before reallocating.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: Vec::with_capacity(cap),
        }
    }

    /// Returns the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Finishes the session, returning the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Writes a buf.  This does NOT include length tagging.
    pub fn write_buf(&mut self, buf: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(buf);
        self
    }

    /// Writes a signed 32-bit zigzag varint, taking 1 to 5 bytes.
    pub fn write_signed_varint32(&mut self, n: i32) -> &mut Self {
        put_unsigned(u64::from(zigzag_encode32(n)), &mut self.buf);
        self
    }

    /// Writes a signed 32-bit zigzag varint from a wider int, failing instead
    /// of truncating if it doesn't fit.
    pub fn write_signed_varint32_checked(&mut self, n: i64) -> Result<&mut Self, CodecError> {
        let n = i32::try_from(n).map_err(|_| CodecError::OutOfRange {
            value: n,
            bits: i32::BITS,
        })?;
        Ok(self.write_signed_varint32(n))
    }

    /// Writes a signed 64-bit zigzag varint, taking 1 to 10 bytes.
    pub fn write_signed_varint64(&mut self, n: i64) -> &mut Self {
        put_unsigned(zigzag_encode64(n), &mut self.buf);
        self
    }

    /// Writes an unsigned 32-bit varint, without zigzag mapping.
    pub fn write_unsigned_varint32(&mut self, n: u32) -> &mut Self {
        put_unsigned(u64::from(n), &mut self.buf);
        self
    }

    /// Writes a big-endian `i8`.
    pub fn write_int8(&mut self, n: i8) -> &mut Self {
        self.write_buf(&n.to_be_bytes())
    }

    /// Writes a big-endian `i16`.
    pub fn write_int16(&mut self, n: i16) -> &mut Self {
        self.write_buf(&n.to_be_bytes())
    }

    /// Writes a big-endian `i32`.
    pub fn write_int32(&mut self, n: i32) -> &mut Self {
        self.write_buf(&n.to_be_bytes())
    }

    /// Writes a big-endian `i64`.
    pub fn write_int64(&mut self, n: i64) -> &mut Self {
        self.write_buf(&n.to_be_bytes())
    }

    /// Writes any [`Codec`] value.
    pub fn write<T: Codec>(&mut self, v: &T) -> Result<&mut Self, CodecError> {
        v.encode(self)?;
        Ok(self)
    }

    /// Writes a byte field prefixed with its length as a signed varint, with
    /// `None` written as length -1.
    pub fn write_varint_bytes(&mut self, v: Option<&[u8]>) -> Result<&mut Self, CodecError> {
        let Some(body) = v else {
            return Ok(self.write_signed_varint32(-1));
        };

        self.write_signed_varint32_checked(i64::try_from(body.len()).unwrap_or(i64::MAX))?;
        Ok(self.write_buf(body))
    }

    /// Writes a UTF-8 string field the same way as [`Self::write_varint_bytes`].
    pub fn write_varint_string(&mut self, v: Option<&str>) -> Result<&mut Self, CodecError> {
        self.write_varint_bytes(v.map(str::as_bytes))
    }
}

impl From<Encoder> for Vec<u8> {
    fn from(enc: Encoder) -> Self {
        enc.into_bytes()
    }
}
