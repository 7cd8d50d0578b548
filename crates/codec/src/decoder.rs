//! Cursor-based decoder over a flat buffer.

use std::ops::Range;
use std::str;

use crate::errors::CodecError;
use crate::types::Codec;
use crate::varint::{take_unsigned, zigzag_decode32, zigzag_decode64};

/// Length prefix that marks a null bytes/string field.
const NULL_LEN: i32 = -1;

/// Decoder for an arbitrary [`AsRef`] on a byte slice.
///
/// Reads advance a cursor through the buffer.  A failed read leaves the cursor
/// where it was, so the caller can tell exactly where decoding stopped.
#[derive(Debug)]
pub struct Decoder<B> {
    buf: B,
    at: usize,
}

impl<B: AsRef<[u8]>> Decoder<B> {
    /// Constructs a new instance by wrapping a buffer and starting at the
    /// beginning.
    pub fn new(buf: B) -> Self {
        Self { buf, at: 0 }
    }

    /// Returns the length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.buf.as_ref().len()
    }

    /// Returns if the underlying buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.as_ref().is_empty()
    }

    /// Returns the cursor position.
    pub fn offset(&self) -> usize {
        self.at
    }

    /// Returns the total number of remaining bytes that can be read.
    pub fn remaining(&self) -> usize {
        self.len() - self.at
    }

    /// Returns if every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns if at least `n` more bytes can be read.
    pub fn can_read(&self, n: usize) -> bool {
        n <= self.remaining()
    }

    /// Consumes the decoder, returning the wrapped buffer.
    pub fn into_inner(self) -> B {
        self.buf
    }

    /// Returns the slice of the remaining unread bytes, which might be empty.
    fn rest(&self) -> &[u8] {
        &self.buf.as_ref()[self.at..]
    }

    /// Reads a signed 32-bit zigzag varint.
    pub fn read_signed_varint32(&mut self) -> Result<i32, CodecError> {
        let (z, n) = take_unsigned(self.rest(), u32::BITS)?;
        self.at += n;
        Ok(zigzag_decode32(z as u32))
    }

    /// Reads a signed 64-bit zigzag varint.
    pub fn read_signed_varint64(&mut self) -> Result<i64, CodecError> {
        let (z, n) = take_unsigned(self.rest(), u64::BITS)?;
        self.at += n;
        Ok(zigzag_decode64(z))
    }

    /// Reads an unsigned 32-bit varint, without zigzag mapping.
    pub fn read_unsigned_varint32(&mut self) -> Result<u32, CodecError> {
        let (v, n) = take_unsigned(self.rest(), u32::BITS)?;
        self.at += n;
        Ok(v as u32)
    }

    /// Reads exactly `N` bytes.
    pub fn read_arr<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        if !self.can_read(N) {
            return Err(CodecError::Underflow);
        }

        let mut buf = [0; N];
        buf.copy_from_slice(&self.rest()[..N]);
        self.at += N;
        Ok(buf)
    }

    /// Reads a variable-size buf.  This does NOT include length tagging.
    pub fn read_buf(&mut self, into: &mut [u8]) -> Result<(), CodecError> {
        if !self.can_read(into.len()) {
            return Err(CodecError::Underflow);
        }

        into.copy_from_slice(&self.rest()[..into.len()]);
        self.at += into.len();
        Ok(())
    }

    /// Reads a big-endian `i8`.
    pub fn read_int8(&mut self) -> Result<i8, CodecError> {
        self.read()
    }

    /// Reads a big-endian `i16`.
    pub fn read_int16(&mut self) -> Result<i16, CodecError> {
        self.read()
    }

    /// Reads a big-endian `i32`.
    pub fn read_int32(&mut self) -> Result<i32, CodecError> {
        self.read()
    }

    /// Reads a big-endian `i64`.
    pub fn read_int64(&mut self) -> Result<i64, CodecError> {
        self.read()
    }

    /// Reads any [`Codec`] value.
    ///
    /// On failure the cursor is rewound to where the value started.
    pub fn read<T: Codec>(&mut self) -> Result<T, CodecError> {
        let start = self.at;
        T::decode(self).inspect_err(|_| self.at = start)
    }

    /// Reads a signed-varint length prefixed byte field, where a length of -1
    /// means null.
    pub fn read_varint_bytes(&mut self) -> Result<Option<&[u8]>, CodecError> {
        let (body, end) = self.peek_varint_prefixed()?;
        self.at = end;
        Ok(body.map(|r| &self.buf.as_ref()[r]))
    }

    /// Reads a signed-varint length prefixed UTF-8 string, where a length of
    /// -1 means null.
    pub fn read_varint_string(&mut self) -> Result<Option<&str>, CodecError> {
        let (body, end) = self.peek_varint_prefixed()?;
        let Some(body) = body else {
            self.at = end;
            return Ok(None);
        };

        let s = str::from_utf8(&self.buf.as_ref()[body])?;
        self.at = end;
        Ok(Some(s))
    }

    /// Parses a length prefixed field without moving the cursor, returning
    /// the body's range in the buffer and the offset just past it.
    fn peek_varint_prefixed(&self) -> Result<(Option<Range<usize>>, usize), CodecError> {
        let (z, n) = take_unsigned(self.rest(), u32::BITS)?;
        let len = zigzag_decode32(z as u32);
        let at = self.at + n;
        if len == NULL_LEN {
            return Ok((None, at));
        }

        let len = usize::try_from(len).map_err(|_| CodecError::InvalidLength(len.into()))?;
        if len > self.len() - at {
            return Err(CodecError::Underflow);
        }

        Ok((Some(at..at + len), at + len))
    }
}
