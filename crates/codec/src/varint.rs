//! Zigzag-mapped LEB128 varints.
//!
//! Signed values are first zigzag-mapped so that small magnitudes of either
//! sign become small unsigned values, then split into 7-bit groups, least
//! significant group first.  Every byte but the last has its high bit set.
//!
//! ```txt
//!        0 -> 00
//!       -1 -> 01
//!        1 -> 02
//!       63 -> 7e
//!       64 -> 80 01
//! ```

use crate::errors::CodecError;

/// Max number of bytes a 32-bit varint can take.
pub const MAX_VARINT32_LEN: usize = 5;

/// Max number of bytes a 64-bit varint can take.
pub const MAX_VARINT64_LEN: usize = 10;

const CONTINUATION: u8 = 0x80;
const GROUP_MASK: u8 = 0x7f;

/// Maps a signed 32-bit int onto the unsigned range.
pub const fn zigzag_encode32(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

/// Inverse of [`zigzag_encode32`].
pub const fn zigzag_decode32(z: u32) -> i32 {
    ((z >> 1) as i32) ^ -((z & 1) as i32)
}

/// Maps a signed 64-bit int onto the unsigned range.
pub const fn zigzag_encode64(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Inverse of [`zigzag_encode64`].
pub const fn zigzag_decode64(z: u64) -> i64 {
    ((z >> 1) as i64) ^ -((z & 1) as i64)
}

/// Returns the number of bytes the signed 32-bit varint encoding of `n` takes.
pub const fn size_of_varint32(n: i32) -> usize {
    unsigned_len(zigzag_encode32(n) as u64)
}

/// Returns the number of bytes the signed 64-bit varint encoding of `n` takes.
pub const fn size_of_varint64(n: i64) -> usize {
    unsigned_len(zigzag_encode64(n))
}

/// Returns the number of bytes the unsigned varint encoding of `n` takes.
pub const fn size_of_unsigned_varint32(n: u32) -> usize {
    unsigned_len(n as u64)
}

const fn unsigned_len(v: u64) -> usize {
    // Zero still takes a byte.
    let bits = u64::BITS - (v | 1).leading_zeros();
    bits.div_ceil(7) as usize
}

/// Appends the raw LEB128 groups of `value`.
pub(crate) fn put_unsigned(mut value: u64, out: &mut Vec<u8>) {
    while value >= u64::from(CONTINUATION) {
        out.push((value as u8 & GROUP_MASK) | CONTINUATION);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Reads raw LEB128 groups from the front of `buf`, accepting at most `bits`
/// significant bits.
///
/// Returns the value and the number of bytes it took.
pub(crate) fn take_unsigned(buf: &[u8], bits: u32) -> Result<(u64, usize), CodecError> {
    let max_len = bits.div_ceil(7) as usize;
    let mut acc = 0u64;

    for (i, shift) in (0..max_len).zip((0..).step_by(7)) {
        let byte = *buf.get(i).ok_or(CodecError::Underflow)?;
        let group = u64::from(byte & GROUP_MASK);

        // The last permitted group can only carry what's left of the width.
        if shift + 7 > bits && group >> (bits - shift) != 0 {
            return Err(CodecError::MalformedVarint(bits));
        }

        acc |= group << shift;
        if byte & CONTINUATION == 0 {
            return Ok((acc, i + 1));
        }
    }

    Err(CodecError::MalformedVarint(bits))
}
