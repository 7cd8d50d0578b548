use proptest::prelude::*;

use crate::{
    Codec, CodecError, Decoder, Encoder, UVarInt, VarInt, VarLong, decode_buf_exact,
    encode_to_vec, size_of_unsigned_varint32, size_of_varint32, size_of_varint64,
};

fn decode32(buf: &[u8]) -> Result<i32, CodecError> {
    Decoder::new(buf).read_signed_varint32()
}

fn decode64(buf: &[u8]) -> Result<i64, CodecError> {
    Decoder::new(buf).read_signed_varint64()
}

proptest! {
    #[test]
    fn varint32_roundtrip(n in any::<i32>()) {
        let mut enc = Encoder::new();
        enc.write_signed_varint32(n);
        prop_assert_eq!(enc.len(), size_of_varint32(n));
        prop_assert_eq!(decode32(enc.as_bytes()), Ok(n));
    }

    #[test]
    fn varint64_roundtrip(n in any::<i64>()) {
        let mut enc = Encoder::new();
        enc.write_signed_varint64(n);
        prop_assert_eq!(enc.len(), size_of_varint64(n));
        prop_assert_eq!(decode64(enc.as_bytes()), Ok(n));
    }

    #[test]
    fn varint64_roundtrip_beyond_f64_precision(
        n in prop_oneof![(1i64 << 53)..=i64::MAX, i64::MIN..=-(1i64 << 53)]
    ) {
        let buf = encode_to_vec(&VarLong(n)).unwrap();
        prop_assert_eq!(decode_buf_exact::<VarLong>(&buf), Ok(VarLong(n)));
    }

    #[test]
    fn unsigned_varint32_roundtrip(n in any::<u32>()) {
        let buf = encode_to_vec(&UVarInt(n)).unwrap();
        prop_assert_eq!(buf.len(), size_of_unsigned_varint32(n));
        prop_assert_eq!(decode_buf_exact::<UVarInt>(&buf), Ok(UVarInt(n)));
    }

    #[test]
    fn varint32_as_varint64_agrees(n in any::<i32>()) {
        // Widening never changes the wire bytes.
        let a = encode_to_vec(&VarInt(n)).unwrap();
        let b = encode_to_vec(&VarLong(n.into())).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn truncated_varint_never_yields_value(n in any::<i64>()) {
        let buf = encode_to_vec(&VarLong(n)).unwrap();
        for cut in 0..buf.len() {
            prop_assert_eq!(decode64(&buf[..cut]), Err(CodecError::Underflow));
        }
    }
}

#[test]
fn test_decode_int32_fixtures() {
    for n in [
        0, 1, 63, 64, 8191, 8192, 1048575, 1048576, 134217727, 134217728, -1, -64, -65, -8192,
        -8193, -1048576, -1048577, -134217728, -134217729, i32::MAX, i32::MIN,
    ] {
        let buf = encode_to_vec(&VarInt(n)).unwrap();
        assert_eq!(decode32(&buf), Ok(n), "value {n}");
    }
}

#[test]
fn test_decode_int64_fixtures() {
    for n in [
        17179869183,
        17179869184,
        2199023255551,
        2199023255552,
        281474976710655,
        281474976710656,
        36028797018963967,
        36028797018963968,
        4611686018427387903,
        4611686018427387904,
        i64::MAX,
        i64::MIN,
    ] {
        let buf = encode_to_vec(&VarLong(n)).unwrap();
        assert_eq!(decode64(&buf), Ok(n), "value {n}");
    }
}

#[test]
fn test_length_grows_at_each_power_of_128() {
    // Zigzag doubles positives, so the boundaries sit at 64 * 128^k.
    let mut boundary = 64i64;
    let mut expected = 2;
    while let Some(next) = boundary.checked_mul(128) {
        assert_eq!(size_of_varint64(boundary - 1), expected - 1);
        assert_eq!(size_of_varint64(boundary), expected);
        assert_eq!(size_of_varint64(-boundary), expected - 1);
        assert_eq!(size_of_varint64(-boundary - 1), expected);
        boundary = next;
        expected += 1;
    }
    assert_eq!(expected, 10);
    assert_eq!(size_of_varint64(boundary), 10);
}

#[test]
fn test_codec_fixed_width_ints() {
    let mut enc = Encoder::new();
    enc.write(&-2i32).unwrap().write(&true).unwrap().write(&7u16).unwrap();
    assert_eq!(enc.as_bytes(), &[0xff, 0xff, 0xff, 0xfe, 0x01, 0x00, 0x07]);

    let mut dec = Decoder::new(enc.as_bytes());
    assert_eq!(dec.read::<i32>(), Ok(-2));
    assert_eq!(dec.read::<bool>(), Ok(true));
    assert_eq!(dec.read::<u16>(), Ok(7));
}

#[test]
fn test_invalid_bool_rewinds() {
    let mut dec = Decoder::new([0x02u8]);
    assert_eq!(dec.read::<bool>(), Err(CodecError::InvalidVariant("bool")));
    assert_eq!(dec.offset(), 0);
}

#[test]
fn test_decode_buf_exact_rejects_leftover() {
    assert_eq!(
        decode_buf_exact::<VarInt>(&[0x02, 0x00]),
        Err(CodecError::ExtraInput)
    );
    assert_eq!(decode_buf_exact::<VarInt>(&[0x02]), Ok(VarInt(1)));
}

#[test]
fn test_codec_newtype_decode_direct() {
    let mut dec = Decoder::new([0x7fu8, 0x81, 0x01]);
    assert_eq!(VarInt::decode(&mut dec), Ok(VarInt(-64)));
    assert_eq!(VarLong::decode(&mut dec), Ok(VarLong(-65)));
}
